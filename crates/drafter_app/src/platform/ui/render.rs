use drafter_core::{AppViewModel, Msg, ResultsView, ScreenView, WizardView};
use egui::{Align, Button, Layout, ProgressBar, RichText, ScrollArea, Slider, TextEdit};

use crate::platform::textures::{TextureCache, TextureSlot};

use super::constants;

pub fn draw(
    ctx: &egui::Context,
    view: &AppViewModel,
    textures: &TextureCache,
    zoom: &mut f32,
    msgs: &mut Vec<Msg>,
) {
    egui::CentralPanel::default().show(ctx, |ui| match &view.screen {
        ScreenView::Wizard(wizard) => draw_wizard(ui, wizard, &view.industry, msgs),
        ScreenView::Results(results) => draw_results(ui, results, textures, zoom, msgs),
    });
}

fn draw_wizard(ui: &mut egui::Ui, wizard: &WizardView, industry: &str, msgs: &mut Vec<Msg>) {
    let full = ui.available_width();
    let width = full.min(constants::CONTENT_MAX_WIDTH);
    let margin = ((full - width) / 2.0).max(0.0);

    ui.horizontal(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            ui.add_space(24.0);
            ui.vertical_centered(|ui| ui.heading(constants::WIZARD_TITLE));
            ui.add_space(16.0);

            let progress = (wizard.step_index + 1) as f32 / wizard.step_count as f32;
            ui.add(ProgressBar::new(progress));
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "Step {} of {}",
                    wizard.step_index + 1,
                    wizard.step_count
                ))
                .weak(),
            );
            ui.add_space(20.0);

            match wizard.step_index {
                0 => draw_provider_step(ui, wizard, industry, msgs),
                1 => draw_description_step(ui, wizard, msgs),
                _ => draw_confirm_step(ui, wizard, msgs),
            }

            ui.add_space(28.0);
            draw_wizard_nav(ui, wizard, msgs);
        });
    });
}

fn draw_provider_step(
    ui: &mut egui::Ui,
    wizard: &WizardView,
    industry: &str,
    msgs: &mut Vec<Msg>,
) {
    ui.label(RichText::new(constants::PROVIDER_LABEL).strong());
    ui.add_space(4.0);
    let selected = constants::provider_label(&wizard.cloud_provider)
        .unwrap_or(constants::PROVIDER_PLACEHOLDER);
    egui::ComboBox::from_id_salt("cloud_provider")
        .width(320.0)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for (id, label) in constants::CLOUD_PROVIDERS {
                if ui
                    .selectable_label(wizard.cloud_provider == id, label)
                    .clicked()
                {
                    msgs.push(Msg::ProviderSelected(id.to_string()));
                }
            }
        });

    ui.add_space(16.0);
    ui.label(RichText::new(constants::INDUSTRY_LABEL).strong());
    ui.add_space(4.0);
    let industry_text = constants::industry_label(industry).unwrap_or(industry);
    egui::ComboBox::from_id_salt("industry")
        .width(320.0)
        .selected_text(industry_text)
        .show_ui(ui, |ui| {
            for (id, label) in constants::INDUSTRIES {
                if ui.selectable_label(industry == id, label).clicked() {
                    msgs.push(Msg::IndustrySelected(id.to_string()));
                }
            }
        });
}

fn draw_description_step(ui: &mut egui::Ui, wizard: &WizardView, msgs: &mut Vec<Msg>) {
    ui.label(RichText::new(constants::DESCRIPTION_LABEL).strong());
    ui.add_space(4.0);

    // The state machine owns the text; the widget edits a copy each frame.
    let mut text = wizard.project_description.clone();
    let response = ui.add(
        TextEdit::multiline(&mut text)
            .desired_rows(8)
            .desired_width(f32::INFINITY)
            .hint_text(constants::DESCRIPTION_PLACEHOLDER),
    );
    if response.changed() {
        msgs.push(Msg::DescriptionChanged(text));
    }

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("OR").weak());
        ui.add_space(8.0);
        if ui.button(constants::UPLOAD_BUTTON).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PDF documents", &["pdf"])
                .pick_file()
            {
                msgs.push(Msg::PdfFileChosen { path });
            }
        }
        if let Some(name) = &wizard.pdf_file_name {
            ui.add_space(6.0);
            ui.label(format!("Selected file: {name}"));
        }
    });
}

fn draw_confirm_step(ui: &mut egui::Ui, wizard: &WizardView, msgs: &mut Vec<Msg>) {
    egui::Frame::group(ui.style())
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(constants::CONFIRM_TITLE).strong().size(16.0));
            ui.add_space(4.0);
            ui.label(constants::CONFIRM_BODY);
        });

    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        let label = if wizard.is_loading {
            constants::GENERATING_LABEL
        } else {
            constants::GENERATE_LABEL
        };
        let button = Button::new(RichText::new(label).size(16.0)).min_size(egui::vec2(220.0, 36.0));
        if ui.add_enabled(!wizard.is_loading, button).clicked() {
            msgs.push(Msg::GenerateClicked);
        }
        if wizard.is_loading {
            ui.add_space(8.0);
            ui.spinner();
        }
    });
}

fn draw_wizard_nav(ui: &mut egui::Ui, wizard: &WizardView, msgs: &mut Vec<Msg>) {
    let at_confirm = wizard.step_index + 1 == wizard.step_count;
    ui.horizontal(|ui| {
        let back = Button::new("Previous").min_size(egui::vec2(96.0, 32.0));
        if ui
            .add_enabled(wizard.step_index > 0 && !wizard.is_loading, back)
            .clicked()
        {
            msgs.push(Msg::BackClicked);
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if !at_confirm {
                let next = Button::new("Next").min_size(egui::vec2(96.0, 32.0));
                if ui.add_enabled(!wizard.is_loading, next).clicked() {
                    msgs.push(Msg::NextClicked);
                }
            }
        });
    });
}

fn draw_results(
    ui: &mut egui::Ui,
    results: &ResultsView,
    textures: &TextureCache,
    zoom: &mut f32,
    msgs: &mut Vec<Msg>,
) {
    ui.horizontal(|ui| {
        if ui.button("Back").clicked() {
            msgs.push(Msg::BackToWizard);
        }
    });
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        draw_diagram_panel(&mut columns[0], results, textures, zoom, msgs);
        draw_text_panel(&mut columns[1], results, msgs);
    });
}

fn draw_diagram_panel(
    ui: &mut egui::Ui,
    results: &ResultsView,
    textures: &TextureCache,
    zoom: &mut f32,
    msgs: &mut Vec<Msg>,
) {
    ui.label(RichText::new(constants::RESULTS_TITLE).strong().size(16.0));
    ui.add_space(8.0);

    let count = results.image_urls.len();
    if count == 0 {
        ui.label("No diagram images were returned.");
        return;
    }

    ScrollArea::both()
        .id_salt("diagram_scroll")
        .max_height(constants::DIAGRAM_PANEL_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| match textures.slot(results.carousel_index) {
            Some(TextureSlot::Ready(texture)) => {
                let size = texture.size_vec2() * *zoom;
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
            Some(TextureSlot::Failed) => {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(constants::PLACEHOLDER_TEXT).weak())
                });
            }
            _ => {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| ui.add(egui::Spinner::new().size(28.0)));
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(count > 1, Button::new("<")).clicked() {
            msgs.push(Msg::CarouselPrev);
        }
        ui.label(format!("{} / {}", results.carousel_index + 1, count));
        if ui.add_enabled(count > 1, Button::new(">")).clicked() {
            msgs.push(Msg::CarouselNext);
        }
        ui.separator();
        ui.add(Slider::new(zoom, constants::ZOOM_MIN..=constants::ZOOM_MAX).text("Zoom"));
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.menu_button("Export", |ui| {
            for (label, format) in constants::EXPORT_FORMATS {
                if ui.button(label).clicked() {
                    msgs.push(Msg::ExportRequested {
                        index: results.carousel_index,
                        format,
                    });
                    ui.close_kind(egui::UiKind::Menu);
                }
            }
        });
        ui.menu_button("Export All", |ui| {
            for (label, format) in constants::EXPORT_FORMATS {
                if ui.button(label).clicked() {
                    msgs.push(Msg::ExportAllRequested { format });
                    ui.close_kind(egui::UiKind::Menu);
                }
            }
        });
        if ui.button("Fullscreen").clicked() {
            msgs.push(Msg::FullscreenOpened);
        }
    });
}

fn draw_text_panel(ui: &mut egui::Ui, results: &ResultsView, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        let title = if results.show_code {
            constants::CODE_TITLE
        } else {
            constants::DESCRIPTION_TITLE
        };
        ui.label(RichText::new(title).strong().size(16.0));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let toggle = if results.show_code {
                "Show Description"
            } else {
                "Show Code"
            };
            if ui.button(toggle).clicked() {
                msgs.push(Msg::CodeViewToggled);
            }
            if results.show_code && results.editor.is_none() && ui.button("Edit").clicked() {
                msgs.push(Msg::EditStarted);
            }
        });
    });
    ui.add_space(8.0);

    match &results.editor {
        Some(buffer) if results.show_code => draw_code_editor(ui, buffer, results, msgs),
        _ => {
            ScrollArea::vertical()
                .id_salt("text_body")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if results.show_code {
                        ui.monospace(results.diagram_code.trim());
                    } else {
                        ui.label(&results.architectural_description);
                    }
                });
        }
    }
}

fn draw_code_editor(
    ui: &mut egui::Ui,
    buffer: &str,
    results: &ResultsView,
    msgs: &mut Vec<Msg>,
) {
    let mut text = buffer.to_string();
    let response = ui.add(
        TextEdit::multiline(&mut text)
            .code_editor()
            .desired_rows(18)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        msgs.push(Msg::EditChanged(text));
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let regenerate = Button::new(if results.is_regenerating {
            "Regenerating..."
        } else {
            "Regenerate"
        });
        if ui
            .add_enabled(!results.is_regenerating, regenerate)
            .clicked()
        {
            msgs.push(Msg::EditSubmitted);
        }
        if ui
            .add_enabled(!results.is_regenerating, Button::new("Cancel"))
            .clicked()
        {
            msgs.push(Msg::EditCancelled);
        }
        if results.is_regenerating {
            ui.spinner();
        }
    });
}
