use drafter_core::{AppViewModel, Msg, NoticeKind, NoticeView, ResultsView, ScreenView};
use egui::{Align2, Button, Color32, Id, Rect, RichText, Sense, Stroke};

use crate::platform::textures::{TextureCache, TextureSlot};

use super::constants;

/// Layers drawn above the active screen: the fullscreen slideshow, the
/// transient notice and the blocking alert, in that stacking order.
pub fn draw(
    ctx: &egui::Context,
    view: &AppViewModel,
    textures: &TextureCache,
    msgs: &mut Vec<Msg>,
) {
    if let ScreenView::Results(results) = &view.screen {
        if let Some(index) = results.fullscreen_index {
            draw_fullscreen(ctx, results, index, textures, msgs);
        }
    }
    if let Some(notice) = &view.notice {
        draw_notice(ctx, notice);
    }
    if let Some(alert) = &view.alert {
        draw_alert(ctx, alert, msgs);
    }
}

fn draw_fullscreen(
    ctx: &egui::Context,
    results: &ResultsView,
    index: usize,
    textures: &TextureCache,
    msgs: &mut Vec<Msg>,
) {
    let screen = ctx.screen_rect();
    let count = results.image_urls.len();

    egui::Area::new(Id::new("fullscreen_overlay"))
        .fixed_pos(screen.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(230));
            // The backdrop swallows clicks so the screen underneath stays
            // inert; a click outside the controls closes the slideshow.
            let backdrop = ui.interact(screen, Id::new("fullscreen_backdrop"), Sense::click());

            let image_rect = Rect::from_center_size(screen.center(), screen.size() * 0.86);
            match textures.slot(index) {
                Some(TextureSlot::Ready(texture)) => {
                    ui.put(
                        image_rect,
                        egui::Image::new(texture).fit_to_exact_size(image_rect.size()),
                    );
                }
                Some(TextureSlot::Failed) => {
                    ui.put(
                        image_rect,
                        egui::Label::new(
                            RichText::new(constants::PLACEHOLDER_TEXT).color(Color32::WHITE),
                        ),
                    );
                }
                _ => {
                    ui.put(image_rect, egui::Spinner::new().size(36.0));
                }
            }

            let bar_y = screen.max.y - 36.0;
            let center_x = screen.center().x;
            let prev_rect =
                Rect::from_center_size(egui::pos2(center_x - 100.0, bar_y), egui::vec2(48.0, 30.0));
            let label_rect =
                Rect::from_center_size(egui::pos2(center_x, bar_y), egui::vec2(90.0, 30.0));
            let next_rect =
                Rect::from_center_size(egui::pos2(center_x + 100.0, bar_y), egui::vec2(48.0, 30.0));
            let close_rect = Rect::from_center_size(
                egui::pos2(screen.max.x - 50.0, screen.min.y + 28.0),
                egui::vec2(64.0, 30.0),
            );

            if ui.put(prev_rect, Button::new("<")).clicked() {
                msgs.push(Msg::FullscreenPrev);
            }
            ui.put(
                label_rect,
                egui::Label::new(
                    RichText::new(format!("{} / {}", index + 1, count)).color(Color32::WHITE),
                ),
            );
            if ui.put(next_rect, Button::new(">")).clicked() {
                msgs.push(Msg::FullscreenNext);
            }
            if ui.put(close_rect, Button::new("Close")).clicked() || backdrop.clicked() {
                msgs.push(Msg::FullscreenClosed);
            }
        });
}

fn draw_notice(ctx: &egui::Context, notice: &NoticeView) {
    let accent = match notice.kind {
        NoticeKind::Info => constants::NOTICE_INFO_ACCENT,
        NoticeKind::Error => constants::NOTICE_ERROR_ACCENT,
    };

    egui::Area::new(Id::new("notice_toast"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-20.0, 60.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(constants::NOTICE_FILL)
                .stroke(Stroke::new(1.0, accent))
                .corner_radius(6.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(RichText::new(&notice.text).color(Color32::WHITE));
                });
        });
}

fn draw_alert(ctx: &egui::Context, text: &str, msgs: &mut Vec<Msg>) {
    egui::Window::new("Drafter")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.label(text);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    msgs.push(Msg::AlertDismissed);
                }
            });
        });
}
