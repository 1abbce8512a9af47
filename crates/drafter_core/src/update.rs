use std::path::Path;

use crate::state::{FullscreenState, NoticeKind, PdfAttachment, ResultState, Screen, WizardState};
use crate::{AppState, Effect, Msg, Step};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProviderSelected(provider) => {
            let Some(wizard) = state.wizard_mut() else {
                return (state, Vec::new());
            };
            wizard.cloud_provider = provider.clone();
            state.preferences.cloud_provider = provider;
            vec![Effect::SavePreferences(state.preferences.clone())]
        }
        Msg::IndustrySelected(industry) => {
            state.preferences.industry = industry;
            vec![Effect::SavePreferences(state.preferences.clone())]
        }
        Msg::DescriptionChanged(text) => {
            if let Some(wizard) = state.wizard_mut() {
                // Typing and uploading are mutually exclusive inputs.
                if !text.is_empty() {
                    wizard.pdf = None;
                }
                wizard.project_description = text;
            }
            Vec::new()
        }
        Msg::PdfFileChosen { path } => {
            if state.wizard_mut().is_none() {
                return (state, Vec::new());
            }
            if has_pdf_extension(&path) {
                vec![Effect::ExtractPdfText { path }]
            } else {
                state.raise_alert("Please upload a valid PDF document.");
                Vec::new()
            }
        }
        Msg::PdfExtracted { file_name, text } => {
            if let Some(wizard) = state.wizard_mut() {
                wizard.pdf = Some(PdfAttachment { file_name, text });
                wizard.project_description.clear();
            }
            Vec::new()
        }
        Msg::PdfExtractionFailed { reason } => {
            if state.wizard_mut().is_none() {
                return (state, Vec::new());
            }
            state.raise_alert(format!("Failed to read PDF document: {reason}"));
            Vec::new()
        }
        Msg::NextClicked => {
            let Some(wizard) = state.wizard_mut() else {
                return (state, Vec::new());
            };
            if wizard.is_loading {
                return (state, Vec::new());
            }
            let rejection = match wizard.step {
                Step::Provider if wizard.cloud_provider.is_empty() => {
                    Some("Please select a cloud provider")
                }
                Step::Description if wizard.effective_description().trim().is_empty() => {
                    Some("Please provide a project description")
                }
                Step::Provider | Step::Description | Step::Confirm => None,
            };
            match rejection {
                Some(text) => state.push_notice(NoticeKind::Error, text),
                None => {
                    if let Some(wizard) = state.wizard_mut() {
                        wizard.step = wizard.step.forward();
                    }
                }
            }
            Vec::new()
        }
        Msg::BackClicked => {
            if let Some(wizard) = state.wizard_mut() {
                if !wizard.is_loading {
                    wizard.step = wizard.step.back();
                }
            }
            Vec::new()
        }
        Msg::GenerateClicked => {
            let Some(wizard) = state.wizard_mut() else {
                return (state, Vec::new());
            };
            if wizard.step != Step::Confirm || wizard.is_loading {
                return (state, Vec::new());
            }
            wizard.is_loading = true;
            vec![Effect::SubmitGeneration {
                cloud_provider: wizard.cloud_provider.clone(),
                project_description: wizard.effective_description().to_string(),
            }]
        }
        Msg::GenerationFinished(result) => {
            // A completion that raced leaving the wizard is dropped.
            let Some(wizard) = state.wizard_mut() else {
                return (state, Vec::new());
            };
            wizard.is_loading = false;
            match result {
                Ok(outcome) => {
                    let effects = fetch_effects(&outcome.image_urls);
                    state.screen = Screen::Results(ResultState::new(outcome));
                    state.push_notice(NoticeKind::Info, "Diagram generated successfully");
                    effects
                }
                Err(message) => {
                    state.push_notice(NoticeKind::Error, message);
                    Vec::new()
                }
            }
        }
        Msg::CarouselNext => {
            if let Some(results) = state.results_mut() {
                let len = results.image_count();
                if len > 0 {
                    results.carousel_index = wrap_next(results.carousel_index, len);
                }
            }
            Vec::new()
        }
        Msg::CarouselPrev => {
            if let Some(results) = state.results_mut() {
                let len = results.image_count();
                if len > 0 {
                    results.carousel_index = wrap_prev(results.carousel_index, len);
                }
            }
            Vec::new()
        }
        Msg::FullscreenOpened => {
            if let Some(results) = state.results_mut() {
                if results.image_count() > 0 {
                    results.fullscreen = Some(FullscreenState {
                        index: results.carousel_index,
                    });
                }
            }
            Vec::new()
        }
        Msg::FullscreenClosed => {
            if let Some(results) = state.results_mut() {
                results.fullscreen = None;
            }
            Vec::new()
        }
        // The slideshow timer and the manual forward arrow move the same index.
        Msg::FullscreenNext | Msg::SlideshowTick => {
            if let Some(results) = state.results_mut() {
                let len = results.image_count();
                if let Some(fullscreen) = &mut results.fullscreen {
                    if len > 0 {
                        fullscreen.index = wrap_next(fullscreen.index, len);
                    }
                }
            }
            Vec::new()
        }
        Msg::FullscreenPrev => {
            if let Some(results) = state.results_mut() {
                let len = results.image_count();
                if let Some(fullscreen) = &mut results.fullscreen {
                    if len > 0 {
                        fullscreen.index = wrap_prev(fullscreen.index, len);
                    }
                }
            }
            Vec::new()
        }
        Msg::CodeViewToggled => {
            if let Some(results) = state.results_mut() {
                results.show_code = !results.show_code;
            }
            Vec::new()
        }
        Msg::EditStarted => {
            if let Some(results) = state.results_mut() {
                results.editor = Some(results.outcome.diagram_code.clone());
            }
            Vec::new()
        }
        Msg::EditChanged(text) => {
            if let Some(results) = state.results_mut() {
                if let Some(editor) = &mut results.editor {
                    *editor = text;
                }
            }
            Vec::new()
        }
        Msg::EditCancelled => {
            if let Some(results) = state.results_mut() {
                results.editor = None;
            }
            Vec::new()
        }
        Msg::EditSubmitted => {
            let Some(results) = state.results_mut() else {
                return (state, Vec::new());
            };
            if results.is_regenerating {
                return (state, Vec::new());
            }
            let Some(code) = results.editor.clone() else {
                return (state, Vec::new());
            };
            results.is_regenerating = true;
            vec![Effect::SubmitCodeExecution {
                diagram_code: code,
                architectural_description: results.outcome.architectural_description.clone(),
            }]
        }
        Msg::RegenerationFinished(result) => {
            let Some(results) = state.results_mut() else {
                return (state, Vec::new());
            };
            match result {
                Ok(outcome) => {
                    let effects = fetch_effects(&outcome.image_urls);
                    results.install_outcome(outcome);
                    state.push_notice(NoticeKind::Info, "Diagram generated successfully");
                    effects
                }
                Err(message) => {
                    // The editor stays open so the user can fix the code.
                    results.is_regenerating = false;
                    state.push_notice(NoticeKind::Error, message);
                    Vec::new()
                }
            }
        }
        Msg::ExportRequested { index, format } => {
            let Some(results) = state.results_mut() else {
                return (state, Vec::new());
            };
            match results.outcome.image_urls.get(index) {
                Some(url) => vec![Effect::ExportImage {
                    url: url.clone(),
                    format,
                }],
                None => Vec::new(),
            }
        }
        Msg::ExportAllRequested { format } => {
            let Some(results) = state.results_mut() else {
                return (state, Vec::new());
            };
            if results.image_count() == 0 {
                Vec::new()
            } else {
                vec![Effect::ExportAll {
                    urls: results.outcome.image_urls.clone(),
                    format,
                }]
            }
        }
        Msg::ExportFinished(result) => {
            match result {
                Ok(summary) => {
                    let text = if summary.files_written == 1 {
                        format!("Exported 1 image to {}", summary.directory)
                    } else {
                        format!("Exported {} images to {}", summary.files_written, summary.directory)
                    };
                    state.push_notice(NoticeKind::Info, text);
                }
                Err(message) => state.push_notice(NoticeKind::Error, message),
            }
            Vec::new()
        }
        Msg::BackToWizard => {
            if state.results_mut().is_some() {
                state.screen = Screen::Wizard(WizardState::default());
            }
            Vec::new()
        }
        Msg::PreferencesLoaded(preferences) => {
            state.preferences = preferences;
            Vec::new()
        }
        Msg::NoticeExpired { id } => {
            if state.notice.as_ref().is_some_and(|notice| notice.id == id) {
                state.notice = None;
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.alert = None;
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_effects(urls: &[String]) -> Vec<Effect> {
    urls.iter()
        .enumerate()
        .map(|(index, url)| Effect::FetchImage {
            index,
            url: url.clone(),
        })
        .collect()
}

fn wrap_next(index: usize, len: usize) -> usize {
    (index + 1) % len
}

fn wrap_prev(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
