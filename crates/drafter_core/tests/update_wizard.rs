use std::path::PathBuf;
use std::sync::Once;

use drafter_core::{
    update, AppState, Effect, GenerationOutcome, Msg, NoticeKind, Preferences, ScreenView,
    WizardView,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(drafter_logging::initialize_for_tests);
}

fn wizard_view(state: &AppState) -> WizardView {
    match state.view().screen {
        ScreenView::Wizard(wizard) => wizard,
        ScreenView::Results(_) => panic!("expected the wizard screen"),
    }
}

/// Walks a fresh state to the description step with the given provider.
fn to_description_step(provider: &str) -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::ProviderSelected(provider.to_string()));
    let (state, _) = update(state, Msg::NextClicked);
    state
}

/// Walks a fresh state to the confirm step with a typed description.
fn to_confirm_step(provider: &str, description: &str) -> AppState {
    let state = to_description_step(provider);
    let (state, _) = update(state, Msg::DescriptionChanged(description.to_string()));
    let (state, _) = update(state, Msg::NextClicked);
    state
}

#[test]
fn next_without_provider_is_rejected() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state, Msg::NextClicked);

    assert!(effects.is_empty());
    assert_eq!(wizard_view(&next).step_index, 0);
    let notice = next.view().notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Please select a cloud provider");
}

#[test]
fn next_with_provider_advances() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::ProviderSelected("azure".to_string()));
    assert_eq!(
        effects,
        vec![Effect::SavePreferences(Preferences {
            cloud_provider: "azure".to_string(),
            industry: "all".to_string(),
        })]
    );

    let (state, effects) = update(state, Msg::NextClicked);
    assert!(effects.is_empty());
    assert_eq!(wizard_view(&state).step_index, 1);
    assert!(state.view().notice.is_none());
}

#[test]
fn next_without_description_is_rejected() {
    init_logging();
    let state = to_description_step("aws");

    let (state, effects) = update(state, Msg::NextClicked);

    assert!(effects.is_empty());
    assert_eq!(wizard_view(&state).step_index, 1);
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Please provide a project description");

    // Whitespace does not count as a description.
    let (state, _) = update(state, Msg::DescriptionChanged("   ".to_string()));
    let (state, _) = update(state, Msg::NextClicked);
    assert_eq!(wizard_view(&state).step_index, 1);
}

#[test]
fn description_and_pdf_attachment_are_mutually_exclusive() {
    init_logging();
    let state = to_description_step("aws");
    let (state, _) = update(state, Msg::DescriptionChanged("typed text".to_string()));

    // A successful extraction clears the typed description.
    let (state, _) = update(
        state,
        Msg::PdfExtracted {
            file_name: "project.pdf".to_string(),
            text: "extracted text".to_string(),
        },
    );
    let wizard = wizard_view(&state);
    assert_eq!(wizard.project_description, "");
    assert_eq!(wizard.pdf_file_name.as_deref(), Some("project.pdf"));

    // Typing again clears the attachment.
    let (state, _) = update(state, Msg::DescriptionChanged("t".to_string()));
    let wizard = wizard_view(&state);
    assert_eq!(wizard.pdf_file_name, None);
    assert_eq!(wizard.project_description, "t");
}

#[test]
fn pdf_picker_rejects_other_extensions() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::PdfFileChosen {
            path: PathBuf::from("notes.txt"),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().alert.as_deref(),
        Some("Please upload a valid PDF document.")
    );

    let (state, _) = update(state, Msg::AlertDismissed);
    assert!(state.view().alert.is_none());
}

#[test]
fn pdf_picker_requests_extraction() {
    init_logging();
    let state = AppState::new();

    // Extension matching is case-insensitive.
    let (state, effects) = update(
        state,
        Msg::PdfFileChosen {
            path: PathBuf::from("specs/Project.PDF"),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ExtractPdfText {
            path: PathBuf::from("specs/Project.PDF"),
        }]
    );
    assert!(state.view().alert.is_none());
}

#[test]
fn extraction_failure_raises_alert() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::PdfExtractionFailed {
            reason: "file is not a PDF".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().alert.as_deref(),
        Some("Failed to read PDF document: file is not a PDF")
    );
    assert_eq!(wizard_view(&state).pdf_file_name, None);
}

#[test]
fn pdf_text_satisfies_the_description_step() {
    init_logging();
    let state = to_description_step("gcp");
    let (state, _) = update(
        state,
        Msg::PdfExtracted {
            file_name: "brief.pdf".to_string(),
            text: "A content pipeline".to_string(),
        },
    );

    let (state, _) = update(state, Msg::NextClicked);

    assert_eq!(wizard_view(&state).step_index, 2);
}

#[test]
fn generate_submits_the_typed_description() {
    init_logging();
    let state = to_confirm_step("gcp", "A web app with a database");

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitGeneration {
            cloud_provider: "gcp".to_string(),
            project_description: "A web app with a database".to_string(),
        }]
    );
    assert!(wizard_view(&state).is_loading);

    // A second click while the request is in flight does nothing.
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert!(wizard_view(&state).is_loading);
}

#[test]
fn generate_prefers_extracted_pdf_text() {
    init_logging();
    let state = to_description_step("aws");
    let (state, _) = update(
        state,
        Msg::PdfExtracted {
            file_name: "brief.pdf".to_string(),
            text: "A batch analytics platform".to_string(),
        },
    );
    let (state, _) = update(state, Msg::NextClicked);

    let (_state, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitGeneration {
            cloud_provider: "aws".to_string(),
            project_description: "A batch analytics platform".to_string(),
        }]
    );
}

#[test]
fn generation_success_moves_to_results() {
    init_logging();
    let state = to_confirm_step("gcp", "A web app with a database");
    let (state, _) = update(state, Msg::GenerateClicked);

    let outcome = GenerationOutcome {
        image_urls: vec!["a.png".to_string()],
        architectural_description: "A three tier web application".to_string(),
        diagram_code: "with Diagram(\"web\"):".to_string(),
    };
    let (state, effects) = update(state, Msg::GenerationFinished(Ok(outcome)));

    assert_eq!(
        effects,
        vec![Effect::FetchImage {
            index: 0,
            url: "a.png".to_string(),
        }]
    );
    let view = state.view();
    let results = match view.screen {
        ScreenView::Results(results) => results,
        ScreenView::Wizard(_) => panic!("expected the results screen"),
    };
    assert_eq!(results.image_urls, vec!["a.png".to_string()]);
    assert_eq!(
        results.architectural_description,
        "A three tier web application"
    );
    assert_eq!(results.carousel_index, 0);
    let notice = view.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.text, "Diagram generated successfully");
}

#[test]
fn generation_failure_stays_on_the_wizard() {
    init_logging();
    let state = to_confirm_step("aws", "An api");
    let (state, _) = update(state, Msg::GenerateClicked);

    let (state, effects) = update(state, Msg::GenerationFinished(Err("LLM timeout".to_string())));

    assert!(effects.is_empty());
    let wizard = wizard_view(&state);
    assert_eq!(wizard.step_index, 2);
    assert!(!wizard.is_loading);
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "LLM timeout");
}

#[test]
fn back_is_clamped_at_the_first_step() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::BackClicked);

    assert!(effects.is_empty());
    assert_eq!(wizard_view(&state).step_index, 0);

    let state = to_confirm_step("aws", "An api");
    let (state, _) = update(state, Msg::BackClicked);
    assert_eq!(wizard_view(&state).step_index, 1);
}

#[test]
fn industry_selection_saves_the_preference() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::IndustrySelected("finance".to_string()));

    assert_eq!(state.view().industry, "finance");
    assert_eq!(
        effects,
        vec![Effect::SavePreferences(Preferences {
            cloud_provider: "aws".to_string(),
            industry: "finance".to_string(),
        })]
    );
}

#[test]
fn loaded_preferences_do_not_touch_wizard_fields() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::PreferencesLoaded(Preferences {
            cloud_provider: "azure".to_string(),
            industry: "healthcare".to_string(),
        }),
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().industry, "healthcare");
    assert_eq!(wizard_view(&state).cloud_provider, "");
}

#[test]
fn notice_expiry_only_clears_the_matching_notice() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::NextClicked);
    let first = state.view().notice.unwrap();

    // A timer armed for some other notice leaves this one alone.
    let (state, _) = update(state, Msg::NoticeExpired { id: first.id + 1 });
    assert!(state.view().notice.is_some());

    // A newer notice survives the old notice's timer.
    let (state, _) = update(state, Msg::NextClicked);
    let second = state.view().notice.unwrap();
    assert_ne!(first.id, second.id);
    let (state, _) = update(state, Msg::NoticeExpired { id: first.id });
    assert_eq!(state.view().notice.unwrap().id, second.id);

    let (state, _) = update(state, Msg::NoticeExpired { id: second.id });
    assert!(state.view().notice.is_none());
}
