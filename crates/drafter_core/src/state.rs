use crate::view_model::{AppViewModel, NoticeView, ResultsView, ScreenView, WizardView};

/// Persisted user preferences. The stored copy is loaded once at startup;
/// afterwards this in-memory value is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub cloud_provider: String,
    pub industry: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cloud_provider: "aws".to_string(),
            industry: "all".to_string(),
        }
    }
}

/// The three wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Provider,
    Description,
    Confirm,
}

impl Step {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Step::Provider => 0,
            Step::Description => 1,
            Step::Confirm => 2,
        }
    }

    /// Next step, clamped at the confirm step.
    pub(crate) fn forward(self) -> Step {
        match self {
            Step::Provider => Step::Description,
            Step::Description | Step::Confirm => Step::Confirm,
        }
    }

    /// Previous step, clamped at the provider step.
    pub(crate) fn back(self) -> Step {
        match self {
            Step::Provider | Step::Description => Step::Provider,
            Step::Confirm => Step::Description,
        }
    }
}

/// A successfully extracted PDF upload. `text` is never empty; an empty
/// extraction is reported as a failure instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfAttachment {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub(crate) step: Step,
    pub(crate) cloud_provider: String,
    pub(crate) project_description: String,
    pub(crate) pdf: Option<PdfAttachment>,
    pub(crate) is_loading: bool,
}

impl WizardState {
    /// The text submitted to the generation endpoint: extracted PDF text
    /// when an attachment is present, otherwise the typed description.
    pub(crate) fn effective_description(&self) -> &str {
        match &self.pdf {
            Some(attachment) => &attachment.text,
            None => &self.project_description,
        }
    }
}

/// The three-field result returned by the generation endpoints. Always
/// replaced wholesale, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationOutcome {
    pub image_urls: Vec<String>,
    pub architectural_description: String,
    pub diagram_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenState {
    pub(crate) index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    pub(crate) outcome: GenerationOutcome,
    pub(crate) carousel_index: usize,
    pub(crate) fullscreen: Option<FullscreenState>,
    pub(crate) show_code: bool,
    pub(crate) editor: Option<String>,
    pub(crate) is_regenerating: bool,
}

impl ResultState {
    pub(crate) fn new(outcome: GenerationOutcome) -> Self {
        Self {
            outcome,
            carousel_index: 0,
            fullscreen: None,
            show_code: false,
            editor: None,
            is_regenerating: false,
        }
    }

    pub(crate) fn image_count(&self) -> usize {
        self.outcome.image_urls.len()
    }

    /// Applies a regenerated outcome: all three fields are replaced at
    /// once, indices rewind to the first image and the editor closes.
    pub(crate) fn install_outcome(&mut self, outcome: GenerationOutcome) {
        self.outcome = outcome;
        self.carousel_index = 0;
        if let Some(fullscreen) = &mut self.fullscreen {
            fullscreen.index = 0;
        }
        self.editor = None;
        self.is_regenerating = false;
    }
}

/// Export file formats offered for a generated diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpg,
    Svg,
}

impl ExportFormat {
    /// File extension written to disk. Export relabels, it never
    /// re-encodes: the fetched bytes are saved as-is under this extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Outcome of a completed export, reported back for the user notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files_written: usize,
    pub directory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient notification. Carries a serial id so that an expiry timer
/// armed for an older notice cannot clear a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub(crate) id: u64,
    pub(crate) kind: NoticeKind,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Wizard(WizardState),
    Results(ResultState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) preferences: Preferences,
    pub(crate) notice: Option<Notice>,
    pub(crate) alert: Option<String>,
    pub(crate) notice_serial: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Wizard(WizardState::default()),
            preferences: Preferences::default(),
            notice: None,
            alert: None,
            notice_serial: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match &self.screen {
            Screen::Wizard(wizard) => ScreenView::Wizard(WizardView {
                step_index: wizard.step.index(),
                step_count: Step::COUNT,
                cloud_provider: wizard.cloud_provider.clone(),
                project_description: wizard.project_description.clone(),
                pdf_file_name: wizard.pdf.as_ref().map(|pdf| pdf.file_name.clone()),
                is_loading: wizard.is_loading,
            }),
            Screen::Results(results) => ScreenView::Results(ResultsView {
                image_urls: results.outcome.image_urls.clone(),
                architectural_description: results.outcome.architectural_description.clone(),
                diagram_code: results.outcome.diagram_code.clone(),
                carousel_index: results.carousel_index,
                fullscreen_index: results.fullscreen.map(|fullscreen| fullscreen.index),
                show_code: results.show_code,
                editor: results.editor.clone(),
                is_regenerating: results.is_regenerating,
            }),
        };

        AppViewModel {
            screen,
            industry: self.preferences.industry.clone(),
            notice: self.notice.as_ref().map(|notice| NoticeView {
                id: notice.id,
                kind: notice.kind,
                text: notice.text.clone(),
            }),
            alert: self.alert.clone(),
        }
    }

    pub(crate) fn wizard_mut(&mut self) -> Option<&mut WizardState> {
        match &mut self.screen {
            Screen::Wizard(wizard) => Some(wizard),
            Screen::Results(_) => None,
        }
    }

    pub(crate) fn results_mut(&mut self) -> Option<&mut ResultState> {
        match &mut self.screen {
            Screen::Wizard(_) => None,
            Screen::Results(results) => Some(results),
        }
    }

    pub(crate) fn push_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice_serial += 1;
        self.notice = Some(Notice {
            id: self.notice_serial,
            kind,
            text: text.into(),
        });
    }

    pub(crate) fn raise_alert(&mut self, text: impl Into<String>) {
        self.alert = Some(text.into());
    }
}
