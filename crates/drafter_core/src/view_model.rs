use crate::NoticeKind;

/// Everything the UI layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: ScreenView,
    pub industry: String,
    pub notice: Option<NoticeView>,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Wizard(WizardView),
    Results(ResultsView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub step_index: usize,
    pub step_count: usize,
    pub cloud_provider: String,
    pub project_description: String,
    pub pdf_file_name: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub image_urls: Vec<String>,
    pub architectural_description: String,
    pub diagram_code: String,
    pub carousel_index: usize,
    pub fullscreen_index: Option<usize>,
    pub show_code: bool,
    pub editor: Option<String>,
    pub is_regenerating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}
