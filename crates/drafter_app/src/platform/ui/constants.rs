use drafter_core::ExportFormat;
use egui::Color32;

pub const WIZARD_TITLE: &str = "Generate Your Cloud Architecture Diagram";
pub const PROVIDER_LABEL: &str = "Cloud Service Provider";
pub const PROVIDER_PLACEHOLDER: &str = "Select a cloud provider";
pub const INDUSTRY_LABEL: &str = "Industry";
pub const DESCRIPTION_LABEL: &str = "Project Description";
pub const DESCRIPTION_PLACEHOLDER: &str = "Describe your project architecture here...";
pub const UPLOAD_BUTTON: &str = "Upload Project Description (PDF)";
pub const CONFIRM_TITLE: &str = "Ready to generate";
pub const CONFIRM_BODY: &str =
    "Review your inputs and click the button below to generate your cloud architecture diagram.";
pub const GENERATE_LABEL: &str = "Generate Diagram";
pub const GENERATING_LABEL: &str = "Generating...";

pub const RESULTS_TITLE: &str = "Generated Cloud Architecture Diagram";
pub const DESCRIPTION_TITLE: &str = "Architectural Description";
pub const CODE_TITLE: &str = "Generated Diagram Code";
pub const PLACEHOLDER_TEXT: &str = "Preview unavailable for this image format";

/// Picker ids and their display labels.
pub const CLOUD_PROVIDERS: [(&str, &str); 3] = [
    ("aws", "Amazon Web Services (AWS)"),
    ("azure", "Microsoft Azure"),
    ("gcp", "Google Cloud Platform (GCP)"),
];

pub const INDUSTRIES: [(&str, &str); 6] = [
    ("all", "All Industries"),
    ("finance", "Finance"),
    ("healthcare", "Healthcare"),
    ("retail", "Retail"),
    ("manufacturing", "Manufacturing"),
    ("technology", "Technology"),
];

pub const EXPORT_FORMATS: [(&str, ExportFormat); 3] = [
    ("PNG", ExportFormat::Png),
    ("JPG", ExportFormat::Jpg),
    ("SVG", ExportFormat::Svg),
];

pub const CONTENT_MAX_WIDTH: f32 = 720.0;
pub const DIAGRAM_PANEL_HEIGHT: f32 = 420.0;

pub const DEFAULT_ZOOM: f32 = 1.0;
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 2.0;

pub const NOTICE_INFO_ACCENT: Color32 = Color32::from_rgb(0x2e, 0x7d, 0x32);
pub const NOTICE_ERROR_ACCENT: Color32 = Color32::from_rgb(0xc6, 0x28, 0x28);
pub const NOTICE_FILL: Color32 = Color32::from_rgb(0x20, 0x20, 0x24);

pub fn provider_label(id: &str) -> Option<&'static str> {
    CLOUD_PROVIDERS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
}

pub fn industry_label(id: &str) -> Option<&'static str> {
    INDUSTRIES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
}
