use std::path::PathBuf;

use crate::{ExportFormat, Preferences};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitGeneration {
        cloud_provider: String,
        project_description: String,
    },
    SubmitCodeExecution {
        diagram_code: String,
        architectural_description: String,
    },
    ExtractPdfText {
        path: PathBuf,
    },
    FetchImage {
        index: usize,
        url: String,
    },
    ExportImage {
        url: String,
        format: ExportFormat,
    },
    ExportAll {
        urls: Vec<String>,
        format: ExportFormat,
    },
    SavePreferences(Preferences),
}
