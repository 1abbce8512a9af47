use std::path::Path;

use drafter_core::{Effect, GenerationOutcome, Msg, Preferences};
use drafter_engine::{
    DiagramBundle, EngineEvent, EngineHandle, ExportSummary as EngineExportSummary,
    PdfError, PreferenceStore, StoredPreferences,
};

/// Executes effects produced by the state machine. Engine work is queued on
/// the worker thread; preference writes happen right here on the UI thread.
pub struct EffectRunner {
    engine: EngineHandle,
    store: PreferenceStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: PreferenceStore) -> Self {
        Self { engine, store }
    }

    /// Preferences as loaded from disk, fed into the state machine once at
    /// startup.
    pub fn startup_preferences(&self) -> Preferences {
        let stored = self.store.current();
        Preferences {
            cloud_provider: stored.cloud_provider.clone(),
            industry: stored.industry.clone(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitGeneration {
                    cloud_provider,
                    project_description,
                } => {
                    self.engine.generate(cloud_provider, project_description);
                }
                Effect::SubmitCodeExecution {
                    diagram_code,
                    architectural_description,
                } => {
                    self.engine
                        .execute_code(diagram_code, architectural_description);
                }
                Effect::ExtractPdfText { path } => {
                    log::info!("Extracting text from {:?}", path);
                    self.engine.extract_pdf(path);
                }
                Effect::FetchImage { index, url } => {
                    self.engine.fetch_image(index, url);
                }
                Effect::ExportImage { url, format } => {
                    log::info!("Exporting one diagram as {}", format.extension());
                    self.engine.export(url, format.extension());
                }
                Effect::ExportAll { urls, format } => {
                    log::info!(
                        "Exporting {} diagrams as {}",
                        urls.len(),
                        format.extension()
                    );
                    self.engine.export_all(urls, format.extension());
                }
                Effect::SavePreferences(preferences) => {
                    self.store.save(StoredPreferences {
                        cloud_provider: preferences.cloud_provider,
                        industry: preferences.industry,
                    });
                }
            }
        }
    }

    pub fn poll(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

pub(super) fn bundle_to_outcome(bundle: DiagramBundle) -> GenerationOutcome {
    GenerationOutcome {
        image_urls: bundle.image_urls,
        architectural_description: bundle.architectural_description,
        diagram_code: bundle.diagram_code,
    }
}

pub(super) fn pdf_result_to_msg(path: &Path, result: Result<String, PdfError>) -> Msg {
    match result {
        Ok(text) => Msg::PdfExtracted {
            file_name: file_name_of(path),
            text,
        },
        Err(err) => Msg::PdfExtractionFailed {
            reason: err.to_string(),
        },
    }
}

pub(super) fn export_result_to_msg(
    result: Result<EngineExportSummary, drafter_engine::ExportError>,
) -> Msg {
    Msg::ExportFinished(
        result
            .map(|summary| drafter_core::ExportSummary {
                files_written: summary.files_written,
                directory: summary.directory.display().to_string(),
            })
            .map_err(|err| err.to_string()),
    )
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
