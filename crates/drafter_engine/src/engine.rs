use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use crate::client::{ClientSettings, DiagramApi, HttpDiagramApi};
use crate::export;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{pdf, EngineEvent};

enum EngineCommand {
    Generate {
        cloud_provider: String,
        project_description: String,
    },
    ExecuteCode {
        diagram_code: String,
        architectural_description: String,
    },
    ExtractPdf {
        path: PathBuf,
    },
    FetchImage {
        index: usize,
        url: String,
    },
    Export {
        url: String,
        extension: String,
    },
    ExportAll {
        urls: Vec<String>,
        extension: String,
    },
}

struct EngineShared {
    api: Box<dyn DiagramApi>,
    fetcher: Box<dyn Fetcher>,
    export_dir: PathBuf,
}

/// Owns the worker thread and its tokio runtime. The UI thread sends
/// commands and polls completions; neither side ever blocks on the other.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: ClientSettings, fetch: FetchSettings, export_dir: PathBuf) -> Self {
        Self::with_backend(
            Box::new(HttpDiagramApi::new(client)),
            Box::new(ReqwestFetcher::new(fetch)),
            export_dir,
        )
    }

    /// Wires an engine around explicit backends; tests use this to swap in
    /// canned implementations.
    pub fn with_backend(
        api: Box<dyn DiagramApi>,
        fetcher: Box<dyn Fetcher>,
        export_dir: PathBuf,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shared = Arc::new(EngineShared {
            api,
            fetcher,
            export_dir,
        });

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let shared = shared.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&shared, command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn generate(
        &self,
        cloud_provider: impl Into<String>,
        project_description: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            cloud_provider: cloud_provider.into(),
            project_description: project_description.into(),
        });
    }

    pub fn execute_code(
        &self,
        diagram_code: impl Into<String>,
        architectural_description: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::ExecuteCode {
            diagram_code: diagram_code.into(),
            architectural_description: architectural_description.into(),
        });
    }

    pub fn extract_pdf(&self, path: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::ExtractPdf { path });
    }

    pub fn fetch_image(&self, index: usize, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchImage {
            index,
            url: url.into(),
        });
    }

    pub fn export(&self, url: impl Into<String>, extension: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Export {
            url: url.into(),
            extension: extension.into(),
        });
    }

    pub fn export_all(&self, urls: Vec<String>, extension: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ExportAll {
            urls,
            extension: extension.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    shared: &EngineShared,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            cloud_provider,
            project_description,
        } => {
            log::info!(
                "Submitting generation request (provider {}, description {} chars)",
                cloud_provider,
                project_description.chars().count()
            );
            let result = shared
                .api
                .generate(&cloud_provider, &project_description)
                .await;
            let _ = event_tx.send(EngineEvent::GenerationFinished(result));
        }
        EngineCommand::ExecuteCode {
            diagram_code,
            architectural_description,
        } => {
            log::info!(
                "Submitting edited diagram code ({} chars)",
                diagram_code.chars().count()
            );
            let result = shared
                .api
                .execute_code(&diagram_code, &architectural_description)
                .await;
            let _ = event_tx.send(EngineEvent::CodeExecutionFinished(result));
        }
        EngineCommand::ExtractPdf { path } => {
            let result = pdf::extract_text_blocking(path.clone()).await;
            let _ = event_tx.send(EngineEvent::PdfExtracted { path, result });
        }
        EngineCommand::FetchImage { index, url } => {
            let result = shared.fetcher.fetch(&url).await;
            let _ = event_tx.send(EngineEvent::ImageFetched { index, result });
        }
        EngineCommand::Export { url, extension } => {
            let result = export::export_image(
                shared.fetcher.as_ref(),
                &shared.export_dir,
                &url,
                &extension,
            )
            .await;
            let _ = event_tx.send(EngineEvent::ExportCompleted(result));
        }
        EngineCommand::ExportAll { urls, extension } => {
            let result = export::export_all(
                shared.fetcher.as_ref(),
                &shared.export_dir,
                &urls,
                &extension,
            )
            .await;
            let _ = event_tx.send(EngineEvent::ExportCompleted(result));
        }
    }
}
