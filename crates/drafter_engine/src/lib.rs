//! Drafter engine: backend access, downloads, and file IO.
mod client;
mod engine;
mod export;
mod fetch;
mod pdf;
mod persist;
mod prefs;
mod types;

pub use client::{ClientSettings, DiagramApi, HttpDiagramApi, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use export::{
    default_export_dir, export_all, export_image, ExportError, ExportSummary, EXPORT_BASENAME,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pdf::{extract_text, extract_text_from_bytes, PdfError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use prefs::{default_store_dir, PreferenceStore, StoredPreferences};
pub use types::{
    ClientError, DiagramBundle, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput,
};
