use std::path::{Path, PathBuf};

use lopdf::Document;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a PDF document")]
    NotAPdf,
    #[error("could not parse PDF: {0}")]
    Parse(String),
    #[error("no extractable text")]
    NoText,
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Reads a PDF from disk and returns its whitespace-normalized text. Pages
/// are concatenated in page order with a single space between them.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let bytes = std::fs::read(path)?;
    extract_text_from_bytes(&bytes)
}

pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotAPdf);
    }
    let document = Document::load_mem(bytes).map_err(|err| PdfError::Parse(err.to_string()))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|err| PdfError::Parse(err.to_string()))?;
        pages.push(text);
    }

    let normalized = pages
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if normalized.is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(normalized)
}

/// Extraction walks every content stream, so it runs on the blocking pool
/// rather than stalling the async executor.
pub async fn extract_text_blocking(path: PathBuf) -> Result<String, PdfError> {
    match tokio::task::spawn_blocking(move || extract_text(&path)).await {
        Ok(result) => result,
        Err(err) => Err(PdfError::Task(err.to_string())),
    }
}
