use std::path::{Path, PathBuf};

use crate::fetch::Fetcher;
use crate::persist::{AtomicFileWriter, PersistError};

pub const EXPORT_BASENAME: &str = "architecture-diagram";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files_written: usize,
    pub directory: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not download {url}: {reason}")]
    Download { url: String, reason: String },
    #[error("could not write {filename}: {source}")]
    Write {
        filename: String,
        source: PersistError,
    },
}

/// Saves one diagram under `architecture-diagram.{ext}`. The extension is a
/// label chosen by the user; the downloaded bytes are written verbatim.
pub async fn export_image(
    fetcher: &dyn Fetcher,
    dir: &Path,
    url: &str,
    extension: &str,
) -> Result<ExportSummary, ExportError> {
    let filename = format!("{EXPORT_BASENAME}.{extension}");
    write_one(fetcher, dir, url, &filename).await?;
    Ok(ExportSummary {
        files_written: 1,
        directory: dir.to_path_buf(),
    })
}

/// Saves every diagram as `architecture-diagram-{n}.{ext}`, numbered from 1
/// in carousel order. Downloads run one at a time; the first failure stops
/// the run and reports which URL broke it.
pub async fn export_all(
    fetcher: &dyn Fetcher,
    dir: &Path,
    urls: &[String],
    extension: &str,
) -> Result<ExportSummary, ExportError> {
    for (position, url) in urls.iter().enumerate() {
        let filename = format!("{EXPORT_BASENAME}-{}.{extension}", position + 1);
        write_one(fetcher, dir, url, &filename).await?;
    }
    Ok(ExportSummary {
        files_written: urls.len(),
        directory: dir.to_path_buf(),
    })
}

async fn write_one(
    fetcher: &dyn Fetcher,
    dir: &Path,
    url: &str,
    filename: &str,
) -> Result<(), ExportError> {
    let output = fetcher
        .fetch(url)
        .await
        .map_err(|err| ExportError::Download {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer
        .write(filename, &output.bytes)
        .map_err(|source| ExportError::Write {
            filename: filename.to_string(),
            source,
        })?;
    Ok(())
}

/// Exports land in a dedicated folder under the user's download directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drafter-exports")
}
