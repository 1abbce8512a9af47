use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {}: {detail}", .path.display())]
    OutputDir { path: PathBuf, detail: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PersistError {
    fn output_dir(path: &Path, detail: impl Into<String>) -> Self {
        Self::OutputDir {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }
}

/// Creates `dir` if missing and confirms a file can be created inside it.
/// Export and the preference store both call this before writing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(PersistError::output_dir(dir, "path is not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir)
                .map_err(|err| PersistError::output_dir(dir, err.to_string()))?;
        }
        Err(err) => return Err(PersistError::output_dir(dir, err.to_string())),
    }
    // Writability probe; the unnamed temp file is gone once dropped.
    tempfile::tempfile_in(dir).map_err(|err| PersistError::output_dir(dir, err.to_string()))?;
    Ok(())
}

/// Writes files into one fixed directory, each through a temp file that is
/// fsynced and renamed into place. A crashed write leaves no partial file.
///
/// Exports and the preference store reuse fixed names, so `write` replaces
/// any existing file deterministically.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        staged.as_file_mut().sync_all()?;

        let destination = self.dir.join(filename);
        // Renaming over an existing file fails on some platforms.
        if destination.exists() {
            fs::remove_file(&destination)?;
        }
        staged
            .persist(&destination)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(destination)
    }
}
