use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persist::{ensure_output_dir, AtomicFileWriter};

const PREFERENCES_FILENAME: &str = "preferences.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreferences {
    pub cloud_provider: String,
    pub industry: String,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        Self {
            cloud_provider: "aws".to_string(),
            industry: "all".to_string(),
        }
    }
}

/// On-disk preference store. Loads leniently (any read or parse problem
/// falls back to defaults with a warning) and saves atomically.
#[derive(Debug)]
pub struct PreferenceStore {
    dir: PathBuf,
    current: StoredPreferences,
}

impl PreferenceStore {
    pub fn open(dir: PathBuf) -> Self {
        let current = load_preferences(&dir);
        Self { dir, current }
    }

    pub fn current(&self) -> &StoredPreferences {
        &self.current
    }

    pub fn save(&mut self, preferences: StoredPreferences) {
        if self.current == preferences {
            return;
        }
        self.current = preferences;
        write_preferences(&self.dir, &self.current);
    }
}

fn load_preferences(dir: &Path) -> StoredPreferences {
    let path = dir.join(PREFERENCES_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return StoredPreferences::default();
        }
        Err(err) => {
            log::warn!("Failed to read preferences from {:?}: {}", path, err);
            return StoredPreferences::default();
        }
    };

    match ron::from_str(&content) {
        Ok(preferences) => {
            log::info!("Loaded preferences from {:?}", path);
            preferences
        }
        Err(err) => {
            log::warn!("Failed to parse preferences from {:?}: {}", path, err);
            StoredPreferences::default()
        }
    }
}

fn write_preferences(dir: &Path, preferences: &StoredPreferences) {
    if let Err(err) = ensure_output_dir(dir) {
        log::error!("Failed to ensure preference dir {:?}: {}", dir, err);
        return;
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(preferences, pretty) {
        Ok(text) => text,
        Err(err) => {
            log::error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(PREFERENCES_FILENAME, content.as_bytes()) {
        log::error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Preferences live under the platform config directory, e.g.
/// `~/.config/drafter` on Linux.
pub fn default_store_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drafter")
}
