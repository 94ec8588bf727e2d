//! Local preference persistence
//!
//! A single JSON file under the user config directory holding the flags
//! that survive restarts. Read once at startup, written on every change;
//! an unreadable file falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tick_core::{Error, Result};

const PREFS_DIR: &str = "tick";
const PREFS_FILE: &str = "preferences.json";

/// Persisted user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Dark theme flag
    pub dark_mode: bool,
}

impl Preferences {
    /// Load preferences from the default location, falling back to defaults
    #[must_use]
    pub fn load() -> Self {
        match default_path() {
            Ok(path) => Self::load_from(&path),
            Err(error) => {
                tracing::warn!("No config directory available: {}", error);
                Self::default()
            }
        }
    }

    /// Write preferences to the default location
    pub fn save(self) -> Result<()> {
        self.save_to(&default_path()?)
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::warn!("Ignoring malformed preferences file: {}", error);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn save_to(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| Error::Storage(error.to_string()))?;
        }
        let serialized = serde_json::to_string_pretty(&self)?;
        fs::write(path, serialized).map_err(|error| Error::Storage(error.to_string()))
    }
}

fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| Error::Storage("no user config directory".to_string()))?;
    Ok(config_dir.join(PREFS_DIR).join(PREFS_FILE))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let prefs = Preferences { dark_mode: true };
        prefs.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path), prefs);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }
}
