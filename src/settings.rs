use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SalonError};

pub const SNAPSHOT_FILE: &str = "salon.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_salon_name")]
    pub salon_name: String,
}

fn default_salon_name() -> String {
    "Salon".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            salon_name: default_salon_name(),
        }
    }
}

impl Settings {
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(SNAPSHOT_FILE)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("salon")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("salon")
}

pub fn load_settings() -> Settings {
    read_settings(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
fn read_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SalonError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/salon-test".to_string(),
            salon_name: "Different".to_string(),
        };
        write_settings(&path, &settings).unwrap();
        let loaded = read_settings(&path);
        assert_eq!(loaded.data_dir, "/tmp/salon-test");
        assert_eq!(loaded.salon_name, "Different");
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = read_settings(&dir.path().join("absent.json"));
        assert_eq!(s.salon_name, "Salon");
        assert!(s.data_dir.ends_with("salon"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.salon_name, "Salon");
        assert_eq!(s.snapshot_path(), PathBuf::from("/tmp/test/salon.json"));
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let s = read_settings(&path);
        assert_eq!(s.salon_name, "Salon");
    }
}
