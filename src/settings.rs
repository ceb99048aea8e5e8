use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::db::DB_FILE;
use crate::error::Result;
use crate::suggest::DEFAULT_MIN_NOTE_LEN;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Wallet used by `add` when `--wallet` is not given.
    #[serde(default = "default_wallet")]
    pub default_wallet: String,
    /// Notes must be longer than this before a category is suggested.
    #[serde(default = "default_suggest_min_len")]
    pub suggest_min_len: usize,
}

fn default_wallet() -> String {
    "cash".to_string()
}

fn default_suggest_min_len() -> usize {
    DEFAULT_MIN_NOTE_LEN
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            default_wallet: default_wallet(),
            suggest_min_len: default_suggest_min_len(),
        }
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn settings_path() -> PathBuf {
    home().join(".config").join("chitieu").join("settings.json")
}

fn default_data_dir() -> PathBuf {
    home().join("Documents").join("chitieu")
}

/// Reads `~/.config/chitieu/settings.json`. A missing or broken file means
/// defaults; missing keys take their defaults too.
pub fn load_settings() -> Settings {
    let path = settings_path();
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
            return Settings::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = settings_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut json = serde_json::to_string_pretty(settings)?;
    json.push('\n');
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().is_file()
}

pub fn db_path() -> PathBuf {
    PathBuf::from(load_settings().data_dir).join(DB_FILE)
}

/// `~` and `~/x` resolve under the home directory, relative paths against
/// the working directory. The path need not exist yet.
pub fn expand_path(path: &str) -> String {
    let expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            home().join(rest.trim_start_matches('/'))
        }
        _ => std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path)),
    };
    expanded.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            default_wallet: "bank".to_string(),
            suggest_min_len: 4,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.data_dir, "/tmp/test");
        assert_eq!(loaded.default_wallet, "bank");
        assert_eq!(loaded.suggest_min_len, 4);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.default_wallet, "cash");
        assert_eq!(s.suggest_min_len, 2);
        assert!(s.data_dir.ends_with("chitieu"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.default_wallet, "cash");
        assert_eq!(s.suggest_min_len, 2);
    }

    #[test]
    fn test_expand_path_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert_eq!(expand_path(&path), path);
    }

    #[test]
    fn test_expand_path_resolves_home_and_relative() {
        let under_home = expand_path("~/ledger");
        assert!(!under_home.starts_with('~'));
        assert!(under_home.ends_with("ledger"));
        assert!(PathBuf::from(expand_path("not-created-yet")).is_absolute());
        // "~user" is not expanded.
        assert!(expand_path("~other/x").ends_with("~other/x"));
    }
}
