//! Persisted preferences.
//!
//! A small JSON file next to the executable's working directory keeps the
//! display toggles and the recent-file list across sessions. Loading is
//! forgiving: a missing or malformed file simply yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::config::CONFIG_FILE;
use crate::state::ViewState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub show_grid: bool,
    pub show_threshold: bool,
    pub show_stats: bool,
    pub ambient: bool,
    pub smooth_window: usize,
    pub recent_files: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let view = ViewState::default();
        Self {
            show_grid: view.show_grid,
            show_threshold: view.show_threshold,
            show_stats: view.show_stats,
            ambient: view.ambient,
            smooth_window: view.smooth_window,
            recent_files: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Write to the default location
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            show_grid: self.show_grid,
            show_threshold: self.show_threshold,
            show_stats: self.show_stats,
            ambient: self.ambient,
            smooth_window: self.smooth_window.max(1),
        }
    }

    pub fn apply_view(&mut self, view: ViewState) {
        self.show_grid = view.show_grid;
        self.show_threshold = view.show_threshold;
        self.show_stats = view.show_stats;
        self.ambient = view.ambient;
        self.smooth_window = view.smooth_window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut config = AppConfig::default();
        config.show_grid = false;
        config.ambient = false;
        config.recent_files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, r#"{"show_grid": false, "added_later": 3}"#).unwrap();
        let config = AppConfig::load_from(&path);
        assert!(!config.show_grid);
        assert!(config.show_threshold);
    }

    #[test]
    fn test_view_state_conversion() {
        let mut config = AppConfig::default();
        let mut view = config.view_state();
        view.show_stats = false;
        config.apply_view(view);
        assert!(!config.show_stats);
    }
}
