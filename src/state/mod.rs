//! Application state shared across the UI panels.

use std::path::PathBuf;

use crate::data::{Dataset, GlareStats, compute_stats};
use crate::error::LoadError;

const MAX_RECENT: usize = 8;

/// Lifecycle of the current capture
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    /// Nothing opened yet
    Idle,
    /// A request is in flight
    Loading,
    /// A capture and its statistics are on screen
    Ready { dataset: Dataset, stats: GlareStats },
    /// Load succeeded but the capture held no readings
    Empty,
    Failed(LoadError),
}

impl LoadPhase {
    /// Classify a finished load
    pub fn from_result(result: Result<Dataset, LoadError>) -> Self {
        match result {
            Ok(dataset) => match compute_stats(&dataset) {
                Some(stats) => Self::Ready { dataset, stats },
                None => Self::Empty,
            },
            Err(err) => Self::Failed(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn stats(&self) -> Option<&GlareStats> {
        match self {
            Self::Ready { stats, .. } => Some(stats),
            _ => None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Self::Ready { dataset, .. } => Some(dataset),
            _ => None,
        }
    }
}

/// Display toggles, persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub show_grid: bool,
    pub show_threshold: bool,
    pub show_stats: bool,
    pub ambient: bool,
    /// Averaging window applied to the displayed capture; 1 disables it
    pub smooth_window: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_threshold: true,
            show_stats: true,
            ambient: true,
            smooth_window: 1,
        }
    }
}

/// Everything the frame loop reads and the panels mutate
pub struct AppState {
    pub phase: LoadPhase,
    pub view: ViewState,
    pub current_file: Option<PathBuf>,
    pub recent_files: Vec<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            view: ViewState::default(),
            current_file: None,
            recent_files: Vec::new(),
        }
    }
}

impl AppState {
    /// Record a file as current, promoting it to the top of the recents list
    pub fn set_current_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path.clone());
        self.recent_files.truncate(MAX_RECENT);
        self.current_file = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_successful_load() {
        let phase = LoadPhase::from_result(Ok(Dataset::from_values(vec![1.0, 2.0, 3.0])));
        let stats = phase.stats().unwrap();
        assert_eq!(stats.baseline, 1.0);
        assert_eq!(phase.dataset().unwrap().len(), 3);
    }

    #[test]
    fn test_phase_from_empty_load() {
        let phase = LoadPhase::from_result(Ok(Dataset::default()));
        assert_eq!(phase, LoadPhase::Empty);
    }

    #[test]
    fn test_phase_from_failed_load() {
        let phase = LoadPhase::from_result(Err(LoadError::HttpStatus(404)));
        assert_eq!(phase, LoadPhase::Failed(LoadError::HttpStatus(404)));
    }

    #[test]
    fn test_recent_files_promote_and_cap() {
        let mut state = AppState::default();
        for i in 0..12 {
            state.set_current_file(PathBuf::from(format!("capture-{i}.txt")));
        }
        assert_eq!(state.recent_files.len(), MAX_RECENT);
        assert_eq!(state.recent_files[0], PathBuf::from("capture-11.txt"));

        // Re-opening an older file moves it to the front without duplicating
        state.set_current_file(PathBuf::from("capture-7.txt"));
        assert_eq!(state.recent_files[0], PathBuf::from("capture-7.txt"));
        let sevens = state
            .recent_files
            .iter()
            .filter(|p| **p == PathBuf::from("capture-7.txt"))
            .count();
        assert_eq!(sevens, 1);
    }
}
