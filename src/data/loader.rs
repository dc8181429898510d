//! Capture sources and line-oriented parsing.
//!
//! A capture is plain text, one reading per line, with an optional header
//! line. Parsing is deliberately forgiving: stray delimiters are stripped and
//! malformed lines are skipped rather than failing the whole load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// A provider of raw capture text.
///
/// The loader does not care where the bytes come from. The file source below
/// maps absent/denied outcomes onto the same status codes the hosted capture
/// endpoint reports, so the UI shows one consistent error surface.
pub trait TextSource: Send {
    /// Fetch the raw text of the capture
    fn fetch(&self) -> Result<String, LoadError>;

    /// Short name for status display
    fn name(&self) -> String;
}

/// Capture stored as a local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::HttpStatus(404),
            ErrorKind::PermissionDenied => LoadError::HttpStatus(403),
            _ => LoadError::Other(e.to_string()),
        })
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// In-memory capture source, used by tests and canned demo data
pub struct StaticSource {
    name: String,
    payload: Result<String, LoadError>,
}

impl StaticSource {
    /// Source that yields the given text
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Ok(text.into()),
        }
    }

    /// Source that fails with the given status code
    pub fn status(name: impl Into<String>, code: u16) -> Self {
        Self {
            name: name.into(),
            payload: Err(LoadError::HttpStatus(code)),
        }
    }
}

impl TextSource for StaticSource {
    fn fetch(&self) -> Result<String, LoadError> {
        self.payload.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// An immutable, ordered sequence of light-intensity readings.
///
/// Indices are the natural 0..n-1 positions in arrival order; the sequence is
/// never reordered after construction and may legitimately be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Dataset {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Parse raw capture text into a dataset. See [`parse_lines`].
    pub fn from_text(text: &str) -> Self {
        Self {
            values: parse_lines(text),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Smallest and largest reading, or None when empty
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(self.values.iter().fold((first, first), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }

    /// Keep only readings whose 1-based position falls in `start..=end`
    pub fn trimmed(&self, start: usize, end: usize) -> Dataset {
        if start == 0 || start > end {
            return Dataset::default();
        }
        let lo = (start - 1).min(self.values.len());
        let hi = end.min(self.values.len());
        Dataset::from_values(self.values[lo..hi].to_vec())
    }

    /// Average every `window` readings (non-overlapping). The final partial
    /// window is included using its average.
    pub fn smoothed(&self, window: usize) -> Dataset {
        if window <= 1 {
            return self.clone();
        }
        let values = self
            .values
            .chunks(window)
            .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
            .collect();
        Dataset::from_values(values)
    }

    /// Multiply every reading by `factor` (sensor angle correction)
    pub fn scaled(&self, factor: f64) -> Dataset {
        Dataset::from_values(self.values.iter().map(|v| v * factor).collect())
    }
}

/// Load and parse a capture from a source.
///
/// An empty resulting dataset is a valid, non-error outcome.
pub fn load(source: &dyn TextSource) -> Result<Dataset, LoadError> {
    profiling::scope!("capture_load");
    let text = source.fetch()?;
    Ok(Dataset::from_text(&text))
}

/// Parse capture text into readings.
///
/// Lines are split on any line-ending convention. The first non-blank line is
/// skipped as a header iff it contains an alphabetic character. Every other
/// non-blank line is stripped to digit/sign/point/exponent characters and
/// parsed as f64; lines that do not yield a finite number are skipped.
fn parse_lines(text: &str) -> Vec<f64> {
    let mut values = Vec::new();
    let mut seen_first = false;

    for line in text.split(['\n', '\r']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !seen_first {
            seen_first = true;
            if line.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
        }
        let cleaned: String = line
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            .collect();
        if let Ok(v) = cleaned.parse::<f64>() {
            if v.is_finite() {
                values.push(v);
            }
        }
    }

    values
}
