//! Model load progress and the user-facing status line

use std::fmt;

/// Byte progress of a model read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    /// Bytes read so far
    pub loaded: u64,
    /// Total size in bytes, when known
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Create a progress sample
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Rounded percentage of `total` read, capped at 100
    ///
    /// `None` when the total is unknown or zero.
    pub fn percent(&self) -> Option<u8> {
        let total = self.total.filter(|&total| total > 0)?;
        let percent = (self.loaded as f64 / total as f64 * 100.0).round().min(100.0);
        Some(percent as u8)
    }

    /// Status to show for this sample
    pub fn status(&self) -> LoadStatus {
        LoadStatus::Loading(self.percent())
    }
}

/// State of the loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Still reading; percentage when the size is known
    Loading(Option<u8>),
    /// Model is in the scene; indicator hidden
    Loaded,
    /// Load failed; no retry is attempted
    Failed,
}

impl LoadStatus {
    /// Text shown by the indicator (empty when hidden)
    pub fn message(&self) -> String {
        match self {
            Self::Loading(Some(percent)) => format!("Loading model... {percent}%"),
            Self::Loading(None) => "Loading model...".to_string(),
            Self::Loaded => String::new(),
            Self::Failed => "Failed to load model".to_string(),
        }
    }

    /// Whether the indicator is shown
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Loaded)
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(LoadProgress::new(0, Some(200)).percent(), Some(0));
        assert_eq!(LoadProgress::new(1, Some(3)).percent(), Some(33));
        assert_eq!(LoadProgress::new(2, Some(3)).percent(), Some(67));
        assert_eq!(LoadProgress::new(200, Some(200)).percent(), Some(100));
    }

    #[test]
    fn test_unknown_total_has_no_percent() {
        assert_eq!(LoadProgress::new(512, None).percent(), None);
        assert_eq!(LoadProgress::new(512, Some(0)).percent(), None);
        assert_eq!(LoadProgress::new(512, None).status().message(), "Loading model...");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(LoadStatus::Loading(Some(42)).message(), "Loading model... 42%");
        assert_eq!(LoadStatus::Loaded.message(), "");
        assert_eq!(LoadStatus::Failed.to_string(), "Failed to load model");
        assert!(!LoadStatus::Loaded.is_visible());
        assert!(LoadStatus::Failed.is_visible());
    }
}
