//! Classification output types.

use std::fmt;

/// Classification of one frame.
///
/// Kept as a typed variant throughout the pipeline; the string form
/// ([`Status::as_str`]) exists only for the serialized report boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Frame is consistent with its neighbors.
    #[default]
    Normal,
    /// Content was likely skipped before this frame.
    Drop,
    /// Frame was likely blended/duplicated, reducing clarity.
    Merge,
}

impl Status {
    /// Boundary string form, exactly as consuming UIs expect it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Drop => "Drop",
            Self::Merge => "Merge",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative per-frame output of the classifier.
///
/// Exactly one record exists per input frame, ordered by `frame_index`
/// with no gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationRecord {
    /// 0-based sequence position.
    pub frame_index: u64,
    /// Assigned status.
    pub status: Status,
    /// Decision strength in [0, 1].
    pub confidence: f64,
    /// Presentation timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Sharpness metric that contributed to the decision.
    pub sharpness: f64,
    /// Motion metric that contributed to the decision.
    pub motion: f64,
    /// Timestamp gap in milliseconds.
    pub ts_gap_ms: f64,
}

/// Running status tallies for a classification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Frames classified Normal.
    pub normal: u64,
    /// Frames classified Drop.
    pub drops: u64,
    /// Frames classified Merge.
    pub merges: u64,
}

impl StatusCounts {
    /// Total frames classified so far.
    pub fn total(&self) -> u64 {
        self.normal + self.drops + self.merges
    }

    /// Record one status.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Normal => self.normal += 1,
            Status::Drop => self.drops += 1,
            Status::Merge => self.merges += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(Status::Normal.as_str(), "Normal");
        assert_eq!(Status::Drop.as_str(), "Drop");
        assert_eq!(Status::Merge.as_str(), "Merge");
    }

    #[test]
    fn test_counts() {
        let mut counts = StatusCounts::default();
        counts.record(Status::Normal);
        counts.record(Status::Drop);
        counts.record(Status::Drop);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.drops, 2);
        assert_eq!(counts.merges, 0);
    }
}
