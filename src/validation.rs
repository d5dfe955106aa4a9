/*!
 * Timeline integrity checks.
 *
 * Timelines built from segment durations must be laid out end to end:
 * - every span has `start <= end`
 * - each span starts where the previous one ended (no gap)
 * - no span starts before the previous one ended (no overlap)
 */

use log::debug;

use crate::timeline::TimeSpan;

/// Default tolerance in seconds when comparing span bounds
pub const DEFAULT_TOLERANCE_SECS: f64 = 1e-6;

/// Types of timeline issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    /// End time is before start time
    InvalidTimeRange {
        index: usize,
        start: f64,
        end: f64,
    },
    /// The first span does not start at zero
    LateStart {
        start: f64,
    },
    /// Space between a span and the previous one
    Gap {
        index: usize,
        gap: f64,
    },
    /// A span starts before the previous one ended
    Overlap {
        index: usize,
        overlap: f64,
    },
}

impl std::fmt::Display for TimelineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineIssue::InvalidTimeRange { index, start, end } => {
                write!(f, "Entry {}: invalid time range {:.3}s > {:.3}s", index, start, end)
            }
            TimelineIssue::LateStart { start } => {
                write!(f, "Timeline starts at {:.3}s instead of 0", start)
            }
            TimelineIssue::Gap { index, gap } => {
                write!(f, "Entry {}: gap of {:.6}s after previous entry", index, gap)
            }
            TimelineIssue::Overlap { index, overlap } => {
                write!(f, "Entry {}: overlaps previous entry by {:.6}s", index, overlap)
            }
        }
    }
}

/// Result of validating one timeline
#[derive(Debug, Clone, Default)]
pub struct TimelineReport {
    /// Number of spans checked
    pub entry_count: usize,
    /// Issues in timeline order
    pub issues: Vec<TimelineIssue>,
    /// Sum of span durations in seconds
    pub total_duration: f64,
}

impl TimelineReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Contiguity validator for timelines
pub struct TimelineValidator {
    tolerance: f64,
}

impl Default for TimelineValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineValidator {
    /// Create a validator with the default tolerance
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Create a validator with a custom tolerance in seconds
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Validate a timeline
    pub fn validate<T: TimeSpan>(&self, entries: &[T]) -> TimelineReport {
        let mut report = TimelineReport {
            entry_count: entries.len(),
            ..TimelineReport::default()
        };

        let mut previous_end: Option<f64> = None;

        for (index, entry) in entries.iter().enumerate() {
            let (start, end) = (entry.start_time(), entry.end_time());

            if end + self.tolerance < start {
                report.issues.push(TimelineIssue::InvalidTimeRange { index, start, end });
            } else {
                report.total_duration += entry.duration();
            }

            match previous_end {
                None if start.abs() > self.tolerance => {
                    report.issues.push(TimelineIssue::LateStart { start });
                }
                Some(prev) if start - prev > self.tolerance => {
                    report.issues.push(TimelineIssue::Gap { index, gap: start - prev });
                }
                Some(prev) if prev - start > self.tolerance => {
                    report.issues.push(TimelineIssue::Overlap { index, overlap: prev - start });
                }
                _ => {}
            }

            previous_end = Some(end);
        }

        debug!(
            "Timeline validation: {} entries, {} issues, {:.3}s total",
            report.entry_count,
            report.issues.len(),
            report.total_duration
        );

        report
    }
}
