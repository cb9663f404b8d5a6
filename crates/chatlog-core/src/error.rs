//! Error types for chatlog-core

use thiserror::Error;

use crate::activity::ActivityIndex;

/// Errors that can occur while building or querying an activity log
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// No activity carries the requested index
    #[error("no such activity: index {0}")]
    NotFound(ActivityIndex),

    /// Initial sequence was not sorted ascending by index
    #[error("activities out of order at position {position}: index {previous} precedes {next}")]
    Unsorted {
        /// Position of the offending element
        position: usize,
        /// Index of the element before it
        previous: ActivityIndex,
        /// Index of the offending element
        next: ActivityIndex,
    },

    /// Index already present in a log that rejects duplicates
    #[error("duplicate activity index: {0}")]
    DuplicateIndex(ActivityIndex),
}

impl LogError {
    /// Whether this error only means the index is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for activity log operations
pub type LogResult<T> = Result<T, LogError>;
