//! Errors surfaced by metric resolution and ranking.

use thiserror::Error;

/// A metric name did not match any registered [`Metric`](crate::Metric).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown similarity metric '{name}'")]
pub struct UnknownMetric {
    /// Name supplied by the caller.
    pub name: String,
}

/// Errors returned by the ranking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The target subject is not present in the dataset.
    #[error("subject {subject} is not present in the dataset")]
    UnknownSubject {
        /// Debug rendering of the requested subject.
        subject: String,
    },
    /// The requested metric name could not be resolved.
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetric),
}
