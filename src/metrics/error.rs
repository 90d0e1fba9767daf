//! Metrics engine error types

use thiserror::Error;

/// Structural failures of the metrics engine.
///
/// Missing data for a single metric is not an error; calculators report it
/// as `null` fields instead. These variants are preconditions the caller has
/// to deal with.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The repository has neither releases nor tags
    #[error("No releases or tags found to use as deployments")]
    NoDeploymentsFound,

    /// A release or tag could not be tied to a commit and timestamp
    #[error("Deployment '{tag}' could not be resolved to a commit and timestamp")]
    UnresolvedDeployment { tag: String },

    /// A file ignore pattern did not compile
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unknown time period name
    #[error("Invalid time period '{0}' (expected week, month or quarter)")]
    InvalidPeriod(String),
}

/// Convenience result alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
