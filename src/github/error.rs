//! Errors raised by the GitHub adapter

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

/// Failure of a single GitHub request.
///
/// These never reach the metrics engine; [`GitHubDataSource`] logs them and
/// reports the data as absent.
///
/// [`GitHubDataSource`]: crate::github::GitHubDataSource
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport, HTTP status or decoding failure inside octocrab
    #[error("GitHub request failed: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// The API answered with something the adapter cannot use
    #[error("Unexpected GitHub response: {0}")]
    Api(String),

    /// A value the metrics depend on is missing from the response
    #[error("Missing from GitHub response: {0}")]
    NotFound(String),

    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// The spawned request task was dropped before it produced a result
    #[error("Request task ended without a result")]
    Cancelled(#[from] RecvError),
}

pub type GitHubResult<T> = Result<T, GitHubError>;
