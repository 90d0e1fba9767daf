//! GitHub API operations module
//!
//! Read-only GitHub operations backing the metrics data source, built on
//! the octocrab library.

pub mod client;
pub mod error;
pub mod models;
pub mod source;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use util::spawn_task;

pub use get_tag_commit::TagCommit;
pub use source::GitHubDataSource;

// GitHub API operations - Repositories (internal)
pub(crate) mod compare_commits;
pub(crate) mod get_commit;
pub(crate) mod get_tag_commit;
pub(crate) mod list_releases;
pub(crate) mod list_tags;

// GitHub API operations - Pull Requests (internal)
pub(crate) mod get_pull_request;
pub(crate) mod get_pull_request_commits;
pub(crate) mod get_pull_request_files;
pub(crate) mod get_pull_request_reviews;
pub(crate) mod list_pull_requests;
