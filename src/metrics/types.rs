//! Record types consumed by the metrics engine
//!
//! These are the snapshots a [`DeliveryDataSource`](super::DeliveryDataSource)
//! hands to the calculators. They are immutable inputs; every result type is
//! built fresh from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A non-draft release as listed by the hosting API.
///
/// Its commit is not known yet; it has to be resolved through the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub name: String,
    pub tag_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A tag as listed by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
}

/// Commit identity and timestamp a tag points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTag {
    pub sha: String,
    pub created_at: DateTime<Utc>,
}

/// A release or tag that reached production, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    pub tag: String,
    pub sha: String,
    pub created_at: DateTime<Utc>,
}

/// A commit snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub committed_at: Option<DateTime<Utc>>,
    pub authored_at: Option<DateTime<Utc>>,
    pub parent_count: usize,
    #[serde(default)]
    pub message: String,
}

impl Commit {
    /// More than one parent.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }

    /// Committer date, falling back to the author date.
    #[must_use]
    pub fn committed_or_authored(&self) -> Option<DateTime<Utc>> {
        self.committed_at.or(self.authored_at)
    }

    /// Author date, falling back to the committer date.
    #[must_use]
    pub fn authored_or_committed(&self) -> Option<DateTime<Utc>> {
        self.authored_at.or(self.committed_at)
    }
}

/// Result of comparing two commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitComparison {
    pub commits: Vec<Commit>,
    /// The hosting API returned fewer commits than the range holds
    pub truncated: bool,
}

/// Change status of a file in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

/// Per-file line counts of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default = "default_status")]
    pub status: FileStatus,
}

fn default_status() -> FileStatus {
    FileStatus::Modified
}

impl FileChange {
    #[must_use]
    pub fn changes(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Pull request metadata needed by the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// Review verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    #[serde(other)]
    Other,
}

/// A submitted pull request review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: Option<String>,
    pub state: ReviewState,
    pub submitted_at: Option<DateTime<Utc>>,
}
