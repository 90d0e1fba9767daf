//! Wire models for the REST endpoints the data source reads
//!
//! Only the fields the metrics need are declared; everything else in the
//! payload is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::metrics::{
    Commit, CommitComparison, PullRequestInfo, ReleaseRecord, Review, ReviewState,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEntry {
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<ReleaseEntry> for ReleaseRecord {
    fn from(entry: ReleaseEntry) -> Self {
        ReleaseRecord {
            name: entry.name.unwrap_or_default(),
            tag_name: entry.tag_name,
            created_at: entry.created_at.or(entry.published_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    pub name: String,
}

/// Target of a git ref or tag object.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl GitObject {
    /// Annotated tag object rather than a commit.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.kind == "tag"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefEntry {
    pub object: GitObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signature {
    pub date: Option<DateTime<Utc>>,
}

/// Annotated tag object.
#[derive(Debug, Clone, Deserialize)]
pub struct TagObjectEntry {
    pub object: GitObject,
    pub tagger: Option<Signature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
}

impl From<CommitEntry> for Commit {
    fn from(entry: CommitEntry) -> Self {
        Commit {
            sha: entry.sha,
            committed_at: entry.commit.committer.and_then(|s| s.date),
            authored_at: entry.commit.author.and_then(|s| s.date),
            parent_count: entry.parents.len(),
            message: entry.commit.message,
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonEntry {
    #[serde(default)]
    pub commits: Vec<CommitEntry>,
    #[serde(default)]
    pub files: Vec<crate::metrics::FileChange>,
    #[serde(default)]
    pub total_commits: usize,
}

impl From<ComparisonEntry> for CommitComparison {
    /// The compare endpoint lists at most 250 commits but reports the full
    /// count in `total_commits`.
    fn from(entry: ComparisonEntry) -> Self {
        let truncated = entry.total_commits > entry.commits.len();
        CommitComparison {
            commits: entry.commits.into_iter().map(Commit::from).collect(),
            truncated,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEntry {
    pub number: u64,
    pub user: Option<UserEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequestEntry> for PullRequestInfo {
    fn from(entry: PullRequestEntry) -> Self {
        PullRequestInfo {
            number: entry.number,
            author: entry.user.map(|u| u.login),
            created_at: entry.created_at,
            merged_at: entry.merged_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewEntry {
    pub user: Option<UserEntry>,
    pub state: ReviewState,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl From<ReviewEntry> for Review {
    fn from(entry: ReviewEntry) -> Self {
        Review {
            reviewer: entry.user.map(|u| u.login),
            state: entry.state,
            submitted_at: entry.submitted_at,
        }
    }
}
