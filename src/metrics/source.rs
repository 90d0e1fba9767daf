//! Data access capability consumed by the engine

use chrono::{DateTime, Utc};
use std::future::Future;

use super::types::{
    Commit, CommitComparison, FileChange, PullRequestInfo, ReleaseRecord, ResolvedTag, Review,
    TagRecord,
};

/// Read access to a repository's delivery history.
///
/// Implementations absorb their own failures: an unavailable resource is
/// reported as `None` or an empty list, never as an error. The engine treats
/// absence as a first-class input and does not retry.
pub trait DeliveryDataSource: Send + Sync {
    /// Non-draft releases, newest first, at most `max`.
    fn list_releases(&self, max: u8) -> impl Future<Output = Vec<ReleaseRecord>> + Send;

    /// Tags in upstream order (newest first), at most `max`.
    fn list_tags(&self, max: u8) -> impl Future<Output = Vec<TagRecord>> + Send;

    /// Commit SHA and timestamp a tag points at.
    fn resolve_tag(&self, name: &str) -> impl Future<Output = Option<ResolvedTag>> + Send;

    /// Commits reachable from `head` but not from `base`.
    fn compare_commits(
        &self,
        base: &str,
        head: &str,
    ) -> impl Future<Output = Option<CommitComparison>> + Send;

    fn get_commit(&self, sha: &str) -> impl Future<Output = Option<Commit>> + Send;

    fn get_pull_request(&self, number: u64)
    -> impl Future<Output = Option<PullRequestInfo>> + Send;

    /// Commits of a pull request in the order GitHub lists them, ending at the head.
    fn get_pull_request_commits(
        &self,
        number: u64,
    ) -> impl Future<Output = Option<Vec<Commit>>> + Send;

    fn get_pull_request_files(
        &self,
        number: u64,
    ) -> impl Future<Output = Option<Vec<FileChange>>> + Send;

    /// Per-file line counts between two commits.
    fn compare_commits_diff(
        &self,
        base: &str,
        head: &str,
    ) -> impl Future<Output = Option<Vec<FileChange>>> + Send;

    fn get_pull_request_reviews(
        &self,
        number: u64,
    ) -> impl Future<Output = Option<Vec<Review>>> + Send;

    /// Pull requests merged at or after `since`, most recent first, at most `max`.
    fn list_merged_pull_requests(
        &self,
        since: DateTime<Utc>,
        max: u8,
    ) -> impl Future<Output = Vec<PullRequestInfo>> + Send;
}
