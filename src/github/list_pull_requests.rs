//! GitHub Pull Requests listing operation.

use crate::github::error::GitHubError;
use crate::github::models::PullRequestEntry;
use crate::github::util::stream_pages;
use crate::runtime::AsyncStream;
use octocrab::Octocrab;
use std::sync::Arc;

/// Stream closed pull requests, most recently updated first.
///
/// Merged and unmerged PRs are both included; callers filter on
/// `merged_at` and stop reading once `updated_at` falls out of range.
pub(crate) fn list_closed_pull_requests(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
) -> AsyncStream<Result<PullRequestEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    stream_pages(
        inner,
        format!("/repos/{owner}/{repo}/pulls?state=closed&sort=updated&direction=desc&per_page=100"),
    )
}
