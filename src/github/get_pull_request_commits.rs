//! GitHub Pull Request commits listing operation.

use crate::github::error::GitHubError;
use crate::github::models::CommitEntry;
use crate::github::util::stream_pages;
use crate::runtime::AsyncStream;
use octocrab::Octocrab;
use std::sync::Arc;

/// Stream a PR's commits, oldest first.
pub(crate) fn get_pull_request_commits(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncStream<Result<CommitEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    stream_pages(
        inner,
        format!("/repos/{owner}/{repo}/pulls/{pr_number}/commits?per_page=100"),
    )
}
