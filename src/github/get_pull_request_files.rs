//! GitHub Pull Request files listing operation.

use crate::github::error::GitHubError;
use crate::github::util::stream_pages;
use crate::metrics::FileChange;
use crate::runtime::AsyncStream;
use octocrab::Octocrab;
use std::sync::Arc;

/// Stream files changed in a PR with their line counts.
pub(crate) fn get_pull_request_files(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncStream<Result<FileChange, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    stream_pages(
        inner,
        format!("/repos/{owner}/{repo}/pulls/{pr_number}/files?per_page=100"),
    )
}
