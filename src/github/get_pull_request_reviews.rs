//! GitHub Pull Request reviews listing operation.

use crate::github::error::GitHubError;
use crate::github::models::ReviewEntry;
use crate::github::util::stream_pages;
use crate::runtime::AsyncStream;
use octocrab::Octocrab;
use std::sync::Arc;

/// Stream PR reviews in submission order.
pub(crate) fn get_pull_request_reviews(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncStream<Result<ReviewEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    stream_pages(
        inner,
        format!("/repos/{owner}/{repo}/pulls/{pr_number}/reviews?per_page=100"),
    )
}
