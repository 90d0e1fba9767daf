//! GitHub releases listing operation.

use crate::github::error::GitHubError;
use crate::github::models::ReleaseEntry;
use crate::github::util::stream_pages;
use crate::runtime::AsyncStream;
use octocrab::Octocrab;
use std::sync::Arc;

/// Stream releases newest first, drafts included, `per_page` per request.
///
/// Callers skipping drafts keep reading until they have enough published
/// releases, so later pages are only requested when drafts crowd the first.
pub(crate) fn list_releases(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    per_page: u8,
) -> AsyncStream<Result<ReleaseEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    stream_pages(
        inner,
        format!("/repos/{owner}/{repo}/releases?per_page={per_page}"),
    )
}
