//! GitHub tags listing operation.

use crate::github::models::TagEntry;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// List the most recent tags (first page only).
pub(crate) fn list_tags(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    per_page: u8,
) -> AsyncTask<Result<Vec<TagEntry>, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());

    spawn_task(async move {
        let tags: Vec<TagEntry> = inner
            .get(
                format!("/repos/{owner}/{repo}/tags?per_page={per_page}"),
                None::<&()>,
            )
            .await
            .map_err(GitHubError::from)?;

        Ok(tags)
    })
}
