//! GitHub commit retrieval operation.

use crate::github::models::CommitEntry;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Get a specific commit by SHA.
pub(crate) fn get_commit(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    sha: impl Into<String>,
) -> AsyncTask<Result<CommitEntry, GitHubError>> {
    let owner = owner.into();
    let repo = repo.into();
    let sha = sha.into();

    spawn_task(async move {
        // per_page=1 keeps the embedded file list small; only metadata is used
        let commit: CommitEntry = inner
            .get(
                format!("/repos/{owner}/{repo}/commits/{sha}?per_page=1"),
                None::<&()>,
            )
            .await
            .map_err(GitHubError::from)?;

        Ok(commit)
    })
}
