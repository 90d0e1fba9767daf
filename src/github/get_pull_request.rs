//! GitHub Pull Request retrieval operation.

use crate::github::models::PullRequestEntry;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Get a single pull request.
pub(crate) fn get_pull_request(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncTask<Result<PullRequestEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());

    spawn_task(async move {
        let pr: PullRequestEntry = inner
            .get(format!("/repos/{owner}/{repo}/pulls/{pr_number}"), None::<&()>)
            .await
            .map_err(GitHubError::from)?;

        Ok(pr)
    })
}
