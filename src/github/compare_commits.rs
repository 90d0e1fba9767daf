//! GitHub commit comparison operation.

use crate::github::models::ComparisonEntry;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Compare two commits (`base...head`).
///
/// The response lists at most 250 commits; `total_commits` tells whether
/// the list was cut short.
pub(crate) fn compare_commits(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    base: impl Into<String>,
    head: impl Into<String>,
) -> AsyncTask<Result<ComparisonEntry, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    let (base, head) = (base.into(), head.into());

    spawn_task(async move {
        let comparison: ComparisonEntry = inner
            .get(
                format!("/repos/{owner}/{repo}/compare/{base}...{head}"),
                None::<&()>,
            )
            .await
            .map_err(GitHubError::from)?;

        Ok(comparison)
    })
}
