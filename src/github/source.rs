//! GitHub-backed delivery data source
//!
//! Adapts [`GitHubClient`] to [`DeliveryDataSource`]. Every failed request
//! is logged and reported to the engine as absent data.

use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt, TryStreamExt, future};
use log::{debug, warn};

use crate::github::client::GitHubClient;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::ReleaseEntry;
use crate::metrics::{
    Commit, CommitComparison, DeliveryDataSource, FileChange, PullRequestInfo, ReleaseRecord,
    ResolvedTag, Review, TagRecord,
};
use crate::runtime::{AsyncStream, AsyncTask};

/// One repository on GitHub as a metrics data source.
#[derive(Clone, Debug)]
pub struct GitHubDataSource {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubDataSource {
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// `owner/repo`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// The first `max` non-draft releases of a newest-first listing.
///
/// Drafts do not count towards `max`, so reading continues past them and
/// stops as soon as enough published releases are in hand.
pub async fn published_releases<S>(releases: S, max: usize) -> GitHubResult<Vec<ReleaseRecord>>
where
    S: Stream<Item = GitHubResult<ReleaseEntry>>,
{
    releases
        .try_filter(|release| future::ready(!release.draft))
        .take(max)
        .map_ok(ReleaseRecord::from)
        .try_collect()
        .await
}

/// Await a task, turning any failure into `None`.
async fn settle<T>(task: AsyncTask<GitHubResult<T>>, what: &str) -> Option<T>
where
    T: Send + 'static,
{
    let error = match task.await {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e,
        Err(e) => GitHubError::from(e),
    };
    warn!("Failed to fetch {what}: {error}");
    None
}

/// Collect a paginated stream, turning a failed page into `None`.
async fn drain<T>(stream: AsyncStream<GitHubResult<T>>, what: &str) -> Option<Vec<T>> {
    match stream.try_collect::<Vec<T>>().await {
        Ok(items) => Some(items),
        Err(e) => {
            warn!("Failed to fetch {what}: {e}");
            None
        }
    }
}

impl DeliveryDataSource for GitHubDataSource {
    async fn list_releases(&self, max: u8) -> Vec<ReleaseRecord> {
        let stream = self.client.list_releases(&self.owner, &self.repo, max);
        match published_releases(stream, usize::from(max)).await {
            Ok(releases) => {
                debug!("{}: {} published releases listed", self.full_name(), releases.len());
                releases
            }
            Err(e) => {
                warn!("Failed to fetch releases: {e}");
                Vec::new()
            }
        }
    }

    async fn list_tags(&self, max: u8) -> Vec<TagRecord> {
        let task = self.client.list_tags(&self.owner, &self.repo, max);
        settle(task, "tags")
            .await
            .unwrap_or_default()
            .into_iter()
            .take(usize::from(max))
            .map(|t| TagRecord { name: t.name })
            .collect()
    }

    async fn resolve_tag(&self, name: &str) -> Option<ResolvedTag> {
        let task = self.client.get_tag_commit(&self.owner, &self.repo, name);
        settle(task, &format!("tag {name}"))
            .await
            .map(|t| ResolvedTag {
                sha: t.sha,
                created_at: t.created_at,
            })
    }

    async fn compare_commits(&self, base: &str, head: &str) -> Option<CommitComparison> {
        let task = self.client.compare_commits(&self.owner, &self.repo, base, head);
        settle(task, &format!("comparison {base}...{head}"))
            .await
            .map(CommitComparison::from)
    }

    async fn get_commit(&self, sha: &str) -> Option<Commit> {
        let task = self.client.get_commit(&self.owner, &self.repo, sha);
        settle(task, &format!("commit {sha}")).await.map(Commit::from)
    }

    async fn get_pull_request(&self, number: u64) -> Option<PullRequestInfo> {
        let task = self.client.get_pull_request(&self.owner, &self.repo, number);
        settle(task, &format!("pull request #{number}"))
            .await
            .map(PullRequestInfo::from)
    }

    async fn get_pull_request_commits(&self, number: u64) -> Option<Vec<Commit>> {
        let stream = self
            .client
            .get_pull_request_commits(&self.owner, &self.repo, number);
        let commits = drain(stream, &format!("commits of #{number}")).await?;
        Some(commits.into_iter().map(Commit::from).collect())
    }

    async fn get_pull_request_files(&self, number: u64) -> Option<Vec<FileChange>> {
        let stream = self
            .client
            .get_pull_request_files(&self.owner, &self.repo, number);
        drain(stream, &format!("files of #{number}")).await
    }

    async fn compare_commits_diff(&self, base: &str, head: &str) -> Option<Vec<FileChange>> {
        let task = self.client.compare_commits(&self.owner, &self.repo, base, head);
        settle(task, &format!("diff {base}...{head}"))
            .await
            .map(|comparison| comparison.files)
    }

    async fn get_pull_request_reviews(&self, number: u64) -> Option<Vec<Review>> {
        let stream = self
            .client
            .get_pull_request_reviews(&self.owner, &self.repo, number);
        let reviews = drain(stream, &format!("reviews of #{number}")).await?;
        Some(reviews.into_iter().map(Review::from).collect())
    }

    async fn list_merged_pull_requests(
        &self,
        since: DateTime<Utc>,
        max: u8,
    ) -> Vec<PullRequestInfo> {
        let mut stream = self
            .client
            .list_closed_pull_requests(&self.owner, &self.repo);
        let mut merged = Vec::new();

        while let Some(item) = stream.next().await {
            let pr = match item {
                Ok(pr) => pr,
                Err(e) => {
                    warn!("Failed to list pull requests: {e}");
                    break;
                }
            };

            // Sorted by update time: nothing further down can be in range.
            if pr.updated_at.is_some_and(|at| at < since) {
                break;
            }
            if pr.merged_at.is_some_and(|at| at >= since) {
                merged.push(PullRequestInfo::from(pr));
                if merged.len() >= usize::from(max) {
                    break;
                }
            }
        }

        debug!(
            "{}: {} pull requests merged since {since}",
            self.full_name(),
            merged.len()
        );
        merged
    }
}
