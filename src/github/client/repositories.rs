//! Repositories API methods

use super::GitHubClient;
use crate::github::error::GitHubError;
use crate::github::get_tag_commit::TagCommit;
use crate::github::models::{CommitEntry, ComparisonEntry, ReleaseEntry, TagEntry};
use crate::runtime::{AsyncStream, AsyncTask};

impl GitHubClient {
    /// Stream releases, newest first
    pub fn list_releases(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        per_page: u8,
    ) -> AsyncStream<Result<ReleaseEntry, GitHubError>> {
        crate::github::list_releases::list_releases(self.inner.clone(), owner, repo, per_page)
    }

    /// List recent tags
    pub fn list_tags(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        per_page: u8,
    ) -> AsyncTask<Result<Vec<TagEntry>, GitHubError>> {
        crate::github::list_tags::list_tags(self.inner.clone(), owner, repo, per_page)
    }

    /// Resolve a tag to its commit and timestamp
    pub fn get_tag_commit(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        tag: impl Into<String>,
    ) -> AsyncTask<Result<TagCommit, GitHubError>> {
        crate::github::get_tag_commit::get_tag_commit(self.inner.clone(), owner, repo, tag)
    }

    /// Get a commit
    pub fn get_commit(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        commit_sha: impl Into<String>,
    ) -> AsyncTask<Result<CommitEntry, GitHubError>> {
        crate::github::get_commit::get_commit(self.inner.clone(), owner, repo, commit_sha)
    }

    /// Compare two commits
    pub fn compare_commits(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        base: impl Into<String>,
        head: impl Into<String>,
    ) -> AsyncTask<Result<ComparisonEntry, GitHubError>> {
        crate::github::compare_commits::compare_commits(
            self.inner.clone(),
            owner,
            repo,
            base,
            head,
        )
    }
}
