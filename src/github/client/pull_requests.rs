//! Pull Requests API methods

use super::GitHubClient;
use crate::github::error::GitHubError;
use crate::github::models::{CommitEntry, PullRequestEntry, ReviewEntry};
use crate::metrics::FileChange;
use crate::runtime::{AsyncStream, AsyncTask};

impl GitHubClient {
    /// Get a pull request
    pub fn get_pull_request(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> AsyncTask<Result<PullRequestEntry, GitHubError>> {
        crate::github::get_pull_request::get_pull_request(self.inner.clone(), owner, repo, pr_number)
    }

    /// Get pull request commits
    pub fn get_pull_request_commits(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> AsyncStream<Result<CommitEntry, GitHubError>> {
        crate::github::get_pull_request_commits::get_pull_request_commits(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// Get pull request files
    pub fn get_pull_request_files(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> AsyncStream<Result<FileChange, GitHubError>> {
        crate::github::get_pull_request_files::get_pull_request_files(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// Get pull request reviews
    pub fn get_pull_request_reviews(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> AsyncStream<Result<ReviewEntry, GitHubError>> {
        crate::github::get_pull_request_reviews::get_pull_request_reviews(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// List closed pull requests, most recently updated first
    pub fn list_closed_pull_requests(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> AsyncStream<Result<PullRequestEntry, GitHubError>> {
        crate::github::list_pull_requests::list_closed_pull_requests(self.inner.clone(), owner, repo)
    }
}
