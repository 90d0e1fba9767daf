//! GitHub API client
//!
//! Thin wrapper around a shared [`Octocrab`] instance exposing the read-only
//! calls the metrics need. Each call returns an [`AsyncTask`] or
//! [`AsyncStream`](crate::runtime::AsyncStream) running on its own tokio
//! task.
//!
//! # Examples
//!
//! ```rust,no_run
//! use delivery_metrics::GitHubClient;
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let releases: Vec<_> = gh.list_releases("owner", "repo", 10).try_collect().await?;
//!     println!("{} releases", releases.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! [`AsyncTask`]: crate::runtime::AsyncTask

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::source::GitHubDataSource;
use jsonwebtoken::EncodingKey;
use octocrab::{Octocrab, models::AppId};
use std::sync::Arc;

mod pull_requests;
mod repositories;

/// Shared GitHub connection. Clones share the underlying client.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::default()
    }

    /// Client authenticated with a personal access token against github.com.
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Metrics data source for `owner/repo` backed by this client.
    #[must_use]
    pub fn repository(&self, owner: impl Into<String>, repo: impl Into<String>) -> GitHubDataSource {
        GitHubDataSource::new(self.clone(), owner, repo)
    }
}

enum Auth {
    Anonymous,
    Token(String),
    App { id: AppId, private_key: String },
}

/// Builder for [`GitHubClient`].
///
/// A personal token wins over GitHub App credentials when both are set.
#[derive(Default)]
pub struct GitHubClientBuilder {
    token: Option<String>,
    app: Option<(AppId, String)>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticate as a GitHub App with its PEM encoded RSA key.
    #[must_use]
    pub fn app(mut self, app_id: AppId, private_key: impl Into<String>) -> Self {
        self.app = Some((app_id, private_key.into()));
        self
    }

    /// API root for GitHub Enterprise, e.g. `https://ghe.example.com/api/v3`.
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    fn auth(&mut self) -> Auth {
        match (self.token.take(), self.app.take()) {
            (Some(token), _) => Auth::Token(token),
            (None, Some((id, private_key))) => Auth::App { id, private_key },
            (None, None) => Auth::Anonymous,
        }
    }

    pub fn build(mut self) -> GitHubResult<GitHubClient> {
        let mut builder = match self.auth() {
            Auth::Anonymous => Octocrab::builder(),
            Auth::Token(token) => Octocrab::builder().personal_token(token),
            Auth::App { id, private_key } => {
                let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
                    .map_err(|e| GitHubError::ClientSetup(format!("Invalid GitHub App key: {e}")))?;
                Octocrab::builder().app(id, key)
            }
        };

        if let Some(uri) = self.base_uri.as_deref() {
            builder = builder
                .base_uri(uri)
                .map_err(|e| GitHubError::ClientSetup(format!("Invalid API URL {uri}: {e}")))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}
