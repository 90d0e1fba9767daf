//! GitHub API utilities

use crate::github::error::GitHubError;
use crate::runtime::{AsyncStream, AsyncTask};
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// Spawn an async task for a GitHub API operation.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Stream every item of a paginated listing, following `Link: next` headers.
///
/// Pages are fetched until the listing ends or the consumer drops the
/// stream. A failed page ends the stream with that error.
pub(crate) fn stream_pages<T>(
    inner: Arc<Octocrab>,
    route: String,
) -> AsyncStream<Result<T, GitHubError>>
where
    T: DeserializeOwned + Send + 'static,
{
    let (tx, stream) = AsyncStream::channel();

    tokio::spawn(async move {
        let mut page: Page<T> = match inner.get(route, None::<&()>).await {
            Ok(page) => page,
            Err(e) => {
                let _ = tx.send(Err(GitHubError::from(e)));
                return;
            }
        };

        loop {
            for item in std::mem::take(&mut page.items) {
                if tx.send(Ok(item)).is_err() {
                    return; // Receiver dropped
                }
            }

            match inner.get_page::<T>(&page.next).await {
                Ok(Some(next)) => page = next,
                Ok(None) => return,
                Err(e) => {
                    let _ = tx.send(Err(GitHubError::from(e)));
                    return;
                }
            }
        }
    });

    stream
}
