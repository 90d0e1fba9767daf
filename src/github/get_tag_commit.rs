//! GitHub tag resolution operation.

use crate::github::models::{CommitEntry, RefEntry, TagObjectEntry};
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::sync::Arc;

/// Annotated tags pointing at annotated tags are followed this many times.
const MAX_TAG_DEPTH: usize = 4;

/// Commit a tag points at, with the tag's timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCommit {
    pub sha: String,
    /// Tagger date for annotated tags, commit date for lightweight tags
    pub created_at: DateTime<Utc>,
}

/// Resolve `tag` to the commit it points at.
pub(crate) fn get_tag_commit(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    tag: impl Into<String>,
) -> AsyncTask<Result<TagCommit, GitHubError>> {
    let (owner, repo, tag) = (owner.into(), repo.into(), tag.into());

    spawn_task(async move {
        let reference: RefEntry = inner
            .get(
                format!("/repos/{owner}/{repo}/git/ref/tags/{tag}"),
                None::<&()>,
            )
            .await
            .map_err(GitHubError::from)?;

        let mut object = reference.object;
        let mut tagged_at = None;
        for _ in 0..MAX_TAG_DEPTH {
            if !object.is_tag() {
                break;
            }
            let tag_object: TagObjectEntry = inner
                .get(
                    format!("/repos/{owner}/{repo}/git/tags/{}", object.sha),
                    None::<&()>,
                )
                .await
                .map_err(GitHubError::from)?;
            tagged_at = tagged_at.or(tag_object.tagger.and_then(|t| t.date));
            object = tag_object.object;
        }

        if object.is_tag() {
            return Err(GitHubError::Api(format!(
                "Tag {tag} is nested more than {MAX_TAG_DEPTH} levels deep"
            )));
        }

        let created_at = match tagged_at {
            Some(at) => at,
            None => {
                let commit: CommitEntry = inner
                    .get(
                        format!("/repos/{owner}/{repo}/commits/{}?per_page=1", object.sha),
                        None::<&()>,
                    )
                    .await
                    .map_err(GitHubError::from)?;
                commit
                    .commit
                    .committer
                    .and_then(|s| s.date)
                    .or(commit.commit.author.and_then(|s| s.date))
                    .ok_or_else(|| {
                        GitHubError::NotFound(format!("date of commit {} (tag {tag})", object.sha))
                    })?
            }
        };

        Ok(TagCommit {
            sha: object.sha,
            created_at,
        })
    })
}
