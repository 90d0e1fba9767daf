//! Deployment source resolution
//!
//! Releases are the deployment timeline whenever the repository has any;
//! tags are only a fallback. Release commits are taken from the tag, not the
//! release object, since the two can diverge.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;

use super::error::{MetricsError, MetricsResult};
use super::source::DeliveryDataSource;
use super::types::{Deployment, ReleaseRecord, TagRecord};

/// Where the deployment timeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentSource {
    Release,
    Tag,
}

impl DeploymentSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentSource::Release => "release",
            DeploymentSource::Tag => "tag",
        }
    }
}

/// The two most recent deployments plus the timestamps of the whole window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentPair {
    pub source: DeploymentSource,
    pub latest: Deployment,
    pub previous: Option<Deployment>,
    /// Timestamps of every deployment in the fetched window, newest first.
    ///
    /// Older tags that fail to resolve are left out, so with tags this can be
    /// shorter than the fetched list. `deploy_count` is its length.
    #[serde(skip)]
    pub timeline: Vec<DateTime<Utc>>,
}

/// Pick releases or tags and resolve the latest/previous deployments.
pub async fn resolve_deployments<S>(source: &S, max: u8) -> MetricsResult<DeploymentPair>
where
    S: DeliveryDataSource,
{
    let releases = source.list_releases(max).await;
    if !releases.is_empty() {
        debug!("Using {} releases as deployments", releases.len());
        return from_releases(source, &releases).await;
    }

    let tags = source.list_tags(max).await;
    if tags.is_empty() {
        return Err(MetricsError::NoDeploymentsFound);
    }

    debug!("No releases found, falling back to {} tags", tags.len());
    from_tags(source, &tags).await
}

async fn from_releases<S>(source: &S, releases: &[ReleaseRecord]) -> MetricsResult<DeploymentPair>
where
    S: DeliveryDataSource,
{
    let latest = resolve_release(source, &releases[0]).await?;
    let previous = match releases.get(1) {
        Some(release) => Some(resolve_release(source, release).await?),
        None => None,
    };

    let timeline = releases.iter().filter_map(|r| r.created_at).collect();

    Ok(DeploymentPair {
        source: DeploymentSource::Release,
        latest,
        previous,
        timeline,
    })
}

async fn resolve_release<S>(source: &S, release: &ReleaseRecord) -> MetricsResult<Deployment>
where
    S: DeliveryDataSource,
{
    let unresolved = || MetricsError::UnresolvedDeployment {
        tag: release.tag_name.clone(),
    };

    let created_at = release.created_at.ok_or_else(unresolved)?;
    let resolved = source
        .resolve_tag(&release.tag_name)
        .await
        .ok_or_else(unresolved)?;

    let name = if release.name.is_empty() {
        release.tag_name.clone()
    } else {
        release.name.clone()
    };

    Ok(Deployment {
        name,
        tag: release.tag_name.clone(),
        sha: resolved.sha,
        created_at,
    })
}

async fn from_tags<S>(source: &S, tags: &[TagRecord]) -> MetricsResult<DeploymentPair>
where
    S: DeliveryDataSource,
{
    // Every tag needs resolving anyway to get the window's timestamps.
    let resolved = join_all(tags.iter().map(|t| source.resolve_tag(&t.name))).await;

    let mut deployments = tags.iter().zip(resolved).map(|(tag, resolved)| {
        resolved.map(|r| Deployment {
            name: tag.name.clone(),
            tag: tag.name.clone(),
            sha: r.sha,
            created_at: r.created_at,
        })
    });

    let unresolved = |tag: &TagRecord| MetricsError::UnresolvedDeployment {
        tag: tag.name.clone(),
    };

    let latest = deployments
        .next()
        .flatten()
        .ok_or_else(|| unresolved(&tags[0]))?;
    let previous = match tags.get(1) {
        Some(tag) => Some(deployments.next().flatten().ok_or_else(|| unresolved(tag))?),
        None => None,
    };

    let mut timeline = vec![latest.created_at];
    timeline.extend(previous.as_ref().map(|d| d.created_at));
    for (tag, deployment) in tags.iter().skip(2).zip(deployments) {
        match deployment {
            Some(d) => timeline.push(d.created_at),
            None => warn!("Skipping tag {} in deploy window: could not resolve", tag.name),
        }
    }

    Ok(DeploymentPair {
        source: DeploymentSource::Tag,
        latest,
        previous,
        timeline,
    })
}
