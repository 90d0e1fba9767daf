//! Lead time for change
//!
//! Ages every commit shipped by the latest deployment against the
//! deployment timestamp. Average and oldest always cover merge commits; the
//! newest age skips them unless merges are explicitly included, since a merge
//! made by tooling would understate the freshest authored change.

use log::{debug, warn};
use serde::Serialize;

use super::rating::{CYCLE_TIME, Rating};
use super::source::DeliveryDataSource;
use super::types::{Commit, Deployment};
use super::util::{hours_between, mean, round2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleTimeResult {
    pub commit_count: usize,
    pub avg_hours: Option<f64>,
    pub oldest_hours: Option<f64>,
    pub newest_hours: Option<f64>,
    pub oldest_commit_sha: Option<String>,
    pub newest_commit_sha: Option<String>,
    pub newest_excludes_merges: bool,
    pub rating: Rating,
}

impl CycleTimeResult {
    fn empty(newest_excludes_merges: bool) -> Self {
        Self {
            commit_count: 0,
            avg_hours: None,
            oldest_hours: None,
            newest_hours: None,
            oldest_commit_sha: None,
            newest_commit_sha: None,
            newest_excludes_merges,
            rating: Rating::Unknown,
        }
    }
}

/// Commits shipped by `latest`: the `previous..latest` range, or just the
/// latest commit when there is no previous deployment.
pub async fn collect_release_commits<S>(
    source: &S,
    latest: &Deployment,
    previous: Option<&Deployment>,
) -> Vec<Commit>
where
    S: DeliveryDataSource,
{
    match previous {
        Some(previous) => match source.compare_commits(&previous.sha, &latest.sha).await {
            Some(comparison) => {
                if comparison.truncated {
                    warn!(
                        "Comparison {}...{} was truncated; cycle time covers {} commits",
                        previous.tag,
                        latest.tag,
                        comparison.commits.len()
                    );
                }
                comparison.commits
            }
            None => Vec::new(),
        },
        None => source.get_commit(&latest.sha).await.into_iter().collect(),
    }
}

/// Compute lead time statistics for `commits` relative to `latest`.
///
/// Commits without any date are skipped. Ages are not clamped: a commit
/// dated after the deployment yields a negative age.
#[must_use]
pub fn calculate_cycle_time(
    latest: &Deployment,
    commits: &[Commit],
    include_merge_commits: bool,
) -> CycleTimeResult {
    let newest_excludes_merges = !include_merge_commits;

    let aged: Vec<(&Commit, f64)> = commits
        .iter()
        .filter_map(|c| {
            c.committed_or_authored()
                .map(|at| (c, hours_between(at, latest.created_at)))
        })
        .collect();

    if aged.is_empty() {
        return CycleTimeResult::empty(newest_excludes_merges);
    }

    let avg_hours = mean(aged.iter().map(|(_, age)| *age));
    let oldest = aged.iter().max_by(|a, b| a.1.total_cmp(&b.1));

    let non_merge: Vec<&(&Commit, f64)> = aged.iter().filter(|(c, _)| !c.is_merge()).collect();
    let newest = if include_merge_commits || non_merge.is_empty() {
        if !include_merge_commits {
            debug!("Every commit in range is a merge; newest lead time includes merges");
        }
        aged.iter().min_by(|a, b| a.1.total_cmp(&b.1))
    } else {
        non_merge
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    };

    let avg_hours = avg_hours.map(round2);

    CycleTimeResult {
        commit_count: aged.len(),
        avg_hours,
        oldest_hours: oldest.map(|(_, age)| round2(*age)),
        newest_hours: newest.map(|(_, age)| round2(*age)),
        oldest_commit_sha: oldest.map(|(c, _)| c.sha.clone()),
        newest_commit_sha: newest.map(|(c, _)| c.sha.clone()),
        newest_excludes_merges,
        rating: CYCLE_TIME.rate(avg_hours),
    }
}
