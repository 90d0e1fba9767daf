//! Pull request maturity
//!
//! Maturity is the share of a pull request's final diff that was already in
//! place before the first commit pushed meaningfully after the PR was
//! opened. Short-circuit branches are an ordered table of guards; the first
//! guard that matches decides. Only the general case needs a diff from the
//! data source, and it is requested after the baseline has been chosen.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::Serialize;

use super::file_filter::{ChangeTotals, FileFilter};
use super::rating::{PR_MATURITY, Rating};
use super::source::DeliveryDataSource;
use super::types::{Commit, FileChange};

/// Commits within this many minutes of PR creation belong to the initial
/// submission.
pub const GRACE_PERIOD_MINUTES: i64 = 5;

const REASON_SINGLE_COMMIT: &str = "Single commit PR";
const REASON_WITHIN_GRACE: &str = "All commits within grace period or pre-existing";
const REASON_NO_SIGNIFICANT: &str = "No significant commits after PR publication";
const REASON_CALCULATED: &str = "Calculated based on meaningful commits after publication";

const ERROR_FETCH: &str = "Failed to fetch pull request details, commits or files";
const ERROR_DIFF: &str = "Failed to compare baseline commit with last commit";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrMaturityResult {
    pub maturity_ratio: Option<f64>,
    pub maturity_percentage: Option<u8>,
    pub rating: Rating,
    pub details: MaturityDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MaturityDetails {
    Calculated(MaturityBreakdown),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaturityBreakdown {
    pub total_commits: usize,
    pub total_changes: u64,
    pub changes_after_publication: u64,
    pub stable_changes: u64,
    pub first_commit_sha: String,
    pub last_commit_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_commit_sha: Option<String>,
    pub reason: String,
}

impl PrMaturityResult {
    /// Result for data that could not be obtained. Never carries a ratio.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            maturity_ratio: None,
            maturity_percentage: None,
            rating: Rating::Unknown,
            details: MaturityDetails::Failed {
                error: error.into(),
            },
        }
    }

    fn fully_mature(breakdown: MaturityBreakdown) -> Self {
        Self {
            maturity_ratio: Some(1.0),
            maturity_percentage: Some(100),
            rating: PR_MATURITY.rate(Some(100.0)),
            details: MaturityDetails::Calculated(breakdown),
        }
    }

    #[must_use]
    pub fn breakdown(&self) -> Option<&MaturityBreakdown> {
        match &self.details {
            MaturityDetails::Calculated(b) => Some(b),
            MaturityDetails::Failed { .. } => None,
        }
    }
}

/// PR commits in the order the source lists them, relative to PR creation.
///
/// The list is not re-sorted: its last entry is the PR head whatever its date.
struct Timeline<'a> {
    created_at: DateTime<Utc>,
    commits: &'a [Commit],
}

impl<'a> Timeline<'a> {
    fn new(created_at: DateTime<Utc>, commits: &'a [Commit]) -> Self {
        Self {
            created_at,
            commits,
        }
    }

    fn grace() -> Duration {
        Duration::minutes(GRACE_PERIOD_MINUTES)
    }

    /// Within the grace window either side of creation, or older than the PR.
    /// Undated commits count as pre-existing.
    fn within_grace(&self, commit: &Commit) -> bool {
        commit.authored_or_committed().is_none_or(|at| {
            let delta = at - self.created_at;
            delta.abs() <= Self::grace() || at < self.created_at
        })
    }

    /// Strictly more than the grace period after creation.
    fn is_significant(&self, commit: &Commit) -> bool {
        commit
            .authored_or_committed()
            .is_some_and(|at| at - self.created_at > Self::grace())
    }

    fn first_significant(&self) -> Option<usize> {
        self.commits.iter().position(|c| self.is_significant(c))
    }
}

type Guard = fn(&Timeline<'_>) -> bool;

fn is_single_commit(timeline: &Timeline<'_>) -> bool {
    timeline.commits.len() == 1
}

fn all_within_grace(timeline: &Timeline<'_>) -> bool {
    timeline.commits.iter().all(|c| timeline.within_grace(c))
}

fn no_significant_commits(timeline: &Timeline<'_>) -> bool {
    timeline.first_significant().is_none()
}

/// Short-circuit branches in priority order.
const SHORT_CIRCUITS: [(Guard, &str); 3] = [
    (is_single_commit, REASON_SINGLE_COMMIT),
    (all_within_grace, REASON_WITHIN_GRACE),
    (no_significant_commits, REASON_NO_SIGNIFICANT),
];

/// What remains to be done after looking at the commits alone.
#[derive(Debug, Clone, PartialEq)]
pub enum MaturityPlan {
    /// A short-circuit branch decided the result
    Decided(PrMaturityResult),
    /// General case: diff `baseline_sha..last_sha` to finish
    CompareFromBaseline {
        total_commits: usize,
        total_changes: u64,
        first_commit_sha: String,
        baseline_sha: String,
        last_sha: String,
    },
}

/// Evaluate the decision table for a PR's commits.
///
/// `commits` should be non-empty; an empty list is a fetch failure.
#[must_use]
pub fn plan_maturity(
    created_at: DateTime<Utc>,
    commits: &[Commit],
    totals: ChangeTotals,
) -> MaturityPlan {
    let timeline = Timeline::new(created_at, commits);
    let (Some(first), Some(last)) = (timeline.commits.first(), timeline.commits.last()) else {
        return MaturityPlan::Decided(PrMaturityResult::failed(ERROR_FETCH));
    };

    if let Some((_, reason)) = SHORT_CIRCUITS.iter().find(|(guard, _)| guard(&timeline)) {
        debug!("Maturity short-circuit: {reason}");
        return MaturityPlan::Decided(PrMaturityResult::fully_mature(MaturityBreakdown {
            total_commits: commits.len(),
            total_changes: totals.total_changes,
            changes_after_publication: 0,
            stable_changes: totals.total_changes,
            first_commit_sha: first.sha.clone(),
            last_commit_sha: last.sha.clone(),
            baseline_commit_sha: None,
            reason: (*reason).to_string(),
        }));
    }

    // The no-significant guard above guarantees a significant commit.
    let index = timeline.first_significant().unwrap_or(0);
    let baseline = &timeline.commits[index.saturating_sub(1)];

    MaturityPlan::CompareFromBaseline {
        total_commits: commits.len(),
        total_changes: totals.total_changes,
        first_commit_sha: first.sha.clone(),
        baseline_sha: baseline.sha.clone(),
        last_sha: last.sha.clone(),
    }
}

/// Finish the general case from the baseline-to-last diff.
///
/// The diff is summed unfiltered while `total_changes` is filtered, so the
/// post-publication count can exceed the total; stable changes floor at 0.
#[must_use]
pub fn complete_maturity(plan: MaturityPlan, diff: Option<&[FileChange]>) -> PrMaturityResult {
    let (total_commits, total_changes, first_commit_sha, baseline_sha, last_sha) = match plan {
        MaturityPlan::Decided(result) => return result,
        MaturityPlan::CompareFromBaseline {
            total_commits,
            total_changes,
            first_commit_sha,
            baseline_sha,
            last_sha,
        } => (
            total_commits,
            total_changes,
            first_commit_sha,
            baseline_sha,
            last_sha,
        ),
    };

    let Some(diff) = diff else {
        return PrMaturityResult::failed(ERROR_DIFF);
    };

    let changes_after_publication: u64 = diff.iter().map(FileChange::changes).sum();
    let stable_changes = total_changes.saturating_sub(changes_after_publication);
    let ratio = if total_changes == 0 {
        1.0
    } else {
        stable_changes as f64 / total_changes as f64
    };
    let percentage = (ratio * 100.0).round() as u8;

    PrMaturityResult {
        maturity_ratio: Some(ratio),
        maturity_percentage: Some(percentage),
        rating: PR_MATURITY.rate(Some(f64::from(percentage))),
        details: MaturityDetails::Calculated(MaturityBreakdown {
            total_commits,
            total_changes,
            changes_after_publication,
            stable_changes,
            first_commit_sha,
            last_commit_sha: last_sha,
            baseline_commit_sha: Some(baseline_sha),
            reason: REASON_CALCULATED.to_string(),
        }),
    }
}

/// Compute maturity for a PR whose snapshots may be missing.
///
/// `created_at`, `commits` and `files` are `None` when their fetch failed.
pub async fn calculate_pr_maturity<S>(
    source: &S,
    created_at: Option<DateTime<Utc>>,
    commits: Option<&[Commit]>,
    files: Option<&[FileChange]>,
    filter: &FileFilter,
) -> PrMaturityResult
where
    S: DeliveryDataSource,
{
    let (Some(created_at), Some(commits), Some(files)) = (created_at, commits, files) else {
        return PrMaturityResult::failed(ERROR_FETCH);
    };

    let plan = plan_maturity(created_at, commits, filter.totals(files));
    let diff = match &plan {
        MaturityPlan::Decided(_) => None,
        MaturityPlan::CompareFromBaseline {
            baseline_sha,
            last_sha,
            ..
        } => source.compare_commits_diff(baseline_sha, last_sha).await,
    };

    complete_maturity(plan, diff.as_deref())
}
