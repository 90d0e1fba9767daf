//! Period-level aggregation of pull request and deployment metrics

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::cycle_time::CycleTimeResult;
use super::deploy_frequency::DeployFrequencyResult;
use super::engine::PullRequestMetrics;
use super::period::TimePeriod;
use super::pr_size::PrSize;
use super::rating::{
    APPROVE_TIME, MERGE_FREQUENCY, MERGE_TIME, PICKUP_TIME, PR_MATURITY, PR_SIZE, Rating,
};
use super::util::{mean, round2};

/// Number of PRs per size tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeDistribution {
    pub s: usize,
    pub m: usize,
    pub l: usize,
    pub xl: usize,
}

impl SizeDistribution {
    fn record(&mut self, size: PrSize) {
        match size {
            PrSize::S => self.s += 1,
            PrSize::M => self.m += 1,
            PrSize::L => self.l += 1,
            PrSize::Xl => self.xl += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamRatings {
    pub pickup_time: Rating,
    pub approve_time: Rating,
    pub merge_time: Rating,
    pub merge_frequency: Rating,
    pub pr_size: Rating,
    pub pr_maturity: Rating,
    pub deploy_frequency: Rating,
    pub cycle_time: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMetrics {
    pub period: TimePeriod,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub pr_count: usize,
    pub merged_pr_count: usize,
    pub contributor_count: usize,
    pub avg_pickup_hours: Option<f64>,
    pub avg_approve_hours: Option<f64>,
    pub avg_merge_hours: Option<f64>,
    pub avg_pr_changes: Option<f64>,
    pub avg_maturity_percentage: Option<f64>,
    pub size_distribution: SizeDistribution,
    /// Merged PRs per contributor per week
    pub merge_frequency: Option<f64>,
    pub ratings: TeamRatings,
}

/// Reduce per-PR results into period averages and distributions.
///
/// Averages cover every PR passed in and skip absent values. Merge frequency
/// and the contributor count only consider PRs merged inside the window.
#[must_use]
pub fn aggregate_team(
    prs: &[PullRequestMetrics],
    period: TimePeriod,
    now: DateTime<Utc>,
    deploy_frequency: Option<&DeployFrequencyResult>,
    cycle_time: Option<&CycleTimeResult>,
) -> TeamMetrics {
    let (window_start, window_end) = period.window(now);

    let merged: Vec<&PullRequestMetrics> = prs
        .iter()
        .filter(|pr| {
            pr.merged_at
                .is_some_and(|at| at >= window_start && at <= window_end)
        })
        .collect();

    let contributors: HashSet<&str> = merged.iter().filter_map(|pr| pr.author.as_deref()).collect();
    let merge_frequency = (!contributors.is_empty()).then(|| {
        round2(merged.len() as f64 / contributors.len() as f64 / period.weeks())
    });

    let avg = |values: Vec<f64>| mean(values).map(round2);
    let avg_pickup_hours = avg(prs.iter().filter_map(|pr| pr.review.pickup_hours).collect());
    let avg_approve_hours = avg(prs.iter().filter_map(|pr| pr.review.approve_hours).collect());
    let avg_merge_hours = avg(prs.iter().filter_map(|pr| pr.review.merge_hours).collect());
    let avg_pr_changes = avg(
        prs.iter()
            .filter_map(|pr| pr.size.as_ref())
            .map(|size| size.details.total_changes as f64)
            .collect(),
    );
    let avg_maturity_percentage = avg(
        prs.iter()
            .filter_map(|pr| pr.maturity.maturity_percentage)
            .map(f64::from)
            .collect(),
    );

    let mut size_distribution = SizeDistribution::default();
    for size in prs.iter().filter_map(|pr| pr.size.as_ref()) {
        size_distribution.record(size.size);
    }

    let ratings = TeamRatings {
        pickup_time: PICKUP_TIME.rate(avg_pickup_hours),
        approve_time: APPROVE_TIME.rate(avg_approve_hours),
        merge_time: MERGE_TIME.rate(avg_merge_hours),
        merge_frequency: MERGE_FREQUENCY.rate(merge_frequency),
        pr_size: PR_SIZE.rate(avg_pr_changes),
        pr_maturity: PR_MATURITY.rate(avg_maturity_percentage),
        deploy_frequency: deploy_frequency.map_or(Rating::Unknown, |d| d.rating),
        cycle_time: cycle_time.map_or(Rating::Unknown, |c| c.rating),
    };

    TeamMetrics {
        period,
        window_start,
        window_end,
        pr_count: prs.len(),
        merged_pr_count: merged.len(),
        contributor_count: contributors.len(),
        avg_pickup_hours,
        avg_approve_hours,
        avg_merge_hours,
        avg_pr_changes,
        avg_maturity_percentage,
        size_distribution,
        merge_frequency,
        ratings,
    }
}
