//! Tests for period-level aggregation.

use super::fake_source::ts;
use delivery_metrics::metrics::{
    ChangeTotals, DeployFrequencyResult, PrMaturityResult, PrSize, PrSizeResult,
    PullRequestMetrics, Rating, ReviewTimeResult, SizeDistribution, TimePeriod, aggregate_team,
};

const NOW: &str = "2024-03-31T00:00:00Z";

fn pr_metrics(
    number: u64,
    author: &str,
    merged: Option<&str>,
    changes: u64,
    size: PrSize,
    pickup: Option<f64>,
) -> PullRequestMetrics {
    PullRequestMetrics {
        number,
        author: Some(author.to_string()),
        created_at: Some(ts("2024-03-01T00:00:00Z")),
        merged_at: merged.map(ts),
        size: Some(PrSizeResult {
            size,
            category: size.category().to_string(),
            rating: size.rating(),
            details: ChangeTotals {
                total_additions: changes,
                total_deletions: 0,
                total_changes: changes,
                files_changed: 1,
            },
        }),
        maturity: PrMaturityResult::failed("not computed"),
        review: ReviewTimeResult {
            pickup_hours: pickup,
            ..ReviewTimeResult::default()
        },
    }
}

#[test]
fn test_empty_period() {
    let team = aggregate_team(&[], TimePeriod::Week, ts(NOW), None, None);

    assert_eq!(team.pr_count, 0);
    assert_eq!(team.merge_frequency, None);
    assert_eq!(team.avg_pickup_hours, None);
    assert_eq!(team.size_distribution, SizeDistribution::default());
    assert_eq!(team.ratings.merge_frequency, Rating::Unknown);
    assert_eq!(team.ratings.deploy_frequency, Rating::Unknown);
    assert_eq!(team.window_end, ts(NOW));
}

#[test]
fn test_averages_and_distribution() {
    let prs = vec![
        pr_metrics(1, "alice", Some("2024-03-20T00:00:00Z"), 50, PrSize::S, Some(1.0)),
        pr_metrics(2, "bob", Some("2024-03-21T00:00:00Z"), 150, PrSize::M, Some(3.0)),
        pr_metrics(3, "alice", None, 700, PrSize::Xl, None),
    ];

    let team = aggregate_team(&prs, TimePeriod::Month, ts(NOW), None, None);

    assert_eq!(team.pr_count, 3);
    assert_eq!(team.avg_pickup_hours, Some(2.0));
    assert_eq!(team.avg_pr_changes, Some(300.0));
    assert_eq!(team.avg_maturity_percentage, None);
    assert_eq!(
        team.size_distribution,
        SizeDistribution {
            s: 1,
            m: 1,
            l: 0,
            xl: 1
        }
    );
    assert_eq!(team.ratings.pickup_time, Rating::Good);
    assert_eq!(team.ratings.pr_size, Rating::Good);
    assert_eq!(team.ratings.pr_maturity, Rating::Unknown);
}

#[test]
fn test_merge_frequency_per_contributor_per_week() {
    let prs = vec![
        pr_metrics(1, "alice", Some("2024-03-25T00:00:00Z"), 10, PrSize::S, None),
        pr_metrics(2, "alice", Some("2024-03-26T00:00:00Z"), 10, PrSize::S, None),
        pr_metrics(3, "bob", Some("2024-03-27T00:00:00Z"), 10, PrSize::S, None),
        pr_metrics(4, "bob", Some("2024-03-28T00:00:00Z"), 10, PrSize::S, None),
        // Merged before the window opens
        pr_metrics(5, "carol", Some("2024-03-01T00:00:00Z"), 10, PrSize::S, None),
    ];

    let team = aggregate_team(&prs, TimePeriod::Week, ts(NOW), None, None);

    assert_eq!(team.merged_pr_count, 4);
    assert_eq!(team.contributor_count, 2);
    assert_eq!(team.merge_frequency, Some(2.0));
    assert_eq!(team.ratings.merge_frequency, Rating::Good);
}

#[test]
fn test_carries_deployment_ratings() {
    let deploy = DeployFrequencyResult {
        deploy_count: 10,
        deploys_per_week: Some(10.0),
        rating: Rating::Elite,
    };

    let team = aggregate_team(&[], TimePeriod::Month, ts(NOW), Some(&deploy), None);

    assert_eq!(team.ratings.deploy_frequency, Rating::Elite);
    assert_eq!(team.ratings.cycle_time, Rating::Unknown);
}
