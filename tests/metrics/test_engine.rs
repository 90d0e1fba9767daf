//! End-to-end engine tests against an in-memory source.

use super::fake_source::{FakeSource, commit, file, pull_request, release, review, ts};
use delivery_metrics::metrics::{
    CommitComparison, DeploymentSource, EngineOptions, FileFilter, MaturityDetails,
    MetricsEngine, PrSize, Rating, ReviewState, TimePeriod,
};

const NOW: &str = "2024-01-31T00:00:00Z";

fn repository() -> FakeSource {
    let mut source = FakeSource::new()
        .resolve("v1.1.0", "sha-latest", "2024-01-20T00:00:00Z")
        .resolve("v1.0.0", "sha-prev", "2024-01-13T00:00:00Z")
        .with_pull_request(
            pull_request(7, "alice", "2024-01-15T10:00:00Z", Some("2024-01-16T10:00:00Z")),
            vec![
                commit("c1", "2024-01-15T09:00:00Z"),
                commit("c2", "2024-01-15T12:00:00Z"),
                commit("c3", "2024-01-15T14:00:00Z"),
            ],
            vec![file("src/lib.rs", 100, 15), file("Cargo.lock", 900, 0)],
            vec![review("bob", ReviewState::Approved, "2024-01-15T11:00:00Z")],
        )
        .with_pull_request(
            pull_request(8, "bob", "2024-01-18T08:00:00Z", Some("2024-01-18T09:00:00Z")),
            vec![commit("d1", "2024-01-18T07:59:00Z")],
            vec![file("README.md", 4, 1)],
            vec![],
        )
        .with_diff("c1", "c3", vec![file("src/lib.rs", 15, 5)]);

    source.releases = vec![
        release("v1.1.0", "2024-01-20T00:00:00Z"),
        release("v1.0.0", "2024-01-13T00:00:00Z"),
    ];
    source.comparisons.insert(
        ("sha-prev".to_string(), "sha-latest".to_string()),
        CommitComparison {
            commits: vec![
                commit("c1", "2024-01-15T09:00:00Z"),
                commit("d1", "2024-01-18T07:59:00Z"),
            ],
            truncated: false,
        },
    );
    source.merged = vec![
        source.pull_requests[&8].clone(),
        source.pull_requests[&7].clone(),
    ];
    source
}

fn options() -> EngineOptions {
    EngineOptions {
        file_filter: FileFilter::new(["*.lock"], false, false).unwrap(),
        period: TimePeriod::Month,
        ..EngineOptions::default()
    }
}

#[tokio::test]
async fn test_full_report() {
    let engine = MetricsEngine::new(repository(), options());

    let report = engine.report(ts(NOW), &[]).await;

    let deployment = report.deployment.as_ref().unwrap();
    assert_eq!(deployment.source, DeploymentSource::Release);
    assert_eq!(deployment.latest.sha, "sha-latest");
    assert!(report.deployment_error.is_none());

    let frequency = report.deploy_frequency.unwrap();
    assert_eq!(frequency.deploy_count, 2);
    assert_eq!(frequency.deploys_per_week, Some(2.0));

    let cycle = report.cycle_time.as_ref().unwrap();
    assert_eq!(cycle.commit_count, 2);
    assert_eq!(cycle.oldest_commit_sha.as_deref(), Some("c1"));
    assert_eq!(cycle.newest_commit_sha.as_deref(), Some("d1"));

    assert_eq!(report.pull_requests.len(), 2);
    let pr7 = report.pull_requests.iter().find(|pr| pr.number == 7).unwrap();
    assert_eq!(pr7.maturity.maturity_percentage, Some(83));
    assert_eq!(pr7.size.as_ref().unwrap().size, PrSize::M);
    assert_eq!(pr7.review.approve_hours, Some(1.0));
    assert_eq!(pr7.review.merge_hours, Some(24.0));

    let pr8 = report.pull_requests.iter().find(|pr| pr.number == 8).unwrap();
    assert_eq!(pr8.maturity.maturity_percentage, Some(100));
    assert_eq!(
        pr8.maturity.breakdown().unwrap().reason,
        "Single commit PR"
    );
    assert_eq!(pr8.size.as_ref().unwrap().size, PrSize::S);

    assert_eq!(report.team.pr_count, 2);
    assert_eq!(report.team.contributor_count, 2);
    assert_eq!(report.team.avg_maturity_percentage, Some(91.5));
    assert_eq!(report.team.ratings.pr_maturity, Rating::Elite);
    assert_eq!(report.team.ratings.deploy_frequency, frequency.rating);
}

#[tokio::test]
async fn test_deployment_failure_does_not_block_pull_requests() {
    let mut source = repository();
    source.releases.clear();
    let engine = MetricsEngine::new(source, options());

    let report = engine.report(ts(NOW), &[8]).await;

    assert!(report.deployment.is_none());
    assert!(report.cycle_time.is_none());
    assert_eq!(
        report.deployment_error.as_deref(),
        Some("No releases or tags found to use as deployments")
    );
    assert_eq!(report.pull_requests.len(), 1);
    assert_eq!(report.team.ratings.deploy_frequency, Rating::Unknown);
}

#[tokio::test]
async fn test_explicit_numbers_skip_listing() {
    let engine = MetricsEngine::new(repository(), options());

    let prs = engine.pull_requests_metrics(ts(NOW), &[7]).await;

    assert_eq!(prs.len(), 1);
    assert_eq!(prs[0].number, 7);
    assert_eq!(prs[0].author.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_missing_pull_request_is_reported_as_failed() {
    let engine = MetricsEngine::new(repository(), options());

    let metrics = engine.pull_request_metrics(404).await;

    assert!(metrics.size.is_none());
    assert_eq!(metrics.maturity.maturity_percentage, None);
    assert!(matches!(
        metrics.maturity.details,
        MaturityDetails::Failed { ref error } if error.contains("#404")
    ));
}

#[tokio::test]
async fn test_missing_files_leave_size_empty() {
    let mut source = repository();
    source.pr_files.remove(&8);
    let engine = MetricsEngine::new(source, options());

    let metrics = engine.pull_request_metrics(8).await;

    assert!(metrics.size.is_none());
    assert!(matches!(metrics.maturity.details, MaturityDetails::Failed { .. }));
    assert_eq!(metrics.review.merge_hours, Some(1.0));
}

#[tokio::test]
async fn test_report_serializes() {
    let engine = MetricsEngine::new(repository(), options());
    let mut report = engine.report(ts(NOW), &[]).await;
    report.repository = Some("octo/widgets".to_string());

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["repository"], "octo/widgets");
    assert_eq!(json["deployment"]["source"], "release");
    assert!(json["deployment"].get("timeline").is_none());
    assert_eq!(json["team"]["period"], "month");
    assert!(json["pull_requests"][0]["size"]["size"].is_string());
}

#[tokio::test]
async fn test_team_metrics_use_engine_period() {
    let engine = MetricsEngine::new(
        repository(),
        EngineOptions {
            period: TimePeriod::Week,
            ..options()
        },
    );

    let prs = engine.pull_requests_metrics(ts(NOW), &[8]).await;
    let team = engine.team_metrics(&prs, ts(NOW), None, None);

    assert_eq!(team.period, TimePeriod::Week);
    assert_eq!(team.window_end, ts(NOW));
    assert_eq!(team.window_start, ts("2024-01-24T00:00:00Z"));
    assert_eq!(team.pr_count, 1);
    // PR 8 merged on the 18th, before the week began
    assert_eq!(team.merged_pr_count, 0);
    assert_eq!(team.contributor_count, 0);
    assert_eq!(team.merge_frequency, None);
    assert_eq!(team.ratings.merge_frequency, Rating::Unknown);
}
