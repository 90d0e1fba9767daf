//! Tests for deployment source resolution.

use super::fake_source::{FakeSource, release, ts};
use delivery_metrics::metrics::{
    DeploymentSource, MetricsError, calculate_deploy_frequency, resolve_deployments,
};

#[tokio::test]
async fn test_falls_back_to_tags_without_releases() {
    let source = FakeSource::new()
        .with_tag("v1.1.0", "sha-b", "2024-02-01T00:00:00Z")
        .with_tag("v1.0.0", "sha-a", "2024-01-01T00:00:00Z");

    let pair = resolve_deployments(&source, 10).await.unwrap();

    assert_eq!(pair.source, DeploymentSource::Tag);
    assert_eq!(pair.latest.tag, "v1.1.0");
    assert_eq!(pair.latest.sha, "sha-b");
    assert_eq!(pair.latest.created_at, ts("2024-02-01T00:00:00Z"));
    let previous = pair.previous.unwrap();
    assert_eq!(previous.tag, "v1.0.0");
    assert_eq!(pair.timeline.len(), 2);
}

#[tokio::test]
async fn test_releases_take_precedence_over_tags() {
    let mut source = FakeSource::new()
        .with_tag("v9.9.9", "sha-tag", "2024-03-01T00:00:00Z")
        .resolve("v2.0.0", "sha-2", "2024-02-03T00:00:00Z")
        .resolve("v1.0.0", "sha-1", "2024-01-03T00:00:00Z");
    source.releases = vec![
        release("v2.0.0", "2024-02-01T00:00:00Z"),
        release("v1.0.0", "2024-01-01T00:00:00Z"),
    ];

    let pair = resolve_deployments(&source, 10).await.unwrap();

    assert_eq!(pair.source, DeploymentSource::Release);
    assert_eq!(pair.latest.tag, "v2.0.0");
    assert_eq!(pair.latest.name, "Release v2.0.0");
    assert_eq!(pair.latest.sha, "sha-2");
    // Release timestamp, not the tag's
    assert_eq!(pair.latest.created_at, ts("2024-02-01T00:00:00Z"));
    assert_eq!(pair.previous.unwrap().sha, "sha-1");
    assert!(!source.calls().contains(&"tags".to_string()));
}

#[tokio::test]
async fn test_single_release_has_no_previous() {
    let mut source = FakeSource::new().resolve("v1.0.0", "sha-1", "2024-01-01T00:00:00Z");
    source.releases = vec![release("v1.0.0", "2024-01-01T00:00:00Z")];

    let pair = resolve_deployments(&source, 10).await.unwrap();

    assert_eq!(pair.latest.sha, "sha-1");
    assert!(pair.previous.is_none());
}

#[tokio::test]
async fn test_no_releases_or_tags_is_an_error() {
    let source = FakeSource::new();

    let err = resolve_deployments(&source, 10).await.unwrap_err();

    assert!(matches!(err, MetricsError::NoDeploymentsFound));
}

#[tokio::test]
async fn test_unresolvable_release_is_rejected() {
    let mut source = FakeSource::new();
    source.releases = vec![release("v1.0.0", "2024-01-01T00:00:00Z")];

    let err = resolve_deployments(&source, 10).await.unwrap_err();

    assert!(matches!(err, MetricsError::UnresolvedDeployment { tag } if tag == "v1.0.0"));
}

#[tokio::test]
async fn test_unresolvable_previous_tag_is_rejected() {
    let mut source = FakeSource::new().with_tag("v2", "sha-2", "2024-02-01T00:00:00Z");
    source.tags.push(delivery_metrics::metrics::TagRecord {
        name: "v1".to_string(),
    });

    let err = resolve_deployments(&source, 10).await.unwrap_err();

    assert!(matches!(err, MetricsError::UnresolvedDeployment { tag } if tag == "v1"));
}

#[tokio::test]
async fn test_older_unresolvable_tags_are_skipped() {
    let mut source = FakeSource::new()
        .with_tag("v3", "sha-3", "2024-03-01T00:00:00Z")
        .with_tag("v2", "sha-2", "2024-02-01T00:00:00Z");
    source.tags.push(delivery_metrics::metrics::TagRecord {
        name: "v1".to_string(),
    });
    let source = source.with_tag("v0", "sha-0", "2024-01-01T00:00:00Z");

    let pair = resolve_deployments(&source, 10).await.unwrap();

    assert_eq!(
        pair.timeline,
        vec![
            ts("2024-03-01T00:00:00Z"),
            ts("2024-02-01T00:00:00Z"),
            ts("2024-01-01T00:00:00Z"),
        ]
    );
    // Four tags listed, three counted as deployments.
    assert_eq!(calculate_deploy_frequency(&pair.timeline).deploy_count, 3);
}

#[tokio::test]
async fn test_window_is_capped() {
    let source = FakeSource::new()
        .with_tag("v3", "sha-3", "2024-03-01T00:00:00Z")
        .with_tag("v2", "sha-2", "2024-02-01T00:00:00Z")
        .with_tag("v1", "sha-1", "2024-01-01T00:00:00Z");

    let pair = resolve_deployments(&source, 2).await.unwrap();

    assert_eq!(pair.timeline.len(), 2);
    assert!(!source.calls().contains(&"resolve:v1".to_string()));
}
