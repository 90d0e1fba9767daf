//! Draft handling when listing releases.

use delivery_metrics::github::models::ReleaseEntry;
use delivery_metrics::github::source::published_releases;
use delivery_metrics::GitHubError;
use futures::stream;

fn entry(tag: &str, draft: bool) -> Result<ReleaseEntry, GitHubError> {
    Ok(ReleaseEntry {
        name: Some(tag.to_string()),
        tag_name: tag.to_string(),
        draft,
        created_at: None,
        published_at: None,
    })
}

fn tags(releases: &[delivery_metrics::metrics::ReleaseRecord]) -> Vec<&str> {
    releases.iter().map(|r| r.tag_name.as_str()).collect()
}

#[tokio::test]
async fn test_drafts_do_not_count_towards_max() {
    let listing = stream::iter(vec![
        entry("v4-draft", true),
        entry("v3", false),
        entry("v2-draft", true),
        entry("v2", false),
        entry("v1", false),
    ]);

    let releases = published_releases(listing, 2).await.unwrap();

    assert_eq!(tags(&releases), vec!["v3", "v2"]);
}

#[tokio::test]
async fn test_short_listing_returns_what_is_published() {
    let listing = stream::iter(vec![entry("v2-draft", true), entry("v1", false)]);

    let releases = published_releases(listing, 10).await.unwrap();

    assert_eq!(tags(&releases), vec!["v1"]);
}

#[tokio::test]
async fn test_reading_stops_once_enough_are_published() {
    let listing = stream::iter(vec![
        entry("v2", false),
        entry("v1", false),
        Err(GitHubError::Api("second page failed".to_string())),
    ]);

    let releases = published_releases(listing, 2).await.unwrap();

    assert_eq!(tags(&releases), vec!["v2", "v1"]);
}

#[tokio::test]
async fn test_failed_page_before_max_is_an_error() {
    let listing = stream::iter(vec![
        entry("v1-draft", true),
        Err(GitHubError::Api("second page failed".to_string())),
    ]);

    let result = published_releases(listing, 2).await;

    assert!(matches!(result, Err(GitHubError::Api(_))));
}
