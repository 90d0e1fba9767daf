//! Review timing: pickup, approval and merge delays

use serde::Serialize;

use super::rating::{APPROVE_TIME, MERGE_TIME, PICKUP_TIME, Rating};
use super::types::{PullRequestInfo, Review, ReviewState};
use super::util::{hours_between, round2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewTimeResult {
    /// Creation to first review by someone other than the author
    pub pickup_hours: Option<f64>,
    /// Creation to first approval
    pub approve_hours: Option<f64>,
    /// Creation to merge
    pub merge_hours: Option<f64>,
    pub pickup_rating: Rating,
    pub approve_rating: Rating,
    pub merge_rating: Rating,
}

impl Default for ReviewTimeResult {
    fn default() -> Self {
        Self {
            pickup_hours: None,
            approve_hours: None,
            merge_hours: None,
            pickup_rating: Rating::Unknown,
            approve_rating: Rating::Unknown,
            merge_rating: Rating::Unknown,
        }
    }
}

#[must_use]
pub fn calculate_review_time(pr: &PullRequestInfo, reviews: &[Review]) -> ReviewTimeResult {
    let submitted = reviews.iter().filter(|r| {
        r.state != ReviewState::Pending
            && (r.reviewer.is_none() || r.reviewer != pr.author)
    });

    let first_review = submitted.clone().filter_map(|r| r.submitted_at).min();
    let first_approval = submitted
        .filter(|r| r.state == ReviewState::Approved)
        .filter_map(|r| r.submitted_at)
        .min();

    let since_creation = |at| round2(hours_between(pr.created_at, at));
    let pickup_hours = first_review.map(since_creation);
    let approve_hours = first_approval.map(since_creation);
    let merge_hours = pr.merged_at.map(since_creation);

    ReviewTimeResult {
        pickup_hours,
        approve_hours,
        merge_hours,
        pickup_rating: PICKUP_TIME.rate(pickup_hours),
        approve_rating: APPROVE_TIME.rate(approve_hours),
        merge_rating: MERGE_TIME.rate(merge_hours),
    }
}
