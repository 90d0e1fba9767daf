//! Deployment frequency normalized to a weekly rate

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::rating::{DEPLOY_FREQUENCY, Rating};
use super::util::{days_between, round2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeployFrequencyResult {
    pub deploy_count: usize,
    /// `None` with fewer than two deployments or a zero-length window
    pub deploys_per_week: Option<f64>,
    pub rating: Rating,
}

/// Deployments per week over the whole fetched window.
///
/// The span runs from the oldest to the newest timestamp, regardless of the
/// order they are passed in.
#[must_use]
pub fn calculate_deploy_frequency(timeline: &[DateTime<Utc>]) -> DeployFrequencyResult {
    let deploy_count = timeline.len();

    let deploys_per_week = match (timeline.iter().min(), timeline.iter().max()) {
        (Some(oldest), Some(newest)) if deploy_count >= 2 => {
            let weeks = days_between(*oldest, *newest) / 7.0;
            (weeks > 0.0).then(|| round2(deploy_count as f64 / weeks))
        }
        _ => None,
    };

    DeployFrequencyResult {
        deploy_count,
        deploys_per_week,
        rating: DEPLOY_FREQUENCY.rate(deploys_per_week),
    }
}
