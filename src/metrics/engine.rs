//! Metrics engine
//!
//! Wires the calculators to a data source. The engine holds read-only
//! options and no mutable state, so one instance can serve any number of
//! concurrent computations.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use serde::Serialize;

use super::cycle_time::{CycleTimeResult, calculate_cycle_time, collect_release_commits};
use super::deploy_frequency::{DeployFrequencyResult, calculate_deploy_frequency};
use super::deployments::{DeploymentPair, resolve_deployments};
use super::error::MetricsResult;
use super::file_filter::FileFilter;
use super::maturity::{PrMaturityResult, calculate_pr_maturity};
use super::period::TimePeriod;
use super::pr_size::{PrSizeResult, SizeThresholds, classify_pr_size};
use super::review_time::{ReviewTimeResult, calculate_review_time};
use super::source::DeliveryDataSource;
use super::team::{TeamMetrics, aggregate_team};

/// Read-only engine configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Releases or tags fetched for the deployment window
    pub max_deployments: u8,
    /// Merged pull requests fetched for team metrics
    pub max_pull_requests: u8,
    pub include_merge_commits: bool,
    pub file_filter: FileFilter,
    pub size_thresholds: SizeThresholds,
    pub period: TimePeriod,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_deployments: 10,
            max_pull_requests: 50,
            include_merge_commits: false,
            file_filter: FileFilter::default(),
            size_thresholds: SizeThresholds::default(),
            period: TimePeriod::default(),
        }
    }
}

/// Everything computed for one pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestMetrics {
    pub number: u64,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    /// `None` when the file list could not be fetched
    pub size: Option<PrSizeResult>,
    pub maturity: PrMaturityResult,
    pub review: ReviewTimeResult,
}

/// Full output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub repository: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub deployment: Option<DeploymentPair>,
    pub deploy_frequency: Option<DeployFrequencyResult>,
    pub cycle_time: Option<CycleTimeResult>,
    /// Why deployment metrics are missing, if they are
    pub deployment_error: Option<String>,
    pub pull_requests: Vec<PullRequestMetrics>,
    pub team: TeamMetrics,
}

pub struct MetricsEngine<S> {
    source: S,
    options: EngineOptions,
}

impl<S> MetricsEngine<S>
where
    S: DeliveryDataSource,
{
    pub fn new(source: S, options: EngineOptions) -> Self {
        Self { source, options }
    }

    pub async fn resolve_deployments(&self) -> MetricsResult<DeploymentPair> {
        resolve_deployments(&self.source, self.options.max_deployments).await
    }

    #[must_use]
    pub fn deploy_frequency(&self, pair: &DeploymentPair) -> DeployFrequencyResult {
        calculate_deploy_frequency(&pair.timeline)
    }

    /// Lead time of the commits shipped by the latest deployment.
    pub async fn cycle_time(&self, pair: &DeploymentPair) -> CycleTimeResult {
        let commits =
            collect_release_commits(&self.source, &pair.latest, pair.previous.as_ref()).await;
        calculate_cycle_time(&pair.latest, &commits, self.options.include_merge_commits)
    }

    /// Size, maturity and review timing of one pull request.
    ///
    /// Commits, files and reviews are fetched concurrently; the maturity
    /// baseline diff follows once the commits are known.
    pub async fn pull_request_metrics(&self, number: u64) -> PullRequestMetrics {
        let Some(pr) = self.source.get_pull_request(number).await else {
            warn!("Pull request #{number} unavailable");
            return PullRequestMetrics {
                number,
                author: None,
                created_at: None,
                merged_at: None,
                size: None,
                maturity: PrMaturityResult::failed(format!(
                    "Failed to fetch pull request #{number}"
                )),
                review: ReviewTimeResult::default(),
            };
        };

        let (commits, files, reviews) = futures::join!(
            self.source.get_pull_request_commits(number),
            self.source.get_pull_request_files(number),
            self.source.get_pull_request_reviews(number),
        );

        let filter = &self.options.file_filter;
        let maturity = calculate_pr_maturity(
            &self.source,
            Some(pr.created_at),
            commits.as_deref().filter(|c| !c.is_empty()),
            files.as_deref(),
            filter,
        )
        .await;

        let size = files
            .as_deref()
            .map(|files| classify_pr_size(files, filter, &self.options.size_thresholds));
        let review = calculate_review_time(&pr, reviews.as_deref().unwrap_or_default());

        PullRequestMetrics {
            number,
            author: pr.author,
            created_at: Some(pr.created_at),
            merged_at: pr.merged_at,
            size,
            maturity,
            review,
        }
    }

    /// Metrics for the listed pull requests, or for the PRs merged in the
    /// configured period when `numbers` is empty.
    pub async fn pull_requests_metrics(
        &self,
        now: DateTime<Utc>,
        numbers: &[u64],
    ) -> Vec<PullRequestMetrics> {
        let numbers: Vec<u64> = if numbers.is_empty() {
            let (since, _) = self.options.period.window(now);
            self.source
                .list_merged_pull_requests(since, self.options.max_pull_requests)
                .await
                .into_iter()
                .map(|pr| pr.number)
                .collect()
        } else {
            numbers.to_vec()
        };

        info!("Computing metrics for {} pull requests", numbers.len());
        join_all(numbers.iter().map(|n| self.pull_request_metrics(*n))).await
    }

    /// Team-level aggregation for the configured period.
    #[must_use]
    pub fn team_metrics(
        &self,
        prs: &[PullRequestMetrics],
        now: DateTime<Utc>,
        deploy_frequency: Option<&DeployFrequencyResult>,
        cycle_time: Option<&CycleTimeResult>,
    ) -> TeamMetrics {
        aggregate_team(prs, self.options.period, now, deploy_frequency, cycle_time)
    }

    /// Run every metric. A deployment failure is recorded in the report and
    /// does not stop the pull request metrics.
    pub async fn report(&self, now: DateTime<Utc>, numbers: &[u64]) -> MetricsReport {
        let (deployment, deploy_frequency, cycle_time, deployment_error) =
            match self.resolve_deployments().await {
                Ok(pair) => {
                    info!(
                        "Latest deployment {} ({}) from {} source",
                        pair.latest.tag,
                        pair.latest.sha,
                        pair.source.as_str()
                    );
                    let frequency = self.deploy_frequency(&pair);
                    let cycle_time = self.cycle_time(&pair).await;
                    (Some(pair), Some(frequency), Some(cycle_time), None)
                }
                Err(e) => {
                    warn!("Deployment metrics unavailable: {e}");
                    (None, None, None, Some(e.to_string()))
                }
            };

        let pull_requests = self.pull_requests_metrics(now, numbers).await;
        let team = self.team_metrics(
            &pull_requests,
            now,
            deploy_frequency.as_ref(),
            cycle_time.as_ref(),
        );

        MetricsReport {
            repository: None,
            generated_at: now,
            deployment,
            deploy_frequency,
            cycle_time,
            deployment_error,
            pull_requests,
            team,
        }
    }
}
