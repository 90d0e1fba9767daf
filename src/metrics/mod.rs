//! Metrics computation engine
//!
//! Pure calculators that turn release, tag, commit and pull request records
//! into delivery metrics. Data is pulled through the [`DeliveryDataSource`]
//! trait; nothing in this module talks to the network directly.

pub mod cycle_time;
pub mod deploy_frequency;
pub mod deployments;
pub mod engine;
pub mod error;
pub mod file_filter;
pub mod maturity;
pub mod period;
pub mod pr_size;
pub mod rating;
pub mod review_time;
pub mod source;
pub mod team;
pub mod types;
pub(crate) mod util;

pub use cycle_time::{CycleTimeResult, calculate_cycle_time, collect_release_commits};
pub use deploy_frequency::{DeployFrequencyResult, calculate_deploy_frequency};
pub use deployments::{DeploymentPair, DeploymentSource, resolve_deployments};
pub use engine::{EngineOptions, MetricsEngine, MetricsReport, PullRequestMetrics};
pub use error::{MetricsError, MetricsResult};
pub use file_filter::{ChangeTotals, FileFilter};
pub use maturity::{
    GRACE_PERIOD_MINUTES, MaturityBreakdown, MaturityDetails, MaturityPlan, PrMaturityResult,
    calculate_pr_maturity, complete_maturity, plan_maturity,
};
pub use period::TimePeriod;
pub use pr_size::{PrSize, PrSizeResult, SizeThresholds, classify_pr_size};
pub use rating::{Direction, Rating, RatingTable};
pub use review_time::{ReviewTimeResult, calculate_review_time};
pub use source::DeliveryDataSource;
pub use team::{SizeDistribution, TeamMetrics, TeamRatings, aggregate_team};
pub use types::{
    Commit, CommitComparison, Deployment, FileChange, FileStatus, PullRequestInfo, ReleaseRecord,
    ResolvedTag, Review, ReviewState, TagRecord,
};
