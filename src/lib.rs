//! `delivery_metrics` - software delivery metrics from GitHub data
//!
//! Computes deployment frequency, release cycle time, pull request size,
//! maturity and review timings for a repository. Calculations live in
//! [`metrics`] and read their inputs through [`metrics::DeliveryDataSource`];
//! [`github`] provides the octocrab-backed implementation of that trait.

// Module declarations
pub mod config;
pub mod github;
pub mod metrics;
pub mod runtime;

// Re-export runtime types
pub use runtime::{AsyncStream, AsyncTask};

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder, GitHubDataSource};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export configuration
pub use config::{ConfigError, MetricsConfig};

// Re-export the metrics entry points
pub use metrics::{
    DeliveryDataSource, EngineOptions, MetricsEngine, MetricsError, MetricsReport,
    MetricsResult, Rating, TimePeriod,
};
