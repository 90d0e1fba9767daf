//! Configuration for a metrics run
//!
//! Values come from defaults, then an optional TOML file, then environment
//! variables. Once turned into [`EngineOptions`] the configuration is
//! read-only.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::metrics::{EngineOptions, FileFilter, MetricsError, SizeThresholds, TimePeriod};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("GITHUB_TOKEN is not set")]
    MissingToken,

    #[error("Repository must be given as owner/repo, got '{0}'")]
    InvalidRepository(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Settings for one metrics run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// `owner/repo`
    pub repository: Option<String>,
    pub token: Option<String>,
    /// GitHub Enterprise API root
    pub api_base_uri: Option<String>,
    pub time_period: TimePeriod,
    pub include_merge_commits: bool,
    pub ignore_patterns: Vec<String>,
    pub ignore_line_deletions: bool,
    pub ignore_file_deletions: bool,
    pub max_deployments: u8,
    pub max_pull_requests: u8,
    /// Analyze these PRs instead of the ones merged in the period
    pub pull_requests: Vec<u64>,
    pub size_thresholds: SizeThresholds,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            repository: None,
            token: None,
            api_base_uri: None,
            time_period: TimePeriod::default(),
            include_merge_commits: false,
            ignore_patterns: Vec::new(),
            ignore_line_deletions: false,
            ignore_file_deletions: false,
            max_deployments: 10,
            max_pull_requests: 50,
            pull_requests: Vec::new(),
            size_thresholds: SizeThresholds::default(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl MetricsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply `KEY=value` overrides. Unknown keys are ignored.
    pub fn apply_overrides<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "GITHUB_TOKEN" => self.token = Some(value.to_string()),
                "GITHUB_REPOSITORY" => self.repository = Some(value.to_string()),
                "GITHUB_API_URL" => self.api_base_uri = Some(value.to_string()),
                "METRICS_TIME_PERIOD" => self.time_period = value.parse()?,
                "METRICS_INCLUDE_MERGE_COMMITS" => {
                    self.include_merge_commits = parse_bool(key, value)?;
                }
                "METRICS_IGNORE_PATTERNS" => {
                    self.ignore_patterns = split_list(value).map(str::to_string).collect();
                }
                "METRICS_IGNORE_LINE_DELETIONS" => {
                    self.ignore_line_deletions = parse_bool(key, value)?;
                }
                "METRICS_IGNORE_FILE_DELETIONS" => {
                    self.ignore_file_deletions = parse_bool(key, value)?;
                }
                "METRICS_PULL_REQUESTS" => {
                    self.pull_requests = split_list(value)
                        .map(|n| n.trim_start_matches('#').parse().map_err(|_| invalid(key, n)))
                        .collect::<Result<_, _>>()?;
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Split `repository` into owner and name.
    pub fn owner_and_repo(&self) -> Result<(String, String), ConfigError> {
        let full = self
            .repository
            .as_deref()
            .ok_or_else(|| ConfigError::InvalidRepository(String::new()))?;

        match full.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => Err(ConfigError::InvalidRepository(full.to_string())),
        }
    }

    /// Compile the engine options; fails on an invalid ignore pattern.
    pub fn engine_options(&self) -> Result<EngineOptions, ConfigError> {
        let file_filter = FileFilter::new(
            &self.ignore_patterns,
            self.ignore_line_deletions,
            self.ignore_file_deletions,
        )?;

        Ok(EngineOptions {
            max_deployments: self.max_deployments.max(1),
            max_pull_requests: self.max_pull_requests.max(1),
            include_merge_commits: self.include_merge_commits,
            file_filter,
            size_thresholds: self.size_thresholds,
            period: self.time_period,
        })
    }
}
