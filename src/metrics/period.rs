//! Reporting period selection

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::MetricsError;

/// Trailing window the team metrics cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[serde(alias = "weekly")]
    Week,
    #[default]
    #[serde(alias = "monthly")]
    Month,
    #[serde(alias = "quarterly")]
    Quarter,
}

impl TimePeriod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Quarter => "quarter",
        }
    }

    #[must_use]
    pub fn days(&self) -> i64 {
        match self {
            TimePeriod::Week => 7,
            TimePeriod::Month => 30,
            TimePeriod::Quarter => 90,
        }
    }

    #[must_use]
    pub fn weeks(&self) -> f64 {
        self.days() as f64 / 7.0
    }

    /// `[now - period, now]`
    #[must_use]
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" => Ok(TimePeriod::Week),
            "month" | "monthly" => Ok(TimePeriod::Month),
            "quarter" | "quarterly" => Ok(TimePeriod::Quarter),
            _ => Err(MetricsError::InvalidPeriod(s.to_string())),
        }
    }
}
