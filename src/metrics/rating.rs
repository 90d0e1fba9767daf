//! Qualitative rating tables
//!
//! Every metric maps to one of four ordered tiers through a single
//! threshold classifier. The elite bound is strict, the good and fair
//! bounds are inclusive.

use serde::{Serialize, Serializer};
use std::fmt;

/// Qualitative tier of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Elite,
    Good,
    Fair,
    NeedsFocus,
    /// No value to rate
    Unknown,
}

impl Rating {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Elite => "Elite",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::NeedsFocus => "Needs Focus",
            Rating::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which end of the scale is desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Three breakpoints splitting a metric into four tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingTable {
    pub direction: Direction,
    pub elite: f64,
    pub good: f64,
    pub fair: f64,
}

impl RatingTable {
    #[must_use]
    pub const fn lower_is_better(elite: f64, good: f64, fair: f64) -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            elite,
            good,
            fair,
        }
    }

    #[must_use]
    pub const fn higher_is_better(elite: f64, good: f64, fair: f64) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            elite,
            good,
            fair,
        }
    }

    /// Classify a value. `None` and NaN rate as [`Rating::Unknown`].
    #[must_use]
    pub fn rate(&self, value: Option<f64>) -> Rating {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            return Rating::Unknown;
        };

        match self.direction {
            Direction::HigherIsBetter => {
                if v > self.elite {
                    Rating::Elite
                } else if v >= self.good {
                    Rating::Good
                } else if v >= self.fair {
                    Rating::Fair
                } else {
                    Rating::NeedsFocus
                }
            }
            Direction::LowerIsBetter => {
                if v < self.elite {
                    Rating::Elite
                } else if v <= self.good {
                    Rating::Good
                } else if v <= self.fair {
                    Rating::Fair
                } else {
                    Rating::NeedsFocus
                }
            }
        }
    }
}

/// Hours from PR creation to the first review.
pub const PICKUP_TIME: RatingTable = RatingTable::lower_is_better(1.0, 3.0, 16.0);

/// Hours from PR creation to the first approval.
pub const APPROVE_TIME: RatingTable = RatingTable::lower_is_better(4.0, 14.0, 24.0);

/// Hours from PR creation to merge.
pub const MERGE_TIME: RatingTable = RatingTable::lower_is_better(24.0, 48.0, 96.0);

/// Merged PRs per contributor per week.
pub const MERGE_FREQUENCY: RatingTable = RatingTable::higher_is_better(2.0, 1.5, 1.0);

/// Deployments per week.
pub const DEPLOY_FREQUENCY: RatingTable = RatingTable::higher_is_better(7.0, 3.5, 0.7);

/// Average lead time in hours.
pub const CYCLE_TIME: RatingTable = RatingTable::lower_is_better(48.0, 118.0, 209.0);

/// Changed lines per PR.
pub const PR_SIZE: RatingTable = RatingTable::lower_is_better(100.0, 300.0, 600.0);

/// Maturity percentage: >88 elite, 81-88 good, 75-80 fair.
pub const PR_MATURITY: RatingTable = RatingTable::higher_is_better(88.0, 81.0, 75.0);
