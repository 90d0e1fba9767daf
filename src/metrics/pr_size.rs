//! Pull request size tiers

use serde::{Deserialize, Serialize};

use super::file_filter::{ChangeTotals, FileFilter};
use super::rating::Rating;
use super::types::FileChange;

/// Size tier of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrSize {
    S,
    M,
    L,
    Xl,
}

impl PrSize {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PrSize::S => "s",
            PrSize::M => "m",
            PrSize::L => "l",
            PrSize::Xl => "xl",
        }
    }

    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            PrSize::S => "Small",
            PrSize::M => "Medium",
            PrSize::L => "Large",
            PrSize::Xl => "Extra Large",
        }
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        match self {
            PrSize::S => Rating::Elite,
            PrSize::M => Rating::Good,
            PrSize::L => Rating::Fair,
            PrSize::Xl => Rating::NeedsFocus,
        }
    }
}

/// Lower bounds (in changed lines) of the `m`, `l` and `xl` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeThresholds {
    pub medium: u64,
    pub large: u64,
    pub extra_large: u64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            medium: 100,
            large: 300,
            extra_large: 600,
        }
    }
}

impl SizeThresholds {
    #[must_use]
    pub fn classify(&self, total_changes: u64) -> PrSize {
        if total_changes < self.medium {
            PrSize::S
        } else if total_changes < self.large {
            PrSize::M
        } else if total_changes < self.extra_large {
            PrSize::L
        } else {
            PrSize::Xl
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrSizeResult {
    pub size: PrSize,
    pub category: String,
    pub rating: Rating,
    pub details: ChangeTotals,
}

/// Sum the filtered file list and bucket the total.
#[must_use]
pub fn classify_pr_size(
    files: &[FileChange],
    filter: &FileFilter,
    thresholds: &SizeThresholds,
) -> PrSizeResult {
    let details = filter.totals(files);
    let size = thresholds.classify(details.total_changes);

    PrSizeResult {
        size,
        category: size.category().to_string(),
        rating: size.rating(),
        details,
    }
}
