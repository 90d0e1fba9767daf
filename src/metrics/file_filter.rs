//! Changed-file filtering for PR size and maturity totals

use regex::Regex;
use serde::Serialize;

use super::error::{MetricsError, MetricsResult};
use super::types::{FileChange, FileStatus};

/// Summed line counts of a filtered file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeTotals {
    pub total_additions: u64,
    pub total_deletions: u64,
    pub total_changes: u64,
    pub files_changed: usize,
}

/// Ignore rules applied to a pull request's changed files.
///
/// Patterns are globs: `*` and `?` stay inside one path segment, `**`
/// crosses segments. A pattern without a `/` also matches the file name
/// alone, so `*.lock` ignores `sub/Cargo.lock`.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    patterns: Vec<(Regex, bool)>,
    ignore_line_deletions: bool,
    ignore_file_deletions: bool,
}

impl FileFilter {
    pub fn new<I, S>(
        patterns: I,
        ignore_line_deletions: bool,
        ignore_file_deletions: bool,
    ) -> MetricsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|pattern| {
                let base_name_only = !pattern.contains('/');
                Regex::new(&glob_to_regex(&pattern))
                    .map(|re| (re, base_name_only))
                    .map_err(|source| MetricsError::InvalidPattern { pattern, source })
            })
            .collect::<MetricsResult<Vec<_>>>()?;

        Ok(Self {
            patterns,
            ignore_line_deletions,
            ignore_file_deletions,
        })
    }

    /// Whether the file is left out of totals entirely.
    #[must_use]
    pub fn is_ignored(&self, file: &FileChange) -> bool {
        if self.ignore_file_deletions && file.status == FileStatus::Removed {
            return true;
        }

        let base_name = file.filename.rsplit('/').next().unwrap_or(&file.filename);
        self.patterns.iter().any(|(re, base_name_only)| {
            re.is_match(&file.filename) || (*base_name_only && re.is_match(base_name))
        })
    }

    /// Sum additions and deletions over the files that survive the filter.
    #[must_use]
    pub fn totals(&self, files: &[FileChange]) -> ChangeTotals {
        files
            .iter()
            .filter(|f| !self.is_ignored(f))
            .fold(ChangeTotals::default(), |mut acc, file| {
                let deletions = if self.ignore_line_deletions {
                    0
                } else {
                    file.deletions
                };
                acc.total_additions += file.additions;
                acc.total_deletions += deletions;
                acc.total_changes += file.additions + deletions;
                acc.files_changed += 1;
                acc
            })
    }
}

/// Translate a glob into an anchored regular expression.
fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push('$');
    out
}
