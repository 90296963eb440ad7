//! GO batch splitting

use std::sync::LazyLock;

use regex::Regex;

/// Line-anchored batch separator: a line containing only `GO` in any case,
/// with optional surrounding whitespace.
static GO_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^\s*GO\s*$").unwrap());

/// One unit of SQL between separator lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position among all raw split segments. Whitespace-only
    /// segments never become batches but still consume a position;
    /// `Misc/Batch_<n>.sql` naming depends on this.
    pub position: usize,
    /// Trimmed batch text.
    pub sql: String,
}

/// Splits a full script into ordered, trimmed, non-empty batches.
pub fn split_batches(script: &str) -> Vec<Batch> {
    GO_SEPARATOR_RE
        .split(script)
        .enumerate()
        .filter_map(|(i, segment)| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Batch {
                    position: i + 1,
                    sql: trimmed.to_string(),
                })
            }
        })
        .collect()
}
