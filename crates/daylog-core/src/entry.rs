//! Log entries as handed over by the persistence layer.
//!
//! The core only reads entries. Tags are compared without their leading `#`
//! and case-insensitively, so `#Sleep`, `#sleep` and `sleep` are one tag.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reserved tag marking the moment the user went to bed.
pub const SLEEP_TAG: &str = "#sleep";
/// Reserved tag marking the moment the user got up.
pub const WAKE_TAG: &str = "#wake";

static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(#[\p{L}\p{N}_]+)").expect("valid hashtag regex"));

/// A single timestamped journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub category: String,
    /// Instant the entry was logged, in the offset it was logged in.
    pub timestamp: DateTime<FixedOffset>,
}

impl LogEntry {
    /// Fill `tags` from the hashtags in `content` when the store sent none.
    ///
    /// Entries that already carry tags are returned unchanged.
    pub fn with_content_tags(mut self) -> Self {
        if self.tags.is_empty() {
            self.tags = extract_hashtags(&self.content).into_iter().collect();
        }
        self
    }

    /// Whether the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.tags.iter().any(|t| normalize_tag(t) == wanted)
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

/// Hashtags appearing in free text, in order of first appearance.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    HASHTAG_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
