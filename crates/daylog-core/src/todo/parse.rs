//! Checklist text parsing and single-line write-back.
//!
//! Marker syntax:
//!
//! - item: `- [ ] text` or `- [x] text`, only tabs/spaces before the dash
//! - indentation: one level per tab, one level per two spaces
//! - quadrant: `#q1`..`#q4` anywhere in the text, removed from the display text
//! - highlight: a `==...==` span doubles the item's weight

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)- \[([ x])\] ?(.*)$").expect("valid checkbox regex"));
static QUADRANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*#q([1-4])\b").expect("valid quadrant regex"));
static HIGHLIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==[^=]+==").expect("valid highlight regex"));

/// Eisenhower priority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Urgent and important
    Q1,
    /// Important, not urgent
    Q2,
    /// Urgent, not important
    Q3,
    /// Neither
    Q4,
    /// Not classified yet
    #[default]
    Inbox,
}

impl Quadrant {
    /// All buckets in display order.
    pub const ALL: [Quadrant; 5] = [
        Quadrant::Q1,
        Quadrant::Q2,
        Quadrant::Q3,
        Quadrant::Q4,
        Quadrant::Inbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1",
            Quadrant::Q2 => "q2",
            Quadrant::Q3 => "q3",
            Quadrant::Q4 => "q4",
            Quadrant::Inbox => "inbox",
        }
    }

    fn from_digit(digit: &str) -> Self {
        match digit {
            "1" => Quadrant::Q1,
            "2" => Quadrant::Q2,
            "3" => Quadrant::Q3,
            "4" => Quadrant::Q4,
            _ => Quadrant::Inbox,
        }
    }
}

/// One checkbox line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub checked: bool,
    /// Display text with quadrant markers removed
    pub text: String,
    /// Nesting depth derived from leading whitespace
    pub indent: usize,
    /// Zero-based source line, used to write edits back
    pub line_index: usize,
    pub quadrant: Quadrant,
    /// 2 when the text carries a `==highlight==`, otherwise 1
    pub weight: u8,
}

impl TodoItem {
    fn from_line(line: &str, line_index: usize) -> Option<Self> {
        let caps = CHECKBOX_RE.captures(line)?;
        let leading = caps.get(1).map_or("", |m| m.as_str());
        let raw_text = caps.get(3).map_or("", |m| m.as_str());

        let quadrant = QUADRANT_RE
            .captures(raw_text)
            .and_then(|c| c.get(1))
            .map_or(Quadrant::Inbox, |m| Quadrant::from_digit(m.as_str()));
        let text = QUADRANT_RE.replace_all(raw_text, "").trim().to_string();

        Some(Self {
            checked: caps.get(2).is_some_and(|m| m.as_str() == "x"),
            text,
            indent: indent_depth(leading),
            line_index,
            quadrant,
            weight: if HIGHLIGHT_RE.is_match(raw_text) { 2 } else { 1 },
        })
    }
}

fn indent_depth(leading: &str) -> usize {
    let tabs = leading.chars().filter(|c| *c == '\t').count();
    let spaces = leading.chars().filter(|c| *c == ' ').count();
    tabs + spaces / 2
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse every checkbox line of `raw`. Other lines are skipped.
pub fn parse_todos(raw: &str) -> Vec<TodoItem> {
    let items: Vec<TodoItem> = raw
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| TodoItem::from_line(strip_cr(line), i))
        .collect();
    tracing::debug!(items = items.len(), "parsed todo text");
    items
}

/// Flip the checkbox on `line_index`. `None` when that line is not an item.
pub fn toggle_todo(raw: &str, line_index: usize) -> Option<String> {
    let line = raw.split('\n').nth(line_index)?;
    let item = TodoItem::from_line(strip_cr(line), line_index)?;
    set_todo_checked(raw, line_index, !item.checked)
}

/// Set the checkbox on `line_index`, leaving every other byte of `raw` as is.
pub fn set_todo_checked(raw: &str, line_index: usize, checked: bool) -> Option<String> {
    let mut lines: Vec<String> = raw.split('\n').map(str::to_string).collect();
    let line = lines.get_mut(line_index)?;
    let mark = CHECKBOX_RE.captures(strip_cr(line.as_str()))?.get(2)?.range();
    line.replace_range(mark, if checked { "x" } else { " " });
    Some(lines.join("\n"))
}
