//! Weighted todo lists.
//!
//! A day's todo list is a plain text blob of markdown-style checkboxes:
//!
//! ```text
//! - [ ] ship release #q1
//! 	- [x] tag build
//! 	- [ ] ==write notes==
//! - [ ] call bank #q3
//! ```
//!
//! Items are parsed line by line, nested by indentation and scored with a
//! completion rate that splits each parent's weight evenly across its
//! children.

mod level;
mod parse;
mod tree;

pub use level::{daily_level, lifetime_level, Level, DAILY_LEVEL_THRESHOLDS, LIFETIME_LEVEL_THRESHOLDS};
pub use parse::{parse_todos, set_todo_checked, toggle_todo, Quadrant, TodoItem};
pub use tree::{
    build_todo_tree, calculate_total_weighted_rate, quadrant_summary, QuadrantSummary, TodoNode,
    MAX_TODO_DEPTH,
};
