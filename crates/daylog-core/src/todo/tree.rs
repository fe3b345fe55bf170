//! Todo hierarchy and weighted completion.

use serde::{Deserialize, Serialize};

use super::parse::{Quadrant, TodoItem};

/// Indentation deeper than this is treated as this depth, which bounds the
/// recursion in [`TodoNode::completed_weight`].
pub const MAX_TODO_DEPTH: usize = 32;

/// An item with its nested sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoNode {
    pub item: TodoItem,
    pub children: Vec<TodoNode>,
}

impl TodoNode {
    fn leaf(item: TodoItem) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    /// Completed share of `weight` under this node.
    ///
    /// A leaf contributes all of `weight` when checked and nothing otherwise.
    /// A parent ignores its own checkbox and splits `weight` evenly across its
    /// children.
    pub fn completed_weight(&self, weight: f64) -> f64 {
        if self.children.is_empty() {
            return if self.item.checked { weight } else { 0.0 };
        }
        let share = weight / self.children.len() as f64;
        self.children.iter().map(|c| c.completed_weight(share)).sum()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TodoNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest leaf below this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TodoNode::depth).max().unwrap_or(0)
    }
}

/// Rebuild the forest described by the items' indentation.
///
/// Single pass with a stack of open nodes: anything at the same or a deeper
/// indent than the incoming item is closed first, then the item opens under
/// whatever remains on top (or as a new root).
pub fn build_todo_tree(items: &[TodoItem]) -> Vec<TodoNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<(TodoNode, usize)> = Vec::new();

    for item in items {
        let indent = item.indent.min(MAX_TODO_DEPTH);
        while stack.last().is_some_and(|(_, top)| *top >= indent) {
            close_top(&mut stack, &mut roots);
        }
        stack.push((TodoNode::leaf(item.clone()), indent));
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    roots
}

fn close_top(stack: &mut Vec<(TodoNode, usize)>, roots: &mut Vec<TodoNode>) {
    if let Some((node, _)) = stack.pop() {
        match stack.last_mut() {
            Some((parent, _)) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Depth-weighted completion percentage in `0..=100`.
///
/// Each root is worth its own weight (1, or 2 when highlighted); the weight
/// is split evenly down the tree. An empty list is 0%.
pub fn calculate_total_weighted_rate(items: &[TodoItem]) -> u32 {
    let roots = build_todo_tree(items);
    let total: f64 = roots.iter().map(|r| f64::from(r.item.weight)).sum();
    if total <= 0.0 {
        return 0;
    }
    let done: f64 = roots
        .iter()
        .map(|r| r.completed_weight(f64::from(r.item.weight)))
        .sum();
    (100.0 * done / total).round().clamp(0.0, 100.0) as u32
}

/// Per-quadrant counts for the matrix view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantSummary {
    pub quadrant: Quadrant,
    pub total: usize,
    pub completed: usize,
    /// Checked weight over total weight, as a percentage
    pub completion_rate: u32,
}

/// Summaries for every quadrant, in `q1..q4, inbox` order.
pub fn quadrant_summary(items: &[TodoItem]) -> Vec<QuadrantSummary> {
    Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let (mut total, mut completed, mut weight, mut done_weight) = (0, 0, 0u32, 0u32);
            for item in items.iter().filter(|i| i.quadrant == quadrant) {
                total += 1;
                weight += u32::from(item.weight);
                if item.checked {
                    completed += 1;
                    done_weight += u32::from(item.weight);
                }
            }
            let completion_rate = if weight == 0 {
                0
            } else {
                (100.0 * f64::from(done_weight) / f64::from(weight)).round() as u32
            };
            QuadrantSummary {
                quadrant,
                total,
                completed,
                completion_rate,
            }
        })
        .collect()
}
