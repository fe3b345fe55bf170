//! Integration tests for the todo engine: parsing, tree building, weighted
//! rate, write-back and levels working together on realistic lists.

use daylog_core::{
    build_todo_tree, calculate_total_weighted_rate, daily_level, parse_todos, quadrant_summary,
    toggle_todo, Quadrant,
};
use proptest::prelude::*;

const DAY: &str = "# Monday\n\
- [ ] ship release #q1\n\
\t- [x] tag build\n\
\t- [ ] ==write notes==\n\
- [x] call bank #q3\n\
notes: remember the dentist\n\
- [ ] stretch #q2\n";

#[test]
fn test_end_to_end_weighted_rate() {
    let items = parse_todos("- [x] a\n\t- [ ] b\n\t- [x] c");
    let roots = build_todo_tree(&items);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].item.weight, 1);
    assert_eq!(roots[0].children.len(), 2);
    assert!(!roots[0].children[0].item.checked);
    assert!(roots[0].children[1].item.checked);
    assert_eq!(calculate_total_weighted_rate(&items), 50);
}

#[test]
fn test_day_list_workflow() {
    let items = parse_todos(DAY);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].quadrant, Quadrant::Q1);
    assert_eq!(items[2].weight, 2);

    // release: 1/2, bank: 1, stretch: 0 -> 1.5 / 3
    assert_eq!(calculate_total_weighted_rate(&items), 50);
    assert_eq!(daily_level(50).level, 3);

    // Finish the notes via write-back and re-parse
    let notes_line = items[2].line_index;
    let updated = toggle_todo(DAY, notes_line).unwrap();
    let before: Vec<_> = DAY.split('\n').collect();
    let after: Vec<_> = updated.split('\n').collect();
    assert_eq!(before.len(), after.len());
    for (i, (b, a)) in before.iter().zip(&after).enumerate() {
        if i == notes_line {
            assert_ne!(b, a);
        } else {
            assert_eq!(b, a);
        }
    }

    let items = parse_todos(&updated);
    // release: 1, bank: 1, stretch: 0 -> 2 / 3
    assert_eq!(calculate_total_weighted_rate(&items), 67);

    let summary = quadrant_summary(&items);
    let q1 = summary.iter().find(|s| s.quadrant == Quadrant::Q1).unwrap();
    assert_eq!(q1.total, 1);
    assert_eq!(q1.completed, 0);
}

fn arb_todo_text() -> impl Strategy<Value = String> {
    let line = (0usize..6, any::<bool>(), any::<bool>(), 0u8..6, any::<bool>()).prop_map(
        |(indent, checked, highlight, quadrant, is_item)| {
            if !is_item {
                return "free text line".to_string();
            }
            let mark = if checked { "x" } else { " " };
            let text = if highlight { "==task==" } else { "task" };
            let tag = match quadrant {
                1..=4 => format!(" #q{quadrant}"),
                _ => String::new(),
            };
            format!("{}- [{mark}] {text}{tag}", "\t".repeat(indent))
        },
    );
    prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn prop_rate_is_bounded(raw in arb_todo_text()) {
        let rate = calculate_total_weighted_rate(&parse_todos(&raw));
        prop_assert!(rate <= 100);
    }

    #[test]
    fn prop_all_checked_is_100(raw in arb_todo_text()) {
        let checked = raw.replace("- [ ]", "- [x]");
        let items = parse_todos(&checked);
        let expected = if items.is_empty() { 0 } else { 100 };
        prop_assert_eq!(calculate_total_weighted_rate(&items), expected);
    }

    #[test]
    fn prop_parse_is_idempotent(raw in arb_todo_text()) {
        prop_assert_eq!(parse_todos(&raw), parse_todos(&raw));
    }

    #[test]
    fn prop_tree_keeps_every_item(raw in arb_todo_text()) {
        let items = parse_todos(&raw);
        let roots = build_todo_tree(&items);
        let count: usize = roots.iter().map(|r| r.node_count()).sum();
        prop_assert_eq!(count, items.len());
    }

    #[test]
    fn prop_toggle_twice_restores_text(raw in arb_todo_text()) {
        for item in parse_todos(&raw) {
            let once = toggle_todo(&raw, item.line_index).unwrap();
            let twice = toggle_todo(&once, item.line_index).unwrap();
            prop_assert_eq!(&twice, &raw);
        }
    }
}
