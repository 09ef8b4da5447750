//! Flow analysis implementation

use std::collections::{HashSet, VecDeque};

use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::{CommandKind, START_NODE, Story};

/// Check story-level flow: an entry point exists and every node can be
/// reached from it.
pub fn check(story: &Story, result: &mut LintResult) {
    if story.nodes.is_empty() {
        return;
    }
    if !story.has_node(START_NODE) {
        result.add_issue(LintIssue {
            level: LintLevel::Error,
            message: format!("Story has no {START_NODE} node"),
            line: 0,
            category: "flow".to_string(),
        });
        return;
    }
    check_unreachable_nodes(story, result);
}

/// BFS over GOTO edges from START. Answer actions are part of the node's
/// command list, so their GOTOs count as edges too.
fn check_unreachable_nodes(story: &Story, result: &mut LintResult) {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::new();
    reachable.insert(START_NODE.to_string());
    queue.push_back(START_NODE.to_string());

    while let Some(title) = queue.pop_front() {
        let Some(node) = story.node(&title) else {
            continue;
        };
        for command in &node.commands {
            if command.kind == CommandKind::Goto
                && story.has_node(&command.arg)
                && reachable.insert(command.arg.clone())
            {
                queue.push_back(command.arg.clone());
            }
        }
    }

    for (title, node) in &story.nodes {
        if !reachable.contains(title) {
            result.add_issue(LintIssue {
                level: LintLevel::Warning,
                message: format!("Node '{title}' is unreachable from {START_NODE}"),
                line: node.commands.first().map(|c| c.line).unwrap_or(0),
                category: "flow".to_string(),
            });
        }
    }
}
