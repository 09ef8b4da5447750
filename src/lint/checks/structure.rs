//! Structural checks on node command sequences

use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::{CommandKind, Node, Story};

/// Check per-node command structure: balanced conditional blocks and
/// well-formed answer bodies.
pub fn check(story: &Story, result: &mut LintResult) {
    for node in story.nodes.values() {
        check_block_balance(node, result);
        check_answer_bodies(node, result);
    }
}

fn check_block_balance(node: &Node, result: &mut LintResult) {
    let mut depth: usize = 0;
    let mut last_if_line = 0;
    for command in &node.commands {
        match command.kind {
            CommandKind::If => {
                depth += 1;
                last_if_line = command.line;
            }
            CommandKind::Else | CommandKind::Elsif => {
                if depth == 0 {
                    result.add_issue(LintIssue {
                        level: LintLevel::Error,
                        message: format!("{} without an open IF", command.kind),
                        line: command.line,
                        category: "structure".to_string(),
                    });
                }
            }
            CommandKind::Endif => {
                if depth == 0 {
                    result.add_issue(LintIssue {
                        level: LintLevel::Error,
                        message: "ENDIF without an open IF".to_string(),
                        line: command.line,
                        category: "structure".to_string(),
                    });
                } else {
                    depth -= 1;
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        result.add_issue(LintIssue {
            level: LintLevel::Error,
            message: format!("Missing ENDIF in node '{}'", node.title),
            line: last_if_line,
            category: "structure".to_string(),
        });
    }
}

/// Walk each answer body the way the runtime collects it and flag the IFs
/// the runtime would refuse.
fn check_answer_bodies(node: &Node, result: &mut LintResult) {
    let mut i = 0;
    while i < node.commands.len() {
        if node.commands[i].kind != CommandKind::Answer {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < node.commands.len() {
            match node.commands[j].kind {
                CommandKind::Answer => break,
                CommandKind::Pass | CommandKind::End | CommandKind::Goto => {
                    j += 1;
                    break;
                }
                CommandKind::If => {
                    result.add_issue(LintIssue {
                        level: LintLevel::Error,
                        message: format!(
                            "IF inside an ANSWER block in node '{}'",
                            node.title
                        ),
                        line: node.commands[j].line,
                        category: "structure".to_string(),
                    });
                    j += 1;
                }
                _ => j += 1,
            }
        }
        i = j.max(i + 1);
    }
}
