//! Reference integrity checking implementation

use std::collections::HashSet;

use crate::expr::{is_int_literal, tokenize};
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::{CommandKind, Story};

/// Check that GOTO targets and variable references resolve against the
/// story's declarations.
pub fn check(story: &Story, result: &mut LintResult) {
    check_duplicate_flags(story, result);

    let mut used_flags = HashSet::new();
    for node in story.nodes.values() {
        for command in &node.commands {
            match command.kind {
                CommandKind::Goto => {
                    if !story.has_node(&command.arg) {
                        result.add_issue(LintIssue {
                            level: LintLevel::Error,
                            message: format!("GOTO target '{}' does not exist", command.arg),
                            line: command.line,
                            category: "references".to_string(),
                        });
                    }
                }
                CommandKind::Set | CommandKind::Toggle => {
                    check_flag(story, &command.arg, command.line, result, &mut used_flags);
                }
                CommandKind::Unset => {
                    // UNSET ALL clears everything and names no variable.
                    if command.arg != "ALL" {
                        check_flag(story, &command.arg, command.line, result, &mut used_flags);
                    }
                }
                CommandKind::If | CommandKind::Elsif | CommandKind::Let => {
                    for ident in identifiers(&command.arg) {
                        check_flag(story, &ident, command.line, result, &mut used_flags);
                    }
                }
                _ => {}
            }
        }
    }

    for flag in &story.flags {
        if !used_flags.contains(flag.as_str()) {
            result.add_issue(LintIssue {
                level: LintLevel::Info,
                message: format!("Variable '{flag}' is never used"),
                line: 0,
                category: "references".to_string(),
            });
        }
    }
}

fn check_duplicate_flags(story: &Story, result: &mut LintResult) {
    let mut seen = HashSet::new();
    for flag in &story.flags {
        if !seen.insert(flag.as_str()) {
            result.add_issue(LintIssue {
                level: LintLevel::Warning,
                message: format!("Variable '{flag}' is declared more than once"),
                line: 0,
                category: "references".to_string(),
            });
        }
    }
}

fn check_flag(
    story: &Story,
    name: &str,
    line: usize,
    result: &mut LintResult,
    used_flags: &mut HashSet<String>,
) {
    used_flags.insert(name.to_string());
    if !story.has_flag(name) {
        result.add_issue(LintIssue {
            level: LintLevel::Error,
            message: format!("Variable '{name}' is not declared"),
            line,
            category: "references".to_string(),
        });
    }
}

/// Identifier tokens of an expression: whatever is not an operator,
/// keyword, parenthesis or integer literal must be a variable.
fn identifiers(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| {
            !matches!(
                token.as_str(),
                "(" | ")" | "AND" | "OR" | "NOT" | "=" | "==" | "!=" | "<" | "<=" | ">" | ">="
            ) && !is_int_literal(token)
        })
        .collect()
}
