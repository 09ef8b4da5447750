//! Lint module for script quality checking
//!
//! The runtime reports script problems lazily, when the offending command
//! actually runs; a branch nobody takes can hide a broken GOTO for months.
//! Linting surfaces the same class of problems ahead of time, plus
//! whole-story issues no single pass can see:
//! - Reference integrity (GOTO targets, variable declarations)
//! - Block structure (unbalanced IF/ENDIF, IF inside ANSWER)
//! - Flow analysis (missing START, unreachable nodes)

use serde::{Deserialize, Serialize};

use crate::types::Story;

pub mod checks;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: will misbehave at runtime
    Error,
    /// Warning: suspicious, should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Line number (1-indexed; 0 when no single line applies)
    pub line: usize,
    /// Category of the issue
    pub category: String,
}

/// Result of linting a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        }
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for LintResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Lint a parsed story, running every check.
pub fn lint(story: &Story) -> LintResult {
    let mut result = LintResult::new();
    checks::references::check(story, &mut result);
    checks::structure::check(story, &mut result);
    checks::flow::check(story, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn lint_empty_story() {
        let (story, _) = parse("");
        let result = lint(&story);
        assert!(result.is_clean());
        assert_eq!(result.error_count, 0);
        assert_eq!(result.warning_count, 0);
    }

    #[test]
    fn lint_clean_story() {
        let source = r#"
DEFINE lamp
NODE START
A dark cellar.
IF lamp == 0
You see nothing.
ENDIF
ANSWER Grab the lamp.
SET lamp
GOTO cellar
NODE cellar
Down the stairs.
GOTO START
"#;
        let (story, diagnostics) = parse(source);
        assert!(diagnostics.is_empty());
        let result = lint(&story);
        assert!(result.is_clean(), "unexpected issues: {:?}", result.issues);
    }

    #[test]
    fn counts_follow_issue_levels() {
        let source = "DEFINE unused\nNODE START\nGOTO nowhere\n";
        let (story, _) = parse(source);
        let result = lint(&story);
        assert!(result.has_errors());
        assert_eq!(result.error_count, 1);
        assert_eq!(result.info_count, 1);
        assert_eq!(
            result.issues.len(),
            result.error_count + result.warning_count + result.info_count
        );
    }
}
