//! Script validation mode
//!
//! Parses and lints a script without running it, printing everything the
//! author should fix before shipping.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::lint::{self, LintLevel};
use crate::parser;

/// Check one script file. Returns `Ok(true)` when the script has no parse
/// diagnostics and no error-level lint issues; warnings and infos do not
/// fail the check.
pub fn run_check(script_path: &Path) -> anyhow::Result<bool> {
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script '{}'", script_path.display()))?;

    let (story, diagnostics) = parser::parse(&source);
    for diagnostic in &diagnostics {
        println!("parse error: {diagnostic}");
    }

    let result = lint::lint(&story);
    for issue in &result.issues {
        let tag = level_tag(issue.level);
        if issue.line > 0 {
            println!("{tag}: line {}: {} [{}]", issue.line, issue.message, issue.category);
        } else {
            println!("{tag}: {} [{}]", issue.message, issue.category);
        }
    }

    println!(
        "{}: {} node(s), {} parse error(s), {} lint error(s), {} warning(s), {} info",
        script_path.display(),
        story.nodes.len(),
        diagnostics.len(),
        result.error_count,
        result.warning_count,
        result.info_count,
    );

    Ok(diagnostics.is_empty() && !result.has_errors())
}

fn level_tag(level: LintLevel) -> &'static str {
    match level {
        LintLevel::Error => "error",
        LintLevel::Warning => "warning",
        LintLevel::Info => "info",
    }
}
