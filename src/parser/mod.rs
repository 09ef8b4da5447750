//! Line-oriented script parser
//!
//! A script is a header of DEFINE lines followed by NODE sections. Every
//! line is trimmed and classified on its own: a keyword line becomes the
//! matching command, everything else becomes TEXT. Parsing never aborts;
//! problems are collected as [`ParseDiagnostic`]s and the parser keeps
//! going, so the caller always gets a usable [`Story`] plus the full list
//! of what was wrong with it.

use thiserror::Error;

use crate::types::{Command, CommandKind, Node, Story};


/// A problem found while parsing, tied to a 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseDiagnostic {
    pub line: usize,
    pub message: String,
}

/// Keyword lines that take an argument after the keyword.
const PREFIX_COMMANDS: &[(&str, CommandKind)] = &[
    ("EFFECT ", CommandKind::Effect),
    ("IMAGE ", CommandKind::Image),
    ("SAMPLE ", CommandKind::Sample),
    ("ANSWER ", CommandKind::Answer),
    ("GOTO ", CommandKind::Goto),
    ("IF ", CommandKind::If),
    ("ELSIF ", CommandKind::Elsif),
    ("SET ", CommandKind::Set),
    ("LET ", CommandKind::Let),
    ("UNSET ", CommandKind::Unset),
    ("TOGGLE ", CommandKind::Toggle),
];

/// Keyword lines that must match the whole line exactly.
const BARE_COMMANDS: &[(&str, CommandKind)] = &[
    ("ELSE", CommandKind::Else),
    ("ENDIF", CommandKind::Endif),
    ("PASS", CommandKind::Pass),
    ("END", CommandKind::End),
];

/// Parse script source into a story plus any diagnostics.
///
/// An empty diagnostic list means the script is well-formed. A non-empty
/// list still comes with a best-effort story the caller may run.
pub fn parse(source: &str) -> (Story, Vec<ParseDiagnostic>) {
    ScriptParser::default().parse(source)
}

#[derive(Debug, PartialEq, Eq)]
enum Phase {
    /// Before the first NODE line; only DEFINE, comments and blanks.
    Header,
    /// Inside node sections; every line belongs to the current node.
    Body,
}

struct ScriptParser {
    story: Story,
    current: Node,
    phase: Phase,
    diagnostics: Vec<ParseDiagnostic>,
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self {
            story: Story::default(),
            current: Node::default(),
            phase: Phase::Header,
            diagnostics: Vec::new(),
        }
    }
}

impl ScriptParser {
    fn parse(mut self, source: &str) -> (Story, Vec<ParseDiagnostic>) {
        let mut last_line = 0;
        for (idx, raw) in source.lines().enumerate() {
            last_line = idx + 1;
            let line = raw.trim();
            match self.phase {
                Phase::Header => self.header_line(line, last_line),
                Phase::Body => self.body_line(line, last_line),
            }
        }
        if self.phase == Phase::Body {
            self.commit_current(last_line);
        }
        log::debug!(
            "parsed {} nodes, {} flags, {} diagnostics",
            self.story.nodes.len(),
            self.story.flags.len(),
            self.diagnostics.len()
        );
        (self.story, self.diagnostics)
    }

    fn header_line(&mut self, line: &str, lineno: usize) {
        if let Some(flag) = line.strip_prefix("DEFINE ") {
            self.story.flags.push(flag.to_string());
        } else if let Some(title) = line.strip_prefix("NODE ") {
            self.phase = Phase::Body;
            self.current = Node::new(title);
        } else if line.starts_with("--") || line.is_empty() {
            // comments and blank lines are fine before the first node
        } else {
            self.report(lineno, "Expected only DEFINE before the first NODE");
        }
    }

    fn body_line(&mut self, line: &str, lineno: usize) {
        if let Some(title) = line.strip_prefix("NODE ") {
            self.commit_current(lineno);
            self.current = Node::new(title);
            return;
        }
        for (prefix, kind) in PREFIX_COMMANDS {
            if let Some(arg) = line.strip_prefix(prefix) {
                self.push_command(*kind, arg, lineno);
                return;
            }
        }
        for (word, kind) in BARE_COMMANDS {
            if line == *word {
                self.push_command(*kind, "", lineno);
                return;
            }
        }
        if line.starts_with("----") {
            return;
        }
        self.text_line(line, lineno);
    }

    fn text_line(&mut self, line: &str, lineno: usize) {
        let first_word = line.split(' ').next().unwrap_or(line);
        if looks_like_keyword(first_word) {
            self.report(
                lineno,
                format!("Uppercase word '{first_word}' is not a command"),
            );
        }
        // A separator space is appended so consecutive text lines read as
        // one flowing paragraph; an empty line stays empty and marks a
        // paragraph break.
        let text = if line.is_empty() {
            String::new()
        } else {
            format!("{line} ")
        };
        self.push_command(CommandKind::Text, text, lineno);
    }

    fn push_command(&mut self, kind: CommandKind, arg: impl Into<String>, lineno: usize) {
        self.current.commands.push(Command::new(kind, arg, lineno));
    }

    /// Store the node under construction. Redefining a title is reported
    /// and the later definition wins.
    fn commit_current(&mut self, lineno: usize) {
        if self.story.has_node(&self.current.title) {
            self.report(lineno, format!("Duplicate node '{}'", self.current.title));
        }
        let node = std::mem::take(&mut self.current);
        self.story.nodes.insert(node.title.clone(), node);
    }

    fn report(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(ParseDiagnostic {
            line,
            message: message.into(),
        });
    }
}

/// Heuristic for misspelled keywords: a fully uppercase first word of at
/// least two letters was probably meant to be a command.
fn looks_like_keyword(word: &str) -> bool {
    word.len() >= 2 && word.to_uppercase() == word && word.to_lowercase() != word
}
