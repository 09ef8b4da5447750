//! Script command representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of instructions a script line can parse into.
///
/// Adding a variant here forces every `match` in the parser, runtime and
/// lint checks to handle it before the crate compiles again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// A line of prose to show the player
    Text,
    /// Start of a conditional block
    If,
    /// Fallback branch of a conditional block
    Else,
    /// Chained conditional branch
    Elsif,
    /// End of a conditional block
    Endif,
    /// A choice offered to the player
    Answer,
    /// Set a variable to 1
    Set,
    /// Set a variable (or every variable, with `ALL`) to 0
    Unset,
    /// Flip a variable between 0 and 1
    Toggle,
    /// Assign a value or another variable to a variable
    Let,
    /// Trigger a named visual effect
    Effect,
    /// End the current answer block without any action
    Pass,
    /// End the game
    End,
    /// Jump to another node, returning here when it finishes
    Goto,
    /// Show a named image
    Image,
    /// Play a named audio sample
    Sample,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Text => "TEXT",
            CommandKind::If => "IF",
            CommandKind::Else => "ELSE",
            CommandKind::Elsif => "ELSIF",
            CommandKind::Endif => "ENDIF",
            CommandKind::Answer => "ANSWER",
            CommandKind::Set => "SET",
            CommandKind::Unset => "UNSET",
            CommandKind::Toggle => "TOGGLE",
            CommandKind::Let => "LET",
            CommandKind::Effect => "EFFECT",
            CommandKind::Pass => "PASS",
            CommandKind::End => "END",
            CommandKind::Goto => "GOTO",
            CommandKind::Image => "IMAGE",
            CommandKind::Sample => "SAMPLE",
        };
        f.write_str(name)
    }
}

/// One parsed instruction: a kind, its free-form argument and the 1-based
/// source line it came from.
///
/// Commands synthesized at runtime (the implicit loop-back GOTO appended to
/// answers) carry line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    pub arg: String,
    pub line: usize,
}

impl Command {
    pub fn new(kind: CommandKind, arg: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            arg: arg.into(),
            line,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arg.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.arg)
        }
    }
}
