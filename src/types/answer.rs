//! Player choice representation

use serde::{Deserialize, Serialize};

use super::command::Command;

/// One choice offered to the player: the text to display and the commands
/// to run if it is picked.
///
/// The runtime guarantees the command list ends in a GOTO or an END, so
/// picking an answer always leads somewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub commands: Vec<Command>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            commands: Vec::new(),
        }
    }
}
