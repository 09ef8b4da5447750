//! Runtime state representation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::story::{START_NODE, Story};

/// Runtime state of a playthrough: where the player is and what every
/// variable holds.
///
/// Variables are signed integers; flag-style commands (SET, UNSET, TOGGLE)
/// just move them between 0 and 1. A `BTreeMap` keeps save files and debug
/// dumps in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Title of the node the player is currently in.
    pub current_node: String,
    /// All variable values, keyed by name.
    pub vars: BTreeMap<String, i64>,
}

impl GameState {
    /// State for a brand-new game: every declared variable zeroed and the
    /// player placed in the START node.
    pub fn fresh(story: &Story) -> Self {
        let vars = story.flags.iter().map(|name| (name.clone(), 0)).collect();
        Self {
            current_node: START_NODE.to_string(),
            vars,
        }
    }

    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    /// Write a variable. The caller is responsible for checking that the
    /// variable is declared; writing here always succeeds.
    pub fn set(&mut self, name: &str, value: i64) {
        self.vars.insert(name.to_string(), value);
    }
}
