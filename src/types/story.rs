//! Parsed script representation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::command::Command;

/// Title of the node where every new game begins.
pub const START_NODE: &str = "START";

/// A named, ordered sequence of commands.
///
/// Nodes are the unit of narrative content and the target of GOTO. The
/// command list is flat: conditional blocks are resolved by the runtime
/// scanning it, not by nesting in the data model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub title: String,
    pub commands: Vec<Command>,
}

impl Node {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            commands: Vec::new(),
        }
    }
}

/// A fully parsed script: the declared variables and every node by title.
///
/// Nodes live in a `BTreeMap` so iteration order (debug dumps, lint
/// reports) is deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Variable names from DEFINE lines, in declaration order.
    pub flags: Vec<String>,
    /// All nodes, keyed by their title.
    pub nodes: BTreeMap<String, Node>,
}

impl Story {
    pub fn node(&self, title: &str) -> Option<&Node> {
        self.nodes.get(title)
    }

    pub fn has_node(&self, title: &str) -> bool {
        self.nodes.contains_key(title)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag == name)
    }

    /// Titles of all nodes, sorted.
    pub fn node_titles(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}
