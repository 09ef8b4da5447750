//! Core types for the fabula library
//!
//! This module contains the fundamental types that form the public API:
//! - Command: One parsed script instruction
//! - Story: The parsed script as a whole, nodes keyed by title
//! - GameState: Runtime state, the current node plus all variables
//! - Answer: A choice offered to the player and its consequences

pub mod answer;
pub mod command;
pub mod state;
pub mod story;

pub use answer::Answer;
pub use command::{Command, CommandKind};
pub use state::GameState;
pub use story::{Node, START_NODE, Story};
