//! # fabula
//!
//! A line-oriented scripting engine for branching narrative games. Scripts
//! are plain text: a header of variable declarations, then named nodes
//! mixing prose with keyword commands for choices, variables and control
//! flow. The library parses a script into a [`Story`], executes one node
//! or answer at a time through an [`Interpreter`], and hands every visible
//! effect to the host through the [`EffectHandler`] trait, so the same
//! story runs under a terminal player, a graphical front end or a test.
//!
//! ## Quick Start
//!
//! ```rust
//! use fabula::{
//!     parse, Command, CommandKind, EffectHandler, GameState, Interpreter, MessageStyle,
//! };
//!
//! struct Printer;
//!
//! impl EffectHandler for Printer {
//!     fn execute_side_effect(&mut self, command: &Command) {
//!         if command.kind == CommandKind::Text {
//!             println!("{}", command.arg.trim_end());
//!         }
//!     }
//!     fn game_assert(&mut self, ok: bool, message: &str) {
//!         if !ok {
//!             eprintln!("script error: {message}");
//!         }
//!     }
//!     fn debug_msg(&mut self, _message: &str, _style: MessageStyle) {}
//! }
//!
//! let script = "\
//! DEFINE lamp
//! NODE START
//! The cellar is pitch black.
//! ANSWER Feel around for a lamp.
//! SET lamp
//! ANSWER Wait.
//! ";
//!
//! let (story, diagnostics) = parse(script);
//! assert!(diagnostics.is_empty());
//!
//! let mut state = GameState::fresh(&story);
//! let mut printer = Printer;
//! let answers = Interpreter::new(&story, &mut printer).run_node(&mut state);
//!
//! assert_eq!(answers.len(), 2);
//! assert_eq!(answers[0].text, "Feel around for a lamp.");
//! ```
//!
//! For hosts that want the whole game loop managed (save files, choices,
//! live script reloading), [`Session`] wraps the pieces above into a
//! single facade; the `play` CLI mode is built on it.

pub mod cli;
pub mod expr;
pub mod lint;
pub mod parser;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod types;

// Flat exports - the main API for library users
pub use expr::{EvalError, Evaluator};
pub use lint::{LintIssue, LintLevel, LintResult, lint};
pub use parser::{ParseDiagnostic, parse};
pub use runtime::{EffectHandler, Interpreter, MessageStyle};
pub use session::Session;
pub use storage::{LoadError, load_from, save_to, saved_game_exists};
pub use types::{Answer, Command, CommandKind, GameState, Node, START_NODE, Story};
