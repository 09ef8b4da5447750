//! Game session facade
//!
//! A [`Session`] owns a parsed story, the running state and a save file
//! location, and drives the interpreter once per player action. Hosts keep
//! their [`EffectHandler`] and pass it into each call; the session only
//! borrows it for the duration of the pass.

use std::path::PathBuf;

use anyhow::Context;

use crate::parser::{self, ParseDiagnostic};
use crate::runtime::{EffectHandler, Interpreter, MessageStyle};
use crate::storage;
use crate::types::{Answer, Command, CommandKind, GameState, START_NODE, Story};

/// One running game.
pub struct Session {
    story: Story,
    state: GameState,
    answers: Vec<Answer>,
    save_path: PathBuf,
    ended: bool,
}

impl Session {
    pub fn new(story: Story, save_path: impl Into<PathBuf>) -> Self {
        let state = GameState::fresh(&story);
        Self {
            story,
            state,
            answers: Vec::new(),
            save_path: save_path.into(),
            ended: false,
        }
    }

    /// Parse a script and wrap it in a session. The diagnostics are
    /// returned instead of swallowed; a story with problems still plays
    /// as far as it can.
    pub fn from_source(
        source: &str,
        save_path: impl Into<PathBuf>,
    ) -> (Self, Vec<ParseDiagnostic>) {
        let (story, diagnostics) = parser::parse(source);
        (Self::new(story, save_path), diagnostics)
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The choices collected by the most recent pass.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Whether an END command has run since the last (re)start.
    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn saved_game_exists(&self) -> bool {
        storage::saved_game_exists(&self.save_path)
    }

    /// Start from scratch: fresh state, then run the START node.
    pub fn new_game(&mut self, handler: &mut dyn EffectHandler) {
        self.reset_state();
        self.run_pass(handler, None);
    }

    /// Start from the save file when one exists, from scratch otherwise.
    /// A save that fails to load is reported and the fresh state plays on.
    pub fn resume_or_new(&mut self, handler: &mut dyn EffectHandler) {
        self.reset_state();
        if self.saved_game_exists() {
            match storage::load_from(&self.save_path) {
                Ok(state) => self.state = state,
                Err(err) => {
                    report(handler, &format!("Failed to load saved game: {err}"));
                }
            }
        }
        self.run_pass(handler, None);
    }

    /// Run the given answer's actions. Returns false when the index does
    /// not name a current answer.
    pub fn choose(&mut self, handler: &mut dyn EffectHandler, index: usize) -> bool {
        let Some(answer) = self.answers.get(index) else {
            return false;
        };
        let commands = answer.commands.clone();
        self.run_pass(handler, Some(commands));
        true
    }

    /// Write the current state to the save file.
    pub fn save(&mut self, handler: &mut dyn EffectHandler) -> anyhow::Result<()> {
        storage::save_to(&self.save_path, &self.state)
            .with_context(|| format!("failed to write save file {}", self.save_path.display()))?;
        notice(handler, "Game saved");
        Ok(())
    }

    /// Replace the running state with the save file's and re-run the
    /// loaded node. On failure the previous state stays in place.
    pub fn load(&mut self, handler: &mut dyn EffectHandler) -> bool {
        match storage::load_from(&self.save_path) {
            Ok(state) => {
                self.state = state;
                self.ended = false;
                notice(handler, "Game loaded");
                self.run_pass(handler, None);
                true
            }
            Err(err) => {
                report(handler, &format!("Something went wrong while loading: {err}"));
                false
            }
        }
    }

    /// Swap in a re-parsed script without losing progress, for fast
    /// edit-and-replay cycles. The current node is kept when it still
    /// exists in the new story; otherwise play falls back to START.
    pub fn reload_script(
        &mut self,
        handler: &mut dyn EffectHandler,
        source: &str,
    ) -> Vec<ParseDiagnostic> {
        let (story, diagnostics) = parser::parse(source);
        for diagnostic in &diagnostics {
            report(handler, &diagnostic.to_string());
        }
        self.story = story;
        if !self.story.has_node(&self.state.current_node) {
            report(
                handler,
                &format!("Could not return to node '{}'", self.state.current_node),
            );
            self.state.current_node = START_NODE.to_string();
        }
        self.ended = false;
        self.run_pass(handler, None);
        diagnostics
    }

    fn reset_state(&mut self) {
        self.state = GameState::fresh(&self.story);
        self.answers.clear();
        self.ended = false;
    }

    /// One interpreter pass: either the current node or a chosen answer's
    /// commands. Replaces the answer list and watches for END.
    fn run_pass(&mut self, handler: &mut dyn EffectHandler, commands: Option<Vec<Command>>) {
        let mut watch = WatchEnd {
            inner: handler,
            ended: false,
        };
        let mut interpreter = Interpreter::new(&self.story, &mut watch);
        self.answers = match commands {
            Some(commands) => interpreter.run_commands(&mut self.state, &commands),
            None => interpreter.run_node(&mut self.state),
        };
        if watch.ended {
            self.ended = true;
        }
    }
}

fn report(handler: &mut dyn EffectHandler, message: &str) {
    log::warn!("{message}");
    handler.game_assert(false, message);
}

fn notice(handler: &mut dyn EffectHandler, message: &str) {
    log::debug!("{message}");
    handler.debug_msg(message, MessageStyle::Notice);
}

/// Forwarding handler that notices END commands passing through, so the
/// session can expose [`Session::ended`] without owning the host handler.
struct WatchEnd<'h> {
    inner: &'h mut dyn EffectHandler,
    ended: bool,
}

impl EffectHandler for WatchEnd<'_> {
    fn execute_side_effect(&mut self, command: &Command) {
        if command.kind == CommandKind::End {
            self.ended = true;
        }
        self.inner.execute_side_effect(command);
    }

    fn game_assert(&mut self, ok: bool, message: &str) {
        self.inner.game_assert(ok, message);
    }

    fn debug_msg(&mut self, message: &str, style: MessageStyle) {
        self.inner.debug_msg(message, style);
    }
}
