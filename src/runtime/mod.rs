//! Command execution
//!
//! The interpreter walks a node's flat command list with a cursor.
//! IF/ELSIF/ELSE/ENDIF blocks are resolved by mutually recursive scanning
//! functions rather than a pre-built block tree, GOTO behaves like a call
//! (the target node runs to completion, then control returns to the
//! command after the GOTO), and ANSWER commands are collected into the
//! choices offered to the player next.
//!
//! Script mistakes never stop a pass. They are reported through the
//! handler's assertion channel and execution degrades: a bad condition is
//! false, a missing node is skipped, an unterminated block runs to the end
//! of the node.

use crate::expr::Evaluator;
use crate::types::{Answer, Command, CommandKind, GameState, Story};


/// How important a debug message is to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Execution tracing, e.g. node transitions.
    Muted,
    /// Player-relevant notices, e.g. game saved.
    Notice,
    /// Script problems surfaced while playing.
    Alert,
}

/// The host side of the interpreter.
///
/// The interpreter never renders, plays audio or ends the process; it
/// hands every externally visible command to this trait and trusts the
/// host to do something sensible with it.
pub trait EffectHandler {
    /// Perform one presentation command: TEXT, IMAGE, SAMPLE, EFFECT or
    /// END. An END only signals that the script wants the game over; the
    /// pass keeps running, so any remaining commands still arrive after
    /// it.
    fn execute_side_effect(&mut self, command: &Command);

    /// Non-fatal script error channel. Called with `ok == false` and a
    /// description whenever the script does something invalid; execution
    /// continues afterwards.
    fn game_assert(&mut self, ok: bool, message: &str);

    /// Diagnostic narration. Hosts may ignore it entirely.
    fn debug_msg(&mut self, message: &str, style: MessageStyle);
}

/// Executes command sequences against a story.
///
/// One [`run_node`](Self::run_node) or
/// [`run_commands`](Self::run_commands) call is one complete pass: it
/// mutates the game state, forwards side effects, and returns the answers
/// the player can choose from. The interpreter keeps no cursor between
/// passes.
pub struct Interpreter<'a> {
    story: &'a Story,
    handler: &'a mut dyn EffectHandler,
    evaluator: Evaluator,
}

impl<'a> Interpreter<'a> {
    pub fn new(story: &'a Story, handler: &'a mut dyn EffectHandler) -> Self {
        Self {
            story,
            handler,
            evaluator: Evaluator::new(),
        }
    }

    /// Run the node the state currently points at, start to finish.
    pub fn run_node(&mut self, state: &mut GameState) -> Vec<Answer> {
        let story = self.story;
        match story.node(&state.current_node) {
            Some(node) => self.run_commands(state, &node.commands),
            None => {
                let message = format!("Node: '{}' not found!", state.current_node);
                self.report(&message);
                Vec::new()
            }
        }
    }

    /// Run an arbitrary command sequence, typically a chosen answer's
    /// action list.
    pub fn run_commands(&mut self, state: &mut GameState, commands: &[Command]) -> Vec<Answer> {
        let mut answers = Vec::new();
        let mut cursor = 0;
        self.execute_statements(state, &mut answers, commands, &mut cursor);
        answers
    }

    /// Top level of the traversal: walk commands until the end of the
    /// slice. Re-entered for every GOTO target.
    fn execute_statements(
        &mut self,
        state: &mut GameState,
        answers: &mut Vec<Answer>,
        commands: &[Command],
        cursor: &mut usize,
    ) {
        while *cursor < commands.len() {
            let command = &commands[*cursor];
            match command.kind {
                CommandKind::Answer => {
                    let answer = self.execute_answer(state, commands, cursor);
                    answers.push(answer);
                }
                CommandKind::If => self.evaluate_if(state, answers, commands, cursor),
                CommandKind::Pass => self.report("PASS without ANSWER"),
                CommandKind::Endif | CommandKind::Else | CommandKind::Elsif => {
                    self.report("ELSE / ELSIF / ENDIF without IF");
                }
                CommandKind::Text
                | CommandKind::Set
                | CommandKind::Unset
                | CommandKind::Toggle
                | CommandKind::Let
                | CommandKind::Effect
                | CommandKind::End
                | CommandKind::Goto
                | CommandKind::Image
                | CommandKind::Sample => self.execute_statement(state, answers, command),
            }
            if *cursor < commands.len() {
                *cursor += 1;
            }
        }
    }

    /// Run one non-control command.
    fn execute_statement(
        &mut self,
        state: &mut GameState,
        answers: &mut Vec<Answer>,
        command: &Command,
    ) {
        match command.kind {
            CommandKind::End
            | CommandKind::Text
            | CommandKind::Image
            | CommandKind::Sample
            | CommandKind::Effect => self.handler.execute_side_effect(command),
            CommandKind::Set => self.set_var(state, &command.arg, 1),
            CommandKind::Unset => {
                if command.arg == "ALL" {
                    for value in state.vars.values_mut() {
                        *value = 0;
                    }
                } else {
                    self.set_var(state, &command.arg, 0);
                }
            }
            CommandKind::Toggle => {
                let value = if self.get_var(state, &command.arg) != 0 {
                    0
                } else {
                    1
                };
                self.set_var(state, &command.arg, value);
            }
            CommandKind::Let => {
                self.evaluator.exec_assignment(state, &command.arg);
                if !self.evaluator.is_valid() {
                    let message = self.evaluator.error_text();
                    self.report(&message);
                }
            }
            CommandKind::Goto => self.goto_node(state, answers, command),
            // Control commands are consumed by the cursor-level dispatch;
            // one reaching this far is deliberately a no-op.
            CommandKind::Answer
            | CommandKind::If
            | CommandKind::Else
            | CommandKind::Elsif
            | CommandKind::Endif
            | CommandKind::Pass => {}
        }
    }

    /// Call into another node. The current node marker moves first, so
    /// answers collected inside the target loop back to the target, then
    /// the target's commands run to completion and control returns to the
    /// caller's next command.
    fn goto_node(&mut self, state: &mut GameState, answers: &mut Vec<Answer>, command: &Command) {
        let story = self.story;
        let Some(target) = story.node(&command.arg) else {
            let message = format!("Node: '{}' not found!", command.arg);
            self.report(&message);
            return;
        };
        self.debug(&format!("Going to node: '{}'", command.arg));
        state.current_node = command.arg.clone();
        let mut cursor = 0;
        self.execute_statements(state, answers, &target.commands, &mut cursor);
    }

    /// Resolve one IF..ENDIF block. On entry the cursor is on the IF; on
    /// return it rests on the matching ENDIF, or at the end of the slice
    /// when the terminator is missing (which has been reported).
    fn evaluate_if(
        &mut self,
        state: &mut GameState,
        answers: &mut Vec<Answer>,
        commands: &[Command],
        cursor: &mut usize,
    ) {
        let test = self.eval_condition(state, &commands[*cursor].arg);
        *cursor += 1;

        if test {
            self.execute_if_block(state, answers, commands, cursor);
            match commands.get(*cursor).map(|c| c.kind) {
                Some(CommandKind::Else) | Some(CommandKind::Elsif) => {
                    *cursor += 1;
                    self.skip_until_endif(commands, cursor);
                }
                _ => {}
            }
        } else {
            self.skip_if_block(commands, cursor);
            match commands.get(*cursor).map(|c| c.kind) {
                Some(CommandKind::Else) => {
                    *cursor += 1;
                    self.execute_if_block(state, answers, commands, cursor);
                    if commands.get(*cursor).map(|c| c.kind) == Some(CommandKind::Else) {
                        self.report("Two ELSE in a row");
                    }
                }
                Some(CommandKind::Elsif) => self.evaluate_if(state, answers, commands, cursor),
                _ => {}
            }
        }

        if let Some(command) = commands.get(*cursor) {
            if command.kind != CommandKind::Endif {
                self.report("Expected ENDIF but found something else");
            }
        }
    }

    /// Advance the cursor over one branch body without executing it,
    /// stopping on the next ELSE/ELSIF/ENDIF at this nesting depth. Nested
    /// IF..ENDIF blocks are skipped whole so their terminators are never
    /// mistaken for this block's.
    fn skip_if_block(&mut self, commands: &[Command], cursor: &mut usize) {
        while *cursor < commands.len() {
            match commands[*cursor].kind {
                CommandKind::If => {
                    *cursor += 1;
                    self.skip_until_endif(commands, cursor);
                }
                CommandKind::Else | CommandKind::Elsif | CommandKind::Endif => return,
                _ => {}
            }
            if *cursor < commands.len() {
                *cursor += 1;
            }
        }
        self.report("Missing ENDIF");
    }

    /// Advance the cursor to the ENDIF closing the current block,
    /// disregarding any ELSE/ELSIF branches on the way.
    fn skip_until_endif(&mut self, commands: &[Command], cursor: &mut usize) {
        while *cursor < commands.len() {
            self.skip_if_block(commands, cursor);
            match commands.get(*cursor).map(|c| c.kind) {
                Some(CommandKind::Endif) => return,
                Some(CommandKind::Else) | Some(CommandKind::Elsif) => {}
                // Off the end of the slice; skip_if_block reported it.
                _ => return,
            }
            *cursor += 1;
        }
        self.report("Missing ENDIF");
    }

    /// Execute one branch body until the ELSE/ELSIF/ENDIF that closes it,
    /// collecting answers and resolving nested IFs on the way.
    fn execute_if_block(
        &mut self,
        state: &mut GameState,
        answers: &mut Vec<Answer>,
        commands: &[Command],
        cursor: &mut usize,
    ) {
        while *cursor < commands.len() {
            let command = &commands[*cursor];
            match command.kind {
                CommandKind::If => self.evaluate_if(state, answers, commands, cursor),
                CommandKind::Endif | CommandKind::Else | CommandKind::Elsif => return,
                CommandKind::Answer => {
                    let answer = self.execute_answer(state, commands, cursor);
                    answers.push(answer);
                }
                CommandKind::Text
                | CommandKind::Set
                | CommandKind::Unset
                | CommandKind::Toggle
                | CommandKind::Let
                | CommandKind::Effect
                | CommandKind::End
                | CommandKind::Goto
                | CommandKind::Pass
                | CommandKind::Image
                | CommandKind::Sample => self.execute_statement(state, answers, command),
            }
            if *cursor < commands.len() {
                *cursor += 1;
            }
        }
        self.report("Missing ENDIF");
    }

    /// Collect one answer: the ANSWER's display text plus everything up to
    /// its terminator as the action list.
    ///
    /// Another ANSWER ends this one (the cursor backs up so the caller
    /// re-visits it), PASS ends it, and an END or GOTO is taken as the
    /// final action. In every case without an explicit END or GOTO a
    /// loop-back GOTO to the current node is appended, so a chosen answer
    /// always leads somewhere.
    fn execute_answer(
        &mut self,
        state: &GameState,
        commands: &[Command],
        cursor: &mut usize,
    ) -> Answer {
        let mut answer = Answer::new(commands[*cursor].arg.clone());
        *cursor += 1;

        while *cursor < commands.len() {
            let command = &commands[*cursor];
            match command.kind {
                CommandKind::Answer => {
                    answer.commands.push(loopback_goto(state));
                    *cursor -= 1;
                    return answer;
                }
                CommandKind::Pass => {
                    answer.commands.push(loopback_goto(state));
                    return answer;
                }
                CommandKind::End | CommandKind::Goto => {
                    answer.commands.push(command.clone());
                    return answer;
                }
                CommandKind::If => {
                    let message = format!(
                        "Not allowed to have an IF inside an ANSWER block in line: {}",
                        command.line
                    );
                    self.report(&message);
                    // Abandon the rest of the node; the answer still gets
                    // its loop-back below.
                    *cursor = commands.len();
                }
                _ => answer.commands.push(command.clone()),
            }
            if *cursor < commands.len() {
                *cursor += 1;
            }
        }

        answer.commands.push(loopback_goto(state));
        answer
    }

    /// Evaluate an IF/ELSIF condition, surfacing evaluator errors through
    /// the assertion channel.
    fn eval_condition(&mut self, state: &GameState, text: &str) -> bool {
        let test = self.evaluator.eval_as_bool(state, text);
        if !self.evaluator.is_valid() {
            let message = self.evaluator.error_text();
            self.report(&message);
        }
        test
    }

    fn get_var(&mut self, state: &GameState, name: &str) -> i64 {
        match state.get(name) {
            Some(value) => value,
            None => {
                let message = format!("Variable: '{name}' not found!");
                self.report(&message);
                0
            }
        }
    }

    /// Write a variable, reporting instead of writing when it was never
    /// declared. Scripts cannot conjure variables at runtime.
    fn set_var(&mut self, state: &mut GameState, name: &str, value: i64) {
        if state.has_var(name) {
            state.set(name, value);
        } else {
            let message = format!("Variable: '{name}' not found!");
            self.report(&message);
        }
    }

    fn report(&mut self, message: &str) {
        log::warn!("script error: {message}");
        self.handler.game_assert(false, message);
    }

    fn debug(&mut self, message: &str) {
        log::debug!("{message}");
        self.handler.debug_msg(message, MessageStyle::Muted);
    }
}

/// The implicit `GOTO <current node>` appended to answers without an
/// explicit destination. Synthesized commands carry line 0.
fn loopback_goto(state: &GameState) -> Command {
    Command::new(CommandKind::Goto, state.current_node.clone(), 0)
}
