//! CUI player mode for running scripts
//!
//! An interactive terminal front end: story text and stage directions go
//! to stdout, the player picks answers by number. Media commands print as
//! bracketed placeholders because a terminal cannot show or play them.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use crate::runtime::{EffectHandler, MessageStyle};
use crate::session::Session;
use crate::types::{Command, CommandKind};

/// Run the player mode.
pub fn run_play(script_path: &Path, save_path: &Path, debug: bool) -> anyhow::Result<()> {
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script '{}'", script_path.display()))?;

    let (mut session, diagnostics) = Session::from_source(&source, save_path);
    for diagnostic in &diagnostics {
        println!("ERROR: {diagnostic}");
    }

    let mut handler = ConsoleHandler::new(debug);

    println!("=== fabula ===");
    println!();
    println!("Controls:");
    println!("  1-9:  choose an answer");
    println!("  s:    save");
    println!("  l:    load a saved game");
    println!("  r:    reload the script from disk");
    println!("  q:    quit");
    println!();

    session.resume_or_new(&mut handler);

    loop {
        if debug {
            display_debug_info(&session);
        }

        if session.ended() {
            println!();
            println!("== THE END ==");
            return Ok(());
        }

        show_answers(&session);

        let Some(input) = get_input(">")? else {
            // stdin closed
            println!();
            return Ok(());
        };

        match input.as_str() {
            "q" => {
                println!("Goodbye!");
                return Ok(());
            }
            "s" => {
                if let Err(err) = session.save(&mut handler) {
                    println!("ERROR: {err:#}");
                }
            }
            "l" => {
                session.load(&mut handler);
            }
            "r" => match fs::read_to_string(script_path) {
                Ok(source) => {
                    session.reload_script(&mut handler, &source);
                }
                Err(err) => {
                    println!("ERROR: could not re-read '{}': {err}", script_path.display());
                }
            },
            _ => match input.parse::<usize>() {
                Ok(n) if n >= 1 && n <= session.answers().len() => {
                    println!();
                    session.choose(&mut handler, n - 1);
                }
                _ => println!("Enter a number, 's', 'l', 'r' or 'q'."),
            },
        }
    }
}

/// Renders interpreter output on the terminal.
struct ConsoleHandler {
    debug: bool,
    active_effect: String,
}

impl ConsoleHandler {
    fn new(debug: bool) -> Self {
        Self {
            debug,
            active_effect: String::new(),
        }
    }
}

impl EffectHandler for ConsoleHandler {
    fn execute_side_effect(&mut self, command: &Command) {
        match command.kind {
            CommandKind::Text => {
                if command.arg.is_empty() {
                    println!();
                } else {
                    println!("{}", command.arg.trim_end());
                }
            }
            CommandKind::Image => println!("[image: {}]", command.arg),
            CommandKind::Sample => println!("[sound: {}]", command.arg),
            CommandKind::Effect => {
                // Repeated invocations of the running effect are dropped.
                if self.active_effect != command.arg {
                    self.active_effect = command.arg.clone();
                    println!("[effect: {}]", command.arg);
                }
            }
            // END is handled by the session; the play loop shows the
            // closing banner once the pass finishes.
            _ => {}
        }
    }

    fn game_assert(&mut self, ok: bool, message: &str) {
        if !ok {
            println!("ERROR: {message}");
        }
    }

    fn debug_msg(&mut self, message: &str, style: MessageStyle) {
        match style {
            MessageStyle::Muted => {
                if self.debug {
                    println!("[debug] {message}");
                }
            }
            MessageStyle::Notice => println!("[{message}]"),
            MessageStyle::Alert => println!("ERROR: {message}"),
        }
    }
}

/// List the current answers, numbered from 1.
fn show_answers(session: &Session) {
    if session.answers().is_empty() {
        return;
    }
    println!();
    for (i, answer) in session.answers().iter().enumerate() {
        println!("{}. {}", i + 1, answer.text);
    }
    println!();
}

/// Display debug information (only when --debug is set)
fn display_debug_info(session: &Session) {
    let vars =
        serde_json::to_string(&session.state().vars).unwrap_or_else(|_| "{}".to_string());
    println!("[debug] node={} vars={}", session.state().current_node, vars);
}

/// Get user input with an optional prompt. `None` means stdin hit EOF.
fn get_input(prompt: &str) -> io::Result<Option<String>> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
