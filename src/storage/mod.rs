//! Storage module for saving and loading game state
//!
//! The save format is deliberately flat and human-editable: one
//! `NODE=<title>` header line, then one `<variable>=<value>` line per
//! variable. Loading is all-or-nothing; a file that fails any check leaves
//! the caller's previous state untouched.

use std::path::Path;

use thiserror::Error;

use crate::types::GameState;

/// Why a save file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("save data is empty")]
    Empty,
    #[error("expected NODE=<title> on the first line, found '{0}'")]
    MalformedHeader(String),
    #[error("line {line}: expected <variable>=<value>, found '{text}'")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: '{value}' is not an integer")]
    BadInteger { line: usize, value: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Render state into the flat text save format.
pub fn serialize(state: &GameState) -> String {
    let mut out = format!("NODE={}\n", state.current_node);
    for (name, value) in &state.vars {
        out.push_str(&format!("{name}={value}\n"));
    }
    out
}

/// Parse the flat text save format back into a [`GameState`].
///
/// Strict on purpose: a single malformed line rejects the whole file, so a
/// half-read save can never leak into a running game.
pub fn deserialize(text: &str) -> Result<GameState, LoadError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(LoadError::Empty)?.trim();
    let mut state = match header.split_once('=') {
        Some(("NODE", title)) if !title.contains('=') => GameState {
            current_node: title.to_string(),
            ..GameState::default()
        },
        _ => return Err(LoadError::MalformedHeader(header.to_string())),
    };

    for (idx, raw) in lines.enumerate() {
        let lineno = idx + 2;
        let line = raw.trim();
        let fields: Vec<&str> = line.split('=').collect();
        let [name, value] = fields.as_slice() else {
            return Err(LoadError::MalformedLine {
                line: lineno,
                text: line.to_string(),
            });
        };
        let value: i64 = value.parse().map_err(|_| LoadError::BadInteger {
            line: lineno,
            value: value.to_string(),
        })?;
        state.vars.insert(name.to_string(), value);
    }

    Ok(state)
}

/// Write a save file, replacing any previous one.
pub fn save_to(path: &Path, state: &GameState) -> std::io::Result<()> {
    std::fs::write(path, serialize(state))
}

/// Read and parse a save file.
pub fn load_from(path: &Path) -> Result<GameState, LoadError> {
    let text = std::fs::read_to_string(path)?;
    deserialize(&text)
}

/// Whether a save file is present at the given path.
pub fn saved_game_exists(path: &Path) -> bool {
    path.exists()
}
