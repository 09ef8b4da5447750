//! Condition and assignment evaluation
//!
//! IF/ELSIF conditions and LET assignments share one evaluator. Expressions
//! are split into tokens on spaces (parentheses always stand alone), then
//! walked left to right by recursive descent. There is no operator
//! precedence: `a AND b OR c` groups as `a AND (b OR c)` because the
//! continuation after `AND` greedily parses the rest.
//!
//! Evaluation never aborts. Every problem is pushed onto an error list and
//! the evaluator degrades to `false`/`0`, so a malformed expression is
//! diagnosed in full in one pass. Callers check [`Evaluator::is_valid`]
//! after each call.

use thiserror::Error;

use crate::types::GameState;

#[cfg(test)]
mod tests;

/// A single problem found while evaluating an expression or assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unknown token '{0}'")]
    UnknownToken(String),
    #[error("Unclosed parenthesis")]
    UnclosedParen,
    #[error("Expected int literal or variable, found '{0}'")]
    ExpectedValue(String),
    #[error("Integer literal '{0}' out of range")]
    IntOutOfRange(String),
    #[error("LET must be followed by a variable")]
    LetDestination,
    #[error("LET variable must be followed by '='")]
    LetMissingEquals,
    #[error("Unexpected value after '='")]
    LetBadSource,
    #[error("Unhandled remainder in '{0}'")]
    TrailingTokens(String),
}

/// Split an expression into tokens.
///
/// Tokens are runs of non-space characters, except that `(` and `)` always
/// form their own token so `(x == 1)` needs no inner spaces around the
/// parentheses.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        match ch {
            ' ' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

pub(crate) fn is_int_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(CmpOp::Eq),
            "!=" => Some(CmpOp::Ne),
            "<" => Some(CmpOp::Lt),
            "<=" => Some(CmpOp::Le),
            ">" => Some(CmpOp::Gt),
            ">=" => Some(CmpOp::Ge),
            _ => None,
        }
    }

    fn apply(self, a: i64, b: i64) -> bool {
        match self {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
        }
    }
}

/// Evaluates conditions and assignments against a [`GameState`].
///
/// The evaluator owns nothing but its error list, which is cleared at the
/// start of every [`eval_as_bool`](Self::eval_as_bool) and
/// [`exec_assignment`](Self::exec_assignment) call.
#[derive(Debug, Default)]
pub struct Evaluator {
    errors: Vec<EvalError>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the most recent call completed without recording any error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors recorded by the most recent call, in the order they were hit.
    pub fn errors(&self) -> &[EvalError] {
        &self.errors
    }

    /// All recorded errors joined into one printable block.
    pub fn error_text(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Evaluate a condition. Malformed input yields `false` alongside
    /// recorded errors; it never panics or aborts.
    pub fn eval_as_bool(&mut self, state: &GameState, text: &str) -> bool {
        self.errors.clear();
        let tokens = tokenize(text);
        let mut pos = 0;
        let result = self.eval_expr(state, &tokens, &mut pos);
        if pos != tokens.len() {
            self.errors.push(EvalError::TrailingTokens(text.to_string()));
        }
        result
    }

    /// Execute a LET body of the form `<var> = <int literal or var>`.
    ///
    /// Assignment is best effort: a bad source still writes 0 so the
    /// destination is in a known state, but an undeclared destination is
    /// never created.
    pub fn exec_assignment(&mut self, state: &mut GameState, text: &str) {
        self.errors.clear();
        let tokens = tokenize(text);

        let dest = match tokens.first() {
            Some(token) if state.has_var(token) => Some(token.clone()),
            _ => {
                self.errors.push(EvalError::LetDestination);
                None
            }
        };

        if tokens.get(1).map(String::as_str) != Some("=") {
            self.errors.push(EvalError::LetMissingEquals);
        }

        let value = match tokens.get(2) {
            Some(token) if state.has_var(token) => state.get(token).unwrap_or(0),
            Some(token) if is_int_literal(token) => self.parse_int_literal(token),
            _ => {
                self.errors.push(EvalError::LetBadSource);
                0
            }
        };

        if tokens.len() > 3 {
            self.errors.push(EvalError::TrailingTokens(text.to_string()));
        }

        if let Some(dest) = dest {
            state.set(&dest, value);
        }
    }

    /// `expr := comparison | "(" expr ")" | "NOT" expr`, optionally
    /// followed by an AND/OR continuation.
    ///
    /// The continuation's right-hand side is always evaluated, even when
    /// the left-hand side already decides the result, so errors on the
    /// right are still collected. Script AND/OR does not short-circuit.
    fn eval_expr(&mut self, state: &GameState, tokens: &[String], pos: &mut usize) -> bool {
        let Some(token) = tokens.get(*pos).map(String::as_str) else {
            self.errors.push(EvalError::UnexpectedEnd);
            return false;
        };

        let result = if is_int_literal(token) || state.has_var(token) {
            self.eval_comparison(state, tokens, pos)
        } else if token == "(" {
            *pos += 1;
            let inner = self.eval_expr(state, tokens, pos);
            match tokens.get(*pos).map(String::as_str) {
                Some(")") => {
                    *pos += 1;
                    inner
                }
                _ => {
                    self.errors.push(EvalError::UnclosedParen);
                    return false;
                }
            }
        } else if token == "NOT" {
            // NOT negates everything the rest of the expression parses to,
            // continuations included: `NOT a AND b` is `NOT (a AND b)`.
            *pos += 1;
            return !self.eval_expr(state, tokens, pos);
        } else {
            self.errors.push(EvalError::UnknownToken(token.to_string()));
            return false;
        };

        match tokens.get(*pos).map(String::as_str) {
            Some("AND") => {
                *pos += 1;
                let rhs = self.eval_expr(state, tokens, pos);
                result && rhs
            }
            Some("OR") => {
                *pos += 1;
                let rhs = self.eval_expr(state, tokens, pos);
                result || rhs
            }
            _ => result,
        }
    }

    /// `comparison := value [op value]`. A bare value is truthy when it is
    /// not zero.
    fn eval_comparison(&mut self, state: &GameState, tokens: &[String], pos: &mut usize) -> bool {
        let Some(token) = tokens.get(*pos) else {
            self.errors.push(EvalError::UnexpectedEnd);
            return false;
        };
        let lhs = self.int_value(state, token);
        *pos += 1;

        let op = match tokens.get(*pos).and_then(|t| CmpOp::from_token(t)) {
            Some(op) => op,
            None => return lhs != 0,
        };
        *pos += 1;

        let Some(token) = tokens.get(*pos) else {
            self.errors.push(EvalError::UnexpectedEnd);
            return false;
        };
        let rhs = if is_int_literal(token) || state.has_var(token) {
            let value = self.int_value(state, token);
            *pos += 1;
            value
        } else {
            // The cursor stays put so the caller also reports the leftover
            // token; the comparison proceeds against 0.
            self.errors.push(EvalError::ExpectedValue(token.clone()));
            0
        };

        op.apply(lhs, rhs)
    }

    /// Resolve one token to an integer: literal, declared variable, or an
    /// error and 0.
    fn int_value(&mut self, state: &GameState, token: &str) -> i64 {
        if is_int_literal(token) {
            self.parse_int_literal(token)
        } else if let Some(value) = state.get(token) {
            value
        } else {
            self.errors.push(EvalError::ExpectedValue(token.to_string()));
            0
        }
    }

    fn parse_int_literal(&mut self, token: &str) -> i64 {
        match token.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                self.errors.push(EvalError::IntOutOfRange(token.to_string()));
                0
            }
        }
    }
}
