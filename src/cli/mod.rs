//! Command-line interface modules

pub mod check;
pub mod play;
