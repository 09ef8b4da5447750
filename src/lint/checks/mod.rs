//! Individual lint check implementations

pub mod flow;
pub mod references;
pub mod structure;
