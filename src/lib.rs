//! chordmap - compiles a CSV chord keymap into Karabiner-Elements rules
//!
//! This crate turns a tabular keymap specification (one row per binding,
//! one column per physical key) into the priority-ordered "manipulator"
//! rules the Karabiner-Elements engine consumes.

pub mod cli;
pub mod compile;
pub mod karabiner;
pub mod table;
pub mod tracing;

// Re-export commonly used types
pub use compile::{compile, Manipulator, SpecError};
pub use karabiner::Document;
pub use table::{KeymapTable, ParseError};
