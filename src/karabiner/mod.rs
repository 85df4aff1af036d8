//! Karabiner-Elements output document
//!
//! Serde types matching the slice of the complex-modifications schema
//! this compiler emits, plus the assembly step that wraps an ordered
//! manipulator list into a rule and a top-level document.

mod document;

pub use document::{Document, OutputEntry, Rule, WireManipulator, DEFAULT_TITLE};
