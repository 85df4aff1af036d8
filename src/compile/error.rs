//! Compilation error taxonomy
//!
//! Every failure is synchronous and fatal to the run; no partial document
//! is emitted. Row numbers are 1-indexed positions in the source table
//! (header rows included), matching what an author sees in their editor.

/// Errors raised while compiling a keymap specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Row declares no key, mouse, or custom output
    MissingOutput { row: usize },
    /// Binding has zero press-classified keys
    NoPressKeys { row: usize },
    /// Hold-and-press binding names more than one press key
    MultiPressWithHold { row: usize },
    /// Custom-action cell has fewer than two whitespace-delimited tokens
    MalformedCustomAction { row: usize, cell: String },
    /// Mouse cell is not a list of key/value pairs with numeric motion values
    MalformedMouseAction { row: usize, cell: String },
    /// A repeated pure-press chord also occurs as a hold-chord
    RepeatHoldCollision { chords: Vec<String> },
}

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecError::MissingOutput { row } => {
                write!(f, "row {}: no key, mouse, or custom output specified", row)
            }
            SpecError::NoPressKeys { row } => {
                write!(f, "row {}: no press keys specified", row)
            }
            SpecError::MultiPressWithHold { row } => {
                write!(f, "row {}: hold + multi-press is not supported", row)
            }
            SpecError::MalformedCustomAction { row, cell } => {
                write!(
                    f,
                    "row {}: custom action needs an action and an argument: {:?}",
                    row, cell
                )
            }
            SpecError::MalformedMouseAction { row, cell } => {
                write!(f, "row {}: malformed mouse action: {:?}", row, cell)
            }
            SpecError::RepeatHoldCollision { chords } => {
                write!(
                    f,
                    "repeated press output shadowed by hold chord(s): {}",
                    chords.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for SpecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_row() {
        let err = SpecError::NoPressKeys { row: 7 };
        assert_eq!(err.to_string(), "row 7: no press keys specified");
    }

    #[test]
    fn test_display_lists_colliding_chords() {
        let err = SpecError::RepeatHoldCollision {
            chords: vec!["jk".to_string(), "kl".to_string()],
        };
        assert!(err.to_string().contains("jk, kl"));
    }
}
