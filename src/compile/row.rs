//! Row interpretation
//!
//! Turns raw table rows into [`BindingSpec`] values: resolves header
//! columns, normalizes cell text to lower case, strips the `repeat ` /
//! `lazy ` output prefixes into flags, and parses the mouse / custom /
//! modifier cell grammars. One `BindingSpec` per non-ignored data row.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::SpecError;
use crate::table::KeymapTable;

/// Highest positional key column recognized, i.e. `key 0` .. `key 9`
const MAX_KEY_COLUMNS: usize = 10;

/// How an input key participates in a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Press,
    Hold,
}

/// Key-code output of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutput {
    pub code: String,
    pub repeated: bool,
    /// Legacy flag, parsed but never emitted
    pub lazy: bool,
}

/// Mouse output of a binding: an optional pointing button plus motion axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseOutput {
    pub button: Option<String>,
    pub motion: Vec<(String, i64)>,
    pub repeated: bool,
}

/// Custom-action output of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomOutput {
    pub action: String,
    pub argument: String,
    pub repeated: bool,
}

/// One interpreted data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpec {
    /// 1-indexed line in the source table, header rows included
    pub row: usize,
    pub key: Option<KeyOutput>,
    pub mouse: Option<MouseOutput>,
    pub custom: Option<CustomOutput>,
    pub modifiers: Vec<String>,
    pub key_actions: Vec<(String, ActionKind)>,
}

/// Split a textual flag prefix off a cell value
///
/// Returns whether the prefix was present, and the value with the prefix
/// removed. Never mutates the input.
pub fn split_prefix_flag<'a>(value: &'a str, prefix: &str) -> (bool, &'a str) {
    match value.strip_prefix(prefix) {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}

/// Resolves header columns and interprets data rows
pub struct RowInterpreter {
    /// Lower-cased column name to index
    columns: HashMap<String, usize>,
    /// (column index, canonical key name) for each recognized `key N` column
    key_columns: Vec<(usize, String)>,
}

impl RowInterpreter {
    /// Build an interpreter from the table's two header rows
    pub fn new(table: &KeymapTable) -> Self {
        let columns: HashMap<String, usize> = table
            .header()
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();

        let key_columns: Vec<(usize, String)> = (0..MAX_KEY_COLUMNS)
            .filter_map(|n| columns.get(&format!("key {}", n)).copied())
            .filter_map(|idx| {
                table
                    .key_names()
                    .get(idx)
                    .map(|name| (idx, name.trim().to_lowercase()))
            })
            .collect();

        debug!(
            keys = ?key_columns.iter().map(|(_, k)| k.as_str()).collect::<Vec<_>>(),
            "resolved key columns"
        );

        Self {
            columns,
            key_columns,
        }
    }

    /// Interpret all data rows, lazily, in row order
    ///
    /// Ignored rows are skipped; each remaining row yields one
    /// `BindingSpec` or the `SpecError` that invalidates it.
    pub fn bindings<'a>(
        &'a self,
        table: &'a KeymapTable,
    ) -> impl Iterator<Item = Result<BindingSpec, SpecError>> + 'a {
        table
            .data_rows()
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| self.interpret(idx + 3, row).transpose())
    }

    /// Interpret one data row; `Ok(None)` means the row is ignored
    pub fn interpret(
        &self,
        row_number: usize,
        row: &[String],
    ) -> Result<Option<BindingSpec>, SpecError> {
        if self.cell(row, "ignore").is_some() {
            debug!(row = row_number, "row ignored");
            return Ok(None);
        }

        let key = self.cell(row, "key").map(|cell| parse_key_output(&cell));
        let mouse = self
            .cell(row, "mouse")
            .map(|cell| parse_mouse_output(row_number, &cell))
            .transpose()?;
        let custom = self
            .cell(row, "custom action")
            .map(|cell| parse_custom_output(row_number, &cell))
            .transpose()?;

        if key.is_none() && mouse.is_none() && custom.is_none() {
            return Err(SpecError::MissingOutput { row: row_number });
        }

        if let Some(output) = &key {
            if output.lazy {
                warn!(
                    row = row_number,
                    key = %output.code,
                    "'lazy' output flag is deprecated and has no effect"
                );
            }
        }

        let modifiers = self
            .cell(row, "modifiers")
            .map(|cell| parse_modifiers(&cell))
            .unwrap_or_default();

        let key_actions = self
            .key_columns
            .iter()
            .filter_map(|(idx, name)| {
                cell_at(row, *idx).map(|action| (name.clone(), parse_action_kind(&action)))
            })
            .collect();

        Ok(Some(BindingSpec {
            row: row_number,
            key,
            mouse,
            custom,
            modifiers,
            key_actions,
        }))
    }

    /// Look up a named column's cell, normalized; empty cells read as `None`
    fn cell(&self, row: &[String], column: &str) -> Option<String> {
        let idx = *self.columns.get(column)?;
        cell_at(row, idx)
    }
}

fn cell_at(row: &[String], idx: usize) -> Option<String> {
    let value = row.get(idx)?.trim().to_lowercase();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_action_kind(action: &str) -> ActionKind {
    // Anything that is not literally "press" counts as a hold
    if action == "press" {
        ActionKind::Press
    } else {
        ActionKind::Hold
    }
}

fn parse_key_output(cell: &str) -> KeyOutput {
    let (repeated, rest) = split_prefix_flag(cell, "repeat ");
    let (lazy, code) = split_prefix_flag(rest, "lazy ");
    KeyOutput {
        code: code.to_string(),
        repeated,
        lazy,
    }
}

/// Parse a mouse cell: whitespace-delimited key/value pairs
///
/// A `button` key names a pointing button (`button 1` → `button1`); any
/// other key is a signed motion parameter (`y -1536`).
fn parse_mouse_output(row: usize, cell: &str) -> Result<MouseOutput, SpecError> {
    let malformed = || SpecError::MalformedMouseAction {
        row,
        cell: cell.to_string(),
    };

    let (repeated, rest) = split_prefix_flag(cell, "repeat ");
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return Err(malformed());
    }

    let mut button = None;
    let mut motion = Vec::new();
    for pair in tokens.chunks(2) {
        let (name, value) = (pair[0], pair[1]);
        if name == "button" {
            button = Some(if value.starts_with("button") {
                value.to_string()
            } else {
                format!("button{}", value)
            });
        } else {
            let amount: i64 = value.parse().map_err(|_| malformed())?;
            motion.push((name.to_string(), amount));
        }
    }

    Ok(MouseOutput {
        button,
        motion,
        repeated,
    })
}

/// Parse a custom-action cell: an action identifier and its argument
fn parse_custom_output(row: usize, cell: &str) -> Result<CustomOutput, SpecError> {
    let (repeated, rest) = split_prefix_flag(cell, "repeat ");
    let mut tokens = rest.splitn(2, char::is_whitespace);
    let action = tokens.next().unwrap_or_default();
    let argument = tokens.next().map(str::trim).unwrap_or_default();
    if action.is_empty() || argument.is_empty() {
        return Err(SpecError::MalformedCustomAction {
            row,
            cell: cell.to_string(),
        });
    }
    Ok(CustomOutput {
        action: action.to_string(),
        argument: argument.to_string(),
        repeated,
    })
}

/// Parse a modifiers cell: names joined with `+`, whitespace tolerated
fn parse_modifiers(cell: &str) -> Vec<String> {
    cell.split('+')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
