//! Raw keymap table input
//!
//! Reads the tabular keymap source into rows of strings. The table format
//! is a two-line header (column names, then canonical key names) followed
//! by one data row per binding:
//!
//! ```text
//! key,      modifiers, ignore, key 0, key 1, key 2
//! ,         ,          ,       j,     k,     l
//! escape,   ,          ,       press, press,
//! spacebar, shift,     ,       hold,  ,      press
//! ```
//!
//! Interpretation of the rows happens in [`crate::compile`]; this module
//! only deals with getting cells out of a file.

mod model;
mod parser;

pub use model::{Delimiter, KeymapTable};
pub use parser::{detect_delimiter, parse_table, ParseError};
