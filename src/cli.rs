//! Command-line argument parsing for the compiler
//!
//! Supports:
//! - Reading a keymap table from a CSV/TSV/PSV file
//! - Writing the JSON document to a file or stdout
//! - Overriding the detected cell delimiter and the document title

use clap::Parser;
use std::path::PathBuf;

use crate::karabiner::DEFAULT_TITLE;
use crate::table::Delimiter;

/// Compile a CSV chord keymap into Karabiner-Elements rules
#[derive(Parser, Debug)]
#[command(name = "chordmap", version, about = "Compile a CSV chord keymap into Karabiner-Elements rules")]
pub struct CliArgs {
    /// Keymap table to compile
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write the JSON document here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Document title
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Cell delimiter: comma, tab, pipe, or semicolon (default: detected)
    #[arg(long, value_name = "NAME")]
    pub delimiter: Option<String>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub title: String,
    /// Explicit delimiter override; `None` means detect from the input
    pub delimiter: Option<Delimiter>,
    pub compact: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let delimiter = match self.delimiter.as_deref() {
            None => None,
            Some("comma") => Some(Delimiter::Comma),
            Some("tab") => Some(Delimiter::Tab),
            Some("pipe") => Some(Delimiter::Pipe),
            Some("semicolon") => Some(Delimiter::Semicolon),
            Some(other) => return Err(format!("Unknown delimiter: {}", other)),
        };

        Ok(RunConfig {
            input: self.input,
            output: self.output,
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            delimiter,
            compact: self.compact,
        })
    }
}
