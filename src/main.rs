use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use chordmap::cli::{CliArgs, RunConfig};
use chordmap::karabiner::Document;
use chordmap::table::{detect_delimiter, parse_table, Delimiter};

fn main() -> Result<()> {
    chordmap::tracing::init();

    let config = CliArgs::parse().into_config().map_err(anyhow::Error::msg)?;
    let json = run(&config)?;

    match &config.output {
        Some(path) => std::fs::write(path, json.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}

fn run(config: &RunConfig) -> Result<String> {
    let content = std::fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;

    let delimiter = config
        .delimiter
        .unwrap_or_else(|| resolve_delimiter(&config.input, &content));

    let table = parse_table(&content, delimiter)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;
    let manipulators = chordmap::compile(&table)?;
    let document = Document::assemble(config.title.clone(), &manipulators);

    let json = if config.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };
    Ok(json)
}

/// Pick a delimiter from the file extension, falling back to content
/// sniffing for extensions that don't pin one down
fn resolve_delimiter(path: &Path, content: &str) -> Delimiter {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("psv") => {
            Delimiter::from_extension(ext)
        }
        _ => detect_delimiter(content),
    }
}
