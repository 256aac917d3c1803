//! Entry rendering for the console.
//!
//! Two shapes: a human-readable field-per-line block, and JSON Lines for
//! piping into other tools. Absent optional fields are omitted in both.

use std::io::Write;

use anyhow::Result;

use amis_types::{Description, Entry};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse an `--format=` value.
pub fn parse_format(raw: &str) -> Option<OutputFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "text" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

/// Write every entry of one line in the chosen format.
pub fn write_entries<W: Write>(out: &mut W, entries: &[Entry], format: OutputFormat) -> Result<()> {
    for entry in entries {
        match format {
            OutputFormat::Text => write_text(out, entry)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, entry)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, entry: &Entry) -> Result<()> {
    writeln!(out, "---")?;
    writeln!(out, "term={}", entry.term)?;
    if let Some(stem) = &entry.stem {
        writeln!(out, "stem={stem}")?;
    }
    if let Some(dialects) = &entry.dialects {
        writeln!(out, "dialects={}", dialects.join("、"))?;
    }
    match &entry.description {
        Description::Single(text) if text.is_empty() => {}
        Description::Single(text) => writeln!(out, "description={text}")?,
        Description::Multiple(glosses) => writeln!(out, "description={}", glosses.join("；"))?,
    }
    if let Some(example) = &entry.example {
        writeln!(out, "example={}：{}", example.amis, example.chinese)?;
    }
    if let Some(synonyms) = &entry.synonyms {
        writeln!(out, "synonyms={}", synonyms.join("、"))?;
    }
    Ok(())
}
