//! Output helpers shared across commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use tabwriter::TabWriter;

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table
    #[default]
    Table,
    /// JSON document (pipe-friendly)
    Json,
}

/// Placeholder printed for a missing value.
pub const MISSING: &str = "-";

/// Format an optional measurement.
pub fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => MISSING.to_string(),
    }
}

/// Write tab-separated `rows` under `header` as aligned columns.
pub fn write_table<W: Write>(out: W, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = TabWriter::new(out);
    writeln!(writer, "{}", header.join("\t"))?;
    for row in rows {
        writeln!(writer, "{}", row.join("\t"))?;
    }
    writer.flush().context("writing table")?;
    Ok(())
}

/// Pretty-print `value` as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).context("serializing output")?;
    writeln!(out)?;
    Ok(())
}
