use std::io::{self, Write};

use anyhow::Result;
use co2_core::{Table, View};
use serde::Serialize;

use co2_cli::common::{write_json, write_table, OutputFormat, MISSING};

#[derive(Serialize)]
struct HeadOutput<'a> {
    columns: &'a [String],
    rows: Vec<Vec<Option<String>>>,
}

pub fn handle(table: &Table, rows: usize, format: OutputFormat) -> Result<()> {
    render(&table.head(rows), format, io::stdout().lock())
}

fn cells(view: &View<'_>) -> Vec<Vec<Option<String>>> {
    let schema = view.schema();
    view.iter()
        .map(|record| {
            schema
                .columns()
                .iter()
                .map(|column| record.cell(schema, column))
                .collect()
        })
        .collect()
}

pub fn render<W: Write>(view: &View<'_>, format: OutputFormat, out: W) -> Result<()> {
    let rows = cells(view);
    match format {
        OutputFormat::Json => write_json(
            out,
            &HeadOutput {
                columns: view.columns(),
                rows,
            },
        ),
        OutputFormat::Table => {
            let header: Vec<&str> = view.columns().iter().map(String::as_str).collect();
            let rows: Vec<Vec<String>> = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| cell.unwrap_or_else(|| MISSING.to_string()))
                        .collect()
                })
                .collect();
            write_table(out, &header, &rows)
        }
    }
}
