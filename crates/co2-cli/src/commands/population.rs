use std::io::{self, Write};

use anyhow::Result;
use co2_core::{filter_by_country, Table, View};
use serde::Serialize;
use tracing::{info, warn};

use co2_cli::common::{fmt_value, write_json, write_table, OutputFormat, MISSING};

#[derive(Debug, Serialize, PartialEq)]
pub struct PopulationRow {
    pub year: i32,
    pub population: Option<u64>,
    pub co2_per_capita: Option<f64>,
}

pub fn rows(view: &View<'_>) -> Vec<PopulationRow> {
    view.iter()
        .map(|r| PopulationRow {
            year: r.year,
            population: r.population,
            co2_per_capita: r.co2_per_capita,
        })
        .collect()
}

pub fn handle(table: &Table, country: &str, format: OutputFormat) -> Result<()> {
    let view = filter_by_country(table, country);
    if view.is_empty() {
        warn!("no rows for \"{country}\" (names are matched exactly)");
    }
    info!(country, rows = view.len(), "population view derived");
    render(&rows(&view), format, io::stdout().lock())
}

pub fn render<W: Write>(rows: &[PopulationRow], format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "No rows matched the selected country.")?;
                return Ok(());
            }
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.year.to_string(),
                        r.population
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| MISSING.to_string()),
                        fmt_value(r.co2_per_capita),
                    ]
                })
                .collect();
            write_table(out, &["YEAR", "POPULATION", "CO2_PER_CAPITA"], &cells)
        }
    }
}
