use std::io::{self, Write};

use anyhow::Result;
use co2_core::{filter_by_countries, series_by_country, CountrySeries, Metric, Table};
use tracing::{info, warn};

use co2_cli::common::{fmt_value, write_json, write_table, OutputFormat};
use co2_cli::MapMetric;

/// Derive one series set per metric, each from its own filtered view.
pub fn collect(table: &Table, countries: &[String], metrics: &[MapMetric]) -> Vec<CountrySeries> {
    let mut all = Vec::new();
    for &metric in metrics {
        let view = filter_by_countries(table, countries);
        info!(
            metric = Metric::from(metric).column(),
            rows = view.len(),
            "trend view derived"
        );
        all.extend(series_by_country(&view, metric.into()));
    }
    all
}

pub fn handle(
    table: &Table,
    countries: &[String],
    metric: Option<MapMetric>,
    format: OutputFormat,
) -> Result<()> {
    let series = collect(table, countries, &MapMetric::selected(metric));
    let found: Vec<&str> = series.iter().map(|s| s.country.as_str()).collect();
    for name in countries {
        if !found.contains(&name.as_str()) {
            warn!("no rows for \"{name}\" (names are matched exactly)");
        }
    }
    render(&series, format, io::stdout().lock())
}

pub fn render<W: Write>(series: &[CountrySeries], format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, series),
        OutputFormat::Table => {
            if series.is_empty() {
                writeln!(out, "No rows matched the selected countries.")?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = series
                .iter()
                .flat_map(|s| {
                    s.points.iter().map(move |p| {
                        vec![
                            s.metric.column().to_string(),
                            s.country.clone(),
                            p.year.to_string(),
                            fmt_value(p.value),
                        ]
                    })
                })
                .collect();
            write_table(out, &["METRIC", "COUNTRY", "YEAR", "VALUE"], &rows)
        }
    }
}
