use std::io::{self, Write};

use anyhow::Result;
use co2_core::{filter_by_year, year_snapshot, MapValue, Metric, Table, YEAR_SLIDER_RANGE};
use serde::Serialize;
use tracing::{info, warn};

use co2_cli::common::{fmt_value, write_json, write_table, OutputFormat, MISSING};
use co2_cli::MapMetric;

/// Values for one map panel.
#[derive(Debug, Serialize)]
pub struct MapPanel {
    pub year: i32,
    pub metric: Metric,
    pub color_range: Option<(f64, f64)>,
    pub values: Vec<MapValue>,
}

/// One panel per metric, each from its own year view.
pub fn collect(table: &Table, year: i32, metrics: &[MapMetric]) -> Vec<MapPanel> {
    metrics
        .iter()
        .map(|&metric| {
            let metric: Metric = metric.into();
            let view = filter_by_year(table, year);
            info!(year, metric = metric.column(), rows = view.len(), "map view derived");
            MapPanel {
                year,
                metric,
                color_range: metric.color_range(),
                values: year_snapshot(&view, metric),
            }
        })
        .collect()
}

pub fn handle(
    table: &Table,
    year: i32,
    metric: Option<MapMetric>,
    format: OutputFormat,
) -> Result<()> {
    if !YEAR_SLIDER_RANGE.contains(&year) {
        warn!(
            "year {year} is outside {}-{}",
            YEAR_SLIDER_RANGE.start(),
            YEAR_SLIDER_RANGE.end()
        );
    }
    let panels = collect(table, year, &MapMetric::selected(metric));
    render(&panels, format, io::stdout().lock())
}

pub fn render<W: Write>(panels: &[MapPanel], format: OutputFormat, mut out: W) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, panels);
    }
    for panel in panels {
        let range = panel
            .color_range
            .map(|(lo, hi)| format!("{lo}..{hi}"))
            .unwrap_or_else(|| MISSING.to_string());
        writeln!(
            out,
            "# {} in {} (color range {range})",
            panel.metric.column(),
            panel.year
        )?;
        if panel.values.is_empty() {
            writeln!(out, "No rows for {}.", panel.year)?;
            continue;
        }
        let rows: Vec<Vec<String>> = panel
            .values
            .iter()
            .map(|v| {
                vec![
                    v.iso_code.clone().unwrap_or_else(|| MISSING.to_string()),
                    v.country.clone(),
                    fmt_value(v.value),
                ]
            })
            .collect();
        write_table(&mut out, &["ISO", "COUNTRY", "VALUE"], &rows)?;
    }
    Ok(())
}
