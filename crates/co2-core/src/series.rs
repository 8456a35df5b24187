//! Chart-ready shapes derived from a [`View`].
//!
//! These helpers only reshape rows; they hold no state and do not filter. Each
//! panel should derive its own view and its own series from it.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::record::{EmissionsRecord, CO2, CO2_PER_CAPITA, POPULATION};
use crate::table::View;

/// Countries preselected in the trend panel.
pub const DEFAULT_COUNTRIES: [&str; 5] = [
    "World",
    "United States",
    "China",
    "United Kingdom",
    "Canada",
];

/// Bounds offered by the year picker of the map panels.
pub const YEAR_SLIDER_RANGE: RangeInclusive<i32> = 1750..=2020;

/// Numeric column a panel plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Co2,
    Co2PerCapita,
    Population,
}

impl Metric {
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Co2 => CO2,
            Metric::Co2PerCapita => CO2_PER_CAPITA,
            Metric::Population => POPULATION,
        }
    }

    pub fn value(&self, record: &EmissionsRecord) -> Option<f64> {
        match self {
            Metric::Co2 => record.co2,
            Metric::Co2PerCapita => record.co2_per_capita,
            Metric::Population => record.population.map(|p| p as f64),
        }
    }

    /// Fixed color scale bounds used by the map panels.
    pub fn color_range(&self) -> Option<(f64, f64)> {
        match self {
            Metric::Co2 => Some((0.0, 300.0)),
            Metric::Co2PerCapita => Some((0.0, 10.0)),
            Metric::Population => None,
        }
    }
}

/// A single point; `value` is `None` where the dataset has a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// One line of a per-country trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
}

impl CountrySeries {
    /// Number of points carrying a value.
    pub fn observed(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Most recent point that has a value.
    pub fn latest(&self) -> Option<SeriesPoint> {
        self.points.iter().rev().find(|p| p.value.is_some()).copied()
    }
}

/// One region of a choropleth for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapValue {
    pub country: String,
    /// Aggregates carry no ISO code and cannot be placed on a map.
    pub iso_code: Option<String>,
    pub value: Option<f64>,
}

/// Group a view into per-country series, countries in first-appearance order.
pub fn series_by_country(view: &View<'_>, metric: Metric) -> Vec<CountrySeries> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<CountrySeries> = Vec::new();
    for record in view.iter() {
        let slot = *slots.entry(record.country.as_str()).or_insert_with(|| {
            series.push(CountrySeries {
                country: record.country.clone(),
                metric,
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[slot].points.push(SeriesPoint {
            year: record.year,
            value: metric.value(record),
        });
    }
    series
}

/// One map entry per row of the view.
pub fn year_snapshot(view: &View<'_>, metric: Metric) -> Vec<MapValue> {
    view.iter()
        .map(|record| MapValue {
            country: record.country.clone(),
            iso_code: record.iso_code.clone(),
            value: metric.value(record),
        })
        .collect()
}
