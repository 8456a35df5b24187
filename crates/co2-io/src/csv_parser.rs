//! CSV text to typed [`Table`].
//!
//! **Expected CSV format:** OWID layout with a header row. `country` and `year` are
//! required; `iso_code`, `population`, `co2` and `co2_per_capita` are read when
//! present, and every other column is carried through untyped.

use std::collections::HashSet;
use std::io::Read;

use co2_core::record::{CO2, CO2_PER_CAPITA, COUNTRY, ISO_CODE, POPULATION, YEAR};
use co2_core::{Co2Error, Co2Result, EmissionsRecord, Schema, Table};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// Parse a complete CSV document.
pub fn parse_table(text: &str) -> Co2Result<Table> {
    parse_reader(text.as_bytes())
}

/// Parse CSV from any reader. Any malformed row fails the whole parse.
pub fn parse_reader<R: Read>(reader: R) -> Co2Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| Co2Error::unavailable(format!("reading CSV header: {e}")))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Co2Error::unavailable("CSV document has no header row"));
    }

    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    if let Some(dup) = first_duplicate(&columns) {
        return Err(Co2Error::unavailable(format!(
            "CSV header repeats column \"{dup}\""
        )));
    }
    let schema = Schema::new(columns);
    let layout = ColumnLayout::resolve(&schema)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| Co2Error::unavailable(format!("malformed CSV record: {e}")))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        rows.push(layout.read(&record, line)?);
    }

    debug!(
        rows = rows.len(),
        columns = schema.columns().len(),
        "parsed emissions table"
    );
    Ok(Table::new(schema, rows))
}

/// Header positions of the typed columns.
struct ColumnLayout {
    country: usize,
    year: usize,
    iso_code: Option<usize>,
    population: Option<usize>,
    co2: Option<usize>,
    co2_per_capita: Option<usize>,
    extra: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(schema: &Schema) -> Co2Result<Self> {
        let position = |name: &str| schema.columns().iter().position(|c| c == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| {
                Co2Error::unavailable(format!("CSV is missing required column \"{name}\""))
            })
        };
        let extra = schema
            .extra_columns()
            .iter()
            .filter_map(|name| position(name.as_str()))
            .collect();

        Ok(Self {
            country: required(COUNTRY)?,
            year: required(YEAR)?,
            iso_code: position(ISO_CODE),
            population: position(POPULATION),
            co2: position(CO2),
            co2_per_capita: position(CO2_PER_CAPITA),
            extra,
        })
    }

    fn read(&self, record: &StringRecord, line: u64) -> Co2Result<EmissionsRecord> {
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| {
            idx.map(field)
                .map(str::trim)
                .filter(|s| !is_missing_token(s))
        };

        let raw_year = field(self.year).trim();
        let year = raw_year.parse::<i32>().map_err(|_| {
            Co2Error::unavailable(format!("line {line}: invalid year {raw_year:?}"))
        })?;

        let population = optional(self.population)
            .map(|raw| parse_count(raw, POPULATION, line))
            .transpose()?
            .flatten();

        Ok(EmissionsRecord {
            country: field(self.country).to_string(),
            iso_code: optional(self.iso_code).map(str::to_string),
            year,
            co2: parse_optional_float(optional(self.co2), CO2, line)?,
            co2_per_capita: parse_optional_float(
                optional(self.co2_per_capita),
                CO2_PER_CAPITA,
                line,
            )?,
            population,
            extra: self
                .extra
                .iter()
                .map(|&idx| optional(Some(idx)).map(str::to_string))
                .collect(),
        })
    }
}

/// Cell spellings read as missing, following the pandas `read_csv` defaults.
const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

/// Column names are unique so every cell has exactly one place in a record.
fn first_duplicate(columns: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(String::as_str)
        .find(|name| !seen.insert(*name))
}

fn parse_float(raw: &str, column: &str, line: u64) -> Co2Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        Co2Error::unavailable(format!("line {line}: invalid {column} value {raw:?}"))
    })
}

/// NaN cells are treated as missing, the same as empty ones.
fn parse_optional_float(raw: Option<&str>, column: &str, line: u64) -> Co2Result<Option<f64>> {
    match raw {
        None => Ok(None),
        Some(raw) => {
            let value = parse_float(raw, column, line)?;
            Ok(if value.is_nan() { None } else { Some(value) })
        }
    }
}

/// Counts are sometimes written as floats (`1234.0`).
fn parse_count(raw: &str, column: &str, line: u64) -> Co2Result<Option<u64>> {
    let value = parse_float(raw, column, line)?;
    if value.is_nan() {
        return Ok(None);
    }
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(Co2Error::unavailable(format!(
            "line {line}: {column} must be a non-negative count, got {raw:?}"
        )));
    }
    Ok(Some(value.round() as u64))
}
