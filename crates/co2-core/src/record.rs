//! Row schema for the OWID CO2 dataset.
//!
//! The dataset ships ~80 columns; only the handful the panels read are typed.
//! Every other column is kept verbatim so a table (and every view of it) still
//! reports the full column set of the source file.

use serde::{Deserialize, Serialize};

pub const COUNTRY: &str = "country";
pub const YEAR: &str = "year";
pub const ISO_CODE: &str = "iso_code";
pub const POPULATION: &str = "population";
pub const CO2: &str = "co2";
pub const CO2_PER_CAPITA: &str = "co2_per_capita";

/// Columns mapped onto typed [`EmissionsRecord`] fields, in canonical order.
pub const TYPED_COLUMNS: [&str; 6] = [COUNTRY, YEAR, ISO_CODE, POPULATION, CO2, CO2_PER_CAPITA];

/// Column layout of a table: every header in source order, plus the untyped remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<String>,
    extra_columns: Vec<String>,
}

impl Schema {
    /// Build a schema from a header row. Columns not in [`TYPED_COLUMNS`] become extras.
    pub fn new(columns: Vec<String>) -> Self {
        let extra_columns = columns
            .iter()
            .filter(|name| !TYPED_COLUMNS.contains(&name.as_str()))
            .cloned()
            .collect();
        Self {
            columns,
            extra_columns,
        }
    }

    /// Schema holding only the typed columns.
    pub fn canonical() -> Self {
        Self::new(TYPED_COLUMNS.iter().map(|c| c.to_string()).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of `name` within the extra cells of a record.
    pub fn extra_index(&self, name: &str) -> Option<usize> {
        self.extra_columns.iter().position(|c| c == name)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::canonical()
    }
}

/// One country-year row.
///
/// Numeric fields are `None` wherever the dataset has no value; historical
/// coverage is sparse and gaps are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsRecord {
    pub country: String,
    /// Absent for aggregate pseudo-countries such as "World" or "Asia".
    pub iso_code: Option<String>,
    pub year: i32,
    /// Total CO2 emissions (million tonnes).
    pub co2: Option<f64>,
    /// CO2 emissions per person (tonnes).
    pub co2_per_capita: Option<f64>,
    pub population: Option<u64>,
    /// Raw cells of the untyped columns, aligned with [`Schema::extra_columns`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Option<String>>,
}

impl EmissionsRecord {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            iso_code: None,
            year,
            co2: None,
            co2_per_capita: None,
            population: None,
            extra: Vec::new(),
        }
    }

    pub fn with_iso_code(mut self, iso_code: impl Into<String>) -> Self {
        self.iso_code = Some(iso_code.into());
        self
    }

    pub fn with_co2(mut self, co2: f64) -> Self {
        self.co2 = Some(co2);
        self
    }

    pub fn with_co2_per_capita(mut self, co2_per_capita: f64) -> Self {
        self.co2_per_capita = Some(co2_per_capita);
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Render the cell under `column` as text, or `None` for a missing value
    /// (or a column the schema does not carry).
    pub fn cell(&self, schema: &Schema, column: &str) -> Option<String> {
        match column {
            COUNTRY => Some(self.country.clone()),
            YEAR => Some(self.year.to_string()),
            ISO_CODE => self.iso_code.clone(),
            POPULATION => self.population.map(|p| p.to_string()),
            CO2 => self.co2.map(|v| v.to_string()),
            CO2_PER_CAPITA => self.co2_per_capita.map(|v| v.to_string()),
            other => schema
                .extra_index(other)
                .and_then(|idx| self.extra.get(idx).cloned().flatten()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owid_header() -> Vec<String> {
        ["country", "year", "iso_code", "population", "gdp", "co2", "co2_per_capita"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_schema_splits_extra_columns() {
        let schema = Schema::new(owid_header());
        assert_eq!(schema.columns().len(), 7);
        assert_eq!(schema.extra_columns(), &["gdp".to_string()]);
        assert_eq!(schema.extra_index("gdp"), Some(0));
        assert!(schema.has_column("co2"));
        assert!(!schema.has_column("methane"));
    }

    #[test]
    fn test_canonical_schema_has_no_extras() {
        let schema = Schema::canonical();
        assert_eq!(schema.columns().len(), TYPED_COLUMNS.len());
        assert!(schema.extra_columns().is_empty());
    }

    #[test]
    fn test_cell_renders_typed_and_extra_columns() {
        let schema = Schema::new(owid_header());
        let mut record = EmissionsRecord::new("China", 2000)
            .with_iso_code("CHN")
            .with_co2(50.0)
            .with_population(1_262_645_000);
        record.extra = vec![Some("1.2e13".to_string())];

        assert_eq!(record.cell(&schema, "country").as_deref(), Some("China"));
        assert_eq!(record.cell(&schema, "year").as_deref(), Some("2000"));
        assert_eq!(record.cell(&schema, "co2").as_deref(), Some("50"));
        assert_eq!(record.cell(&schema, "co2_per_capita"), None);
        assert_eq!(record.cell(&schema, "gdp").as_deref(), Some("1.2e13"));
        assert_eq!(record.cell(&schema, "methane"), None);
    }

    #[test]
    fn test_aggregate_rows_have_no_iso_code() {
        let world = EmissionsRecord::new("World", 1990).with_co2(22_700.0);
        assert!(world.iso_code.is_none());
        assert_eq!(world.co2, Some(22_700.0));
    }
}
