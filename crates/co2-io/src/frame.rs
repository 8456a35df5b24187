//! Polars export of loaded tables and views.
//!
//! Creates a DataFrame with the 6 typed columns:
//! - country (string)
//! - iso_code (string, null for aggregates)
//! - year (i32)
//! - co2 (f64, nullable)
//! - co2_per_capita (f64, nullable)
//! - population (u64, nullable)

use co2_core::record::{CO2, CO2_PER_CAPITA, COUNTRY, ISO_CODE, POPULATION, YEAR};
use co2_core::{Co2Error, Co2Result, EmissionsRecord, Table, View};
use polars::prelude::*;

/// Convert a whole table.
pub fn to_dataframe(table: &Table) -> Co2Result<DataFrame> {
    records_to_dataframe(table.rows().iter())
}

/// Convert the rows of a view, keeping their order.
pub fn view_to_dataframe(view: &View<'_>) -> Co2Result<DataFrame> {
    records_to_dataframe(view.iter())
}

fn records_to_dataframe<'a, I>(records: I) -> Co2Result<DataFrame>
where
    I: Iterator<Item = &'a EmissionsRecord>,
{
    let records: Vec<&EmissionsRecord> = records.collect();

    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let iso_codes: Vec<Option<&str>> = records.iter().map(|r| r.iso_code.as_deref()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let co2: Vec<Option<f64>> = records.iter().map(|r| r.co2).collect();
    let per_capita: Vec<Option<f64>> = records.iter().map(|r| r.co2_per_capita).collect();
    let population: Vec<Option<u64>> = records.iter().map(|r| r.population).collect();

    DataFrame::new(vec![
        Series::new(COUNTRY, countries),
        Series::new(ISO_CODE, iso_codes),
        Series::new(YEAR, years),
        Series::new(CO2, co2),
        Series::new(CO2_PER_CAPITA, per_capita),
        Series::new(POPULATION, population),
    ])
    .map_err(|e| Co2Error::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use co2_core::filter_by_year;

    fn table() -> Table {
        Table::from_records(vec![
            EmissionsRecord::new("World", 2000).with_co2(100.0),
            EmissionsRecord::new("China", 2000)
                .with_iso_code("CHN")
                .with_co2(50.0)
                .with_co2_per_capita(7.1),
            EmissionsRecord::new("China", 2001)
                .with_iso_code("CHN")
                .with_population(1_271_850_000),
        ])
    }

    #[test]
    fn test_table_to_dataframe() {
        let df = to_dataframe(&table()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 6);
        assert_eq!(df.column("iso_code").unwrap().null_count(), 1);
        assert_eq!(df.column("co2").unwrap().null_count(), 1);
        assert_eq!(df.column("population").unwrap().null_count(), 2);
    }

    #[test]
    fn test_view_to_dataframe() {
        let table = table();
        let view = filter_by_year(&table, 2000);
        let df = view_to_dataframe(&view).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("co2_per_capita").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_view_to_dataframe() {
        let table = table();
        let view = filter_by_year(&table, 1899);
        let df = view_to_dataframe(&view).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 6);
    }
}
