//! Query layer: pure filters from a full [`Table`] to a [`View`].
//!
//! All three filters are total. They never fail and never touch the input
//! table; an empty result is a normal view with zero rows. Country names are
//! compared by exact, case-sensitive equality, so aggregate entries such as
//! "World" or "Europe" are matched literally as the dataset spells them.

use crate::table::{name_set, Table, View};

/// Rows whose country is a member of `names`. An empty set yields an empty view.
pub fn filter_by_countries<'a, I, S>(table: &'a Table, names: I) -> View<'a>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wanted = name_set(names);
    View::select(table, |row| wanted.contains(row.country.as_str()))
}

/// Rows whose year equals `year`.
pub fn filter_by_year(table: &Table, year: i32) -> View<'_> {
    View::select(table, |row| row.year == year)
}

/// Rows whose country equals `name`.
pub fn filter_by_country<'a>(table: &'a Table, name: &str) -> View<'a> {
    View::select(table, |row| row.country == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EmissionsRecord, Schema};
    use std::collections::{BTreeSet, HashSet};

    fn scenario_table() -> Table {
        Table::from_records(vec![
            EmissionsRecord::new("World", 2000).with_co2(100.0),
            EmissionsRecord::new("China", 2000)
                .with_co2(50.0)
                .with_co2_per_capita(7.1),
        ])
    }

    fn century_table() -> Table {
        let mut rows = Vec::new();
        for year in 1900..1910 {
            for country in ["World", "United States", "China", "Africa"] {
                rows.push(EmissionsRecord::new(country, year).with_co2(year as f64));
            }
        }
        // duplicate country-year pairs are legal
        rows.push(EmissionsRecord::new("China", 1905));
        let header = ["country", "year", "iso_code", "co2", "co2_per_capita", "methane"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        Table::new(Schema::new(header), rows)
    }

    #[test]
    fn empty_country_set_yields_empty_view() {
        let table = century_table();
        let none: [&str; 0] = [];
        assert_eq!(filter_by_countries(&table, none).len(), 0);
        assert_eq!(filter_by_countries(&table, HashSet::<String>::new()).len(), 0);
    }

    #[test]
    fn filter_by_year_matches_manual_count() {
        let table = century_table();
        for year in [1900, 1905, 1909] {
            let view = filter_by_year(&table, year);
            assert!(view.iter().all(|r| r.year == year));
            let expected = table.rows().iter().filter(|r| r.year == year).count();
            assert_eq!(view.len(), expected);
        }
        assert_eq!(filter_by_year(&table, 1905).len(), 5);
    }

    #[test]
    fn world_filter_is_idempotent() {
        let table = century_table();
        let once = filter_by_countries(&table, ["World"]);
        let twice = once.filter_by_countries(["World"]);
        assert_eq!(once, twice);
        assert_eq!(once.to_table(), twice.to_table());
        assert_eq!(once.len(), 10);
    }

    #[test]
    fn column_set_is_preserved() {
        let table = century_table();
        let columns: BTreeSet<&String> = table.columns().iter().collect();
        for year in [1850, 1900, 1909] {
            let view = filter_by_year(&table, year);
            let view_columns: BTreeSet<&String> = view.columns().iter().collect();
            assert_eq!(view_columns, columns);
        }
        assert_eq!(filter_by_country(&table, "China").columns(), table.columns());
    }

    #[test]
    fn china_scenario_returns_second_row() {
        let table = scenario_table();
        let view = filter_by_countries(&table, ["China"]);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0), Some(&table.rows()[1]));
        assert_eq!(view.get(0).and_then(|r| r.co2_per_capita), Some(7.1));
    }

    #[test]
    fn year_before_coverage_is_empty_not_error() {
        let table = century_table();
        let view = filter_by_year(&table, 1899);
        assert!(view.is_empty());
        assert_eq!(view.columns(), table.columns());
    }

    #[test]
    fn country_match_is_exact_and_case_sensitive() {
        let table = century_table();
        assert!(filter_by_country(&table, "world").is_empty());
        assert!(filter_by_country(&table, "World ").is_empty());
        assert!(filter_by_country(&table, "United").is_empty());
        assert_eq!(filter_by_country(&table, "United States").len(), 10);
        assert!(filter_by_countries(&table, ["CHINA", "china"]).is_empty());
    }

    #[test]
    fn filters_do_not_mutate_input() {
        let table = century_table();
        let before = table.clone();
        let _ = filter_by_countries(&table, ["World", "Africa"]);
        let _ = filter_by_year(&table, 1901);
        let _ = filter_by_country(&table, "China");
        assert_eq!(table, before);
    }

    #[test]
    fn unknown_country_yields_empty_view() {
        let table = century_table();
        assert!(filter_by_country(&table, "Atlantis").is_empty());
        assert_eq!(filter_by_countries(&table, ["Atlantis", "China"]).len(), 11);
    }
}
