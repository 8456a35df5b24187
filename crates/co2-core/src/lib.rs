//! # co2-core: CO2 Emissions Table & Query Layer
//!
//! Typed in-memory representation of the Our World in Data CO2 dataset, plus the
//! pure filters presentation code uses to derive what each panel shows.
//!
//! ## Data Model
//!
//! - [`EmissionsRecord`] - one country-year row; numeric fields are `Option` because
//!   historical coverage is sparse
//! - [`Schema`] - every column of the source header, typed or not
//! - [`Table`] - the full, read-only dataset
//! - [`View`] - a borrowed, ordered subset of a table's rows with the same columns
//!
//! ## Quick Start
//!
//! ```rust
//! use co2_core::*;
//!
//! let table = Table::from_records(vec![
//!     EmissionsRecord::new("World", 2000).with_co2(100.0),
//!     EmissionsRecord::new("China", 2000).with_co2(50.0).with_co2_per_capita(7.1),
//! ]);
//!
//! let china = filter_by_countries(&table, ["China"]);
//! assert_eq!(china.len(), 1);
//!
//! let missing = filter_by_year(&table, 1899);
//! assert!(missing.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`query`] - `filter_by_countries`, `filter_by_year`, `filter_by_country`
//! - [`series`] - per-country line series and per-year map values
//! - [`error`] - [`Co2Error`] shared by the loader and front ends
//!
//! Loading the dataset lives in the `co2-io` crate.

pub mod error;
pub mod query;
pub mod record;
pub mod series;
pub mod table;

pub use error::{Co2Error, Co2Result};
pub use query::{filter_by_countries, filter_by_country, filter_by_year};
pub use record::{EmissionsRecord, Schema};
pub use series::{
    series_by_country, year_snapshot, CountrySeries, MapValue, Metric, SeriesPoint,
    DEFAULT_COUNTRIES, YEAR_SLIDER_RANGE,
};
pub use table::{Table, View};
