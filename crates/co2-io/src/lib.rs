//! # co2-io: CO2 Dataset Loading
//!
//! Fetches the Our World in Data CO2 dataset, parses it into a typed
//! [`co2_core::Table`] and memoizes the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use co2_core::filter_by_year;
//!
//! fn main() -> co2_core::Co2Result<()> {
//!     let table = co2_io::load_dataset()?;
//!     let snapshot = filter_by_year(&table, 2020);
//!     println!("{} regions reported for 2020", snapshot.len());
//!     Ok(())
//! }
//! ```
//!
//! For testable code, build a [`DatasetProvider`] over any [`CsvSource`] and pass
//! it to whatever needs the table:
//!
//! ```rust,no_run
//! use co2_io::{DatasetProvider, FileSource};
//!
//! let provider = DatasetProvider::new(FileSource::new("owid-co2-data.csv"));
//! let table = provider.load()?;
//! # Ok::<(), co2_core::Co2Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`source`] - [`CsvSource`] seam, [`HttpSource`] with retry/backoff, [`FileSource`]
//! - [`csv_parser`] - CSV text to typed table
//! - [`provider`] - [`DatasetProvider`] cache and the process-wide [`load_dataset`]
//! - `frame` - polars `DataFrame` export (feature `dataframe`)
//!
//! ## Error Handling
//!
//! Every fetch or parse failure surfaces as [`co2_core::Co2Error::DataUnavailable`].
//! Nothing is cached after a failure, so callers may offer a retry.

pub mod csv_parser;
#[cfg(feature = "dataframe")]
pub mod frame;
pub mod provider;
pub mod source;

pub use csv_parser::{parse_reader, parse_table};
#[cfg(feature = "dataframe")]
pub use frame::{to_dataframe, view_to_dataframe};
pub use provider::{default_provider, load_dataset, DatasetProvider};
pub use source::{CsvSource, FileSource, HttpSource, RetryPolicy, OWID_CO2_URL};
