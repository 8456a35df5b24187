//! Builds the dataset provider a command session reads from.

use std::path::Path;

use co2_io::{CsvSource, DatasetProvider, FileSource, HttpSource};
use tracing::debug;

use crate::config::Co2Config;

pub type SessionProvider = DatasetProvider<Box<dyn CsvSource>>;

/// Provider over `file` when given, otherwise over the configured URL.
pub fn build_provider(config: &Co2Config, file: Option<&Path>) -> SessionProvider {
    let source: Box<dyn CsvSource> = match file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::with_options(
            config.source.url.clone(),
            config.source.timeout(),
            config.source.retry_policy(),
        )),
    };
    debug!(source = %source.describe(), "dataset source selected");

    let provider = DatasetProvider::new(source);
    match config.source.cache_window() {
        Some(window) => provider.with_cache_window(window),
        None => provider,
    }
}
