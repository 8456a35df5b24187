//! Error types for the CO2 toolkit
//!
//! [`Co2Error`] is shared by every crate in the workspace. Only a failed load is
//! fatal: filtering a table never errors, and an empty view is a normal result.

use thiserror::Error;

/// Unified error type for loading and exporting emissions data.
#[derive(Error, Debug)]
pub enum Co2Error {
    /// The dataset could not be fetched or parsed. Fatal to session start.
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Configuration errors (front ends only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Building an export representation (e.g. a DataFrame) failed
    #[error("Export error: {0}")]
    Export(String),
}

/// Convenience type alias for Results using Co2Error.
pub type Co2Result<T> = Result<T, Co2Error>;

impl Co2Error {
    /// Shorthand used by loaders when a fetch or parse step fails.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Co2Error::DataUnavailable(message.into())
    }

    /// True when the error means no table could be produced.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Co2Error::DataUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Co2Error::unavailable("connection refused");
        assert!(err.to_string().contains("Dataset unavailable"));
        assert!(err.to_string().contains("connection refused"));
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_only_load_failures_are_data_unavailable() {
        let err = Co2Error::Export("column length mismatch".into());
        assert_eq!(err.to_string(), "Export error: column length mismatch");
        assert!(!err.is_data_unavailable());

        let err = Co2Error::Config("source.url must not be empty".into());
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(!err.is_data_unavailable());
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> Co2Result<()> {
            Err(Co2Error::Config("bad url".into()))
        }

        fn outer() -> Co2Result<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(Co2Error::Config(_))));
    }
}
