//! Where the dataset text comes from.
//!
//! [`CsvSource`] is the seam the provider is built on: production code uses
//! [`HttpSource`] (or [`FileSource`] for offline work), tests plug in their own
//! implementation to count or fail fetches.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use co2_core::{Co2Error, Co2Result};
use tracing::{debug, warn};

/// Public OWID CO2 dataset, refreshed upstream.
pub const OWID_CO2_URL: &str = "https://github.com/owid/co2-data/raw/master/owid-co2-data.csv";

/// Produces the raw CSV text of the dataset.
pub trait CsvSource: Send + Sync {
    /// Fetch the complete CSV document.
    fn fetch(&self) -> Co2Result<String>;

    /// Human-readable origin for logs and error messages.
    fn describe(&self) -> String;
}

impl<S: CsvSource + ?Sized> CsvSource for Box<S> {
    fn fetch(&self) -> Co2Result<String> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// How many times a failed GET is repeated and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Wait before the first retry; doubles for each further retry
    pub initial_backoff: Duration,
    /// Upper bound for a single wait
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (0-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.min(16);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
        }
    }
}

/// Blocking HTTP GET of a CSV document.
#[derive(Clone)]
pub struct HttpSource {
    url: String,
    retry: RetryPolicy,
    agent: ureq::Agent,
}

impl HttpSource {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: impl Into<String>) -> Self {
        Self::with_options(url, Self::DEFAULT_TIMEOUT, RetryPolicy::default())
    }

    pub fn with_options(url: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.into(),
            retry,
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    fn fetch_once(&self) -> Result<String, String> {
        let response = match self.agent.get(&self.url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(format!("HTTP {code}")),
            Err(ureq::Error::Transport(transport)) => return Err(transport.to_string()),
        };
        // into_string() caps bodies at 10 MB; the full dataset is larger
        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| format!("reading response body: {e}"))?;
        Ok(body)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(OWID_CO2_URL)
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("url", &self.url)
            .field("retry", &self.retry)
            .finish()
    }
}

impl CsvSource for HttpSource {
    fn fetch(&self) -> Co2Result<String> {
        let mut retry = 0;
        loop {
            debug!(url = %self.url, attempt = retry + 1, "requesting dataset");
            match self.fetch_once() {
                Ok(body) => return Ok(body),
                Err(cause) if retry < self.retry.max_retries => {
                    let delay = self.retry.backoff_for(retry);
                    warn!(
                        url = %self.url,
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "dataset request failed: {cause}; retrying"
                    );
                    thread::sleep(delay);
                    retry += 1;
                }
                Err(cause) => {
                    return Err(Co2Error::unavailable(format!(
                        "requesting {} failed after {} attempt(s): {}",
                        self.url,
                        retry + 1,
                        cause
                    )));
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CsvSource for FileSource {
    fn fetch(&self) -> Co2Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            Co2Error::unavailable(format!("reading {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
