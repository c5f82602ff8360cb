//! Configuration for the NiFi REST client and the flow crawl.

use std::time::Duration;

use url::Url;

use crate::error::{NiFiError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/nifi-api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CRAWL_WORKERS: usize = 20;
const DEFAULT_INSPECT_TIMEOUT_SECS: u64 = 60;

/// Configuration for connecting to NiFi and crawling its flow hierarchy.
#[derive(Debug, Clone)]
pub struct NiFiConfig {
    /// Base URL of the NiFi REST API, e.g. `http://localhost:8080/nifi-api`.
    pub base_url: Url,
    /// Timeout applied to every individual HTTP request.
    pub request_timeout: Duration,
    /// Maximum number of process-group inspections running concurrently.
    /// Remote latency dominates, so tens of workers is a sensible default.
    pub max_concurrent_inspections: usize,
    /// Deadline for a single group inspection; on expiry the node is marked
    /// failed and the crawl moves on.
    pub inspect_timeout: Duration,
}

impl Default for NiFiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_concurrent_inspections: DEFAULT_CRAWL_WORKERS,
            inspect_timeout: Duration::from_secs(DEFAULT_INSPECT_TIMEOUT_SECS),
        }
    }
}

impl NiFiConfig {
    /// Create a config targeting the given base URL, defaults elsewhere.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| NiFiError::Config(format!("invalid NiFi base URL '{}': {}", base_url, e)))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Create from environment variables.
    ///
    /// Reads `NIFI_BASE_URL`, `NIFI_REQUEST_TIMEOUT_SECS`,
    /// `NIFI_CRAWL_WORKERS` and `NIFI_INSPECT_TIMEOUT_SECS`, falling back to
    /// defaults for anything unset. A `.env` file is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var("NIFI_BASE_URL") {
            Ok(url) => Self::new(&url)?,
            Err(_) => Self::default(),
        };

        if let Ok(secs) = std::env::var("NIFI_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_env("NIFI_REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Ok(workers) = std::env::var("NIFI_CRAWL_WORKERS") {
            config.max_concurrent_inspections = parse_env("NIFI_CRAWL_WORKERS", &workers)?;
        }
        if let Ok(secs) = std::env::var("NIFI_INSPECT_TIMEOUT_SECS") {
            config.inspect_timeout = Duration::from_secs(parse_env("NIFI_INSPECT_TIMEOUT_SECS", &secs)?);
        }

        Ok(config)
    }

    /// Override the crawl worker limit.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.max_concurrent_inspections = workers.max(1);
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| NiFiError::Config(format!("invalid value for {}: '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = NiFiConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/nifi-api");
        assert_eq!(config.max_concurrent_inspections, 20);
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(NiFiConfig::new("not a url").is_err());
    }

    #[test]
    fn worker_override_floors_at_one() {
        let config = NiFiConfig::default().with_workers(0);
        assert_eq!(config.max_concurrent_inspections, 1);
    }
}
