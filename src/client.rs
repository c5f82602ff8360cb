//! NiFiRestClient trait — the boundary between this crate and the wire.
//!
//! Crate code depends on the trait, never on reqwest directly; tests swap in
//! in-memory implementations. A remote 404 is a legitimate outcome and maps
//! to `Ok(None)`; every other failure is an error and stays one.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::NiFiConfig;
use crate::error::{NiFiError, Result};

/// Maximum error-body length carried into an `Api` error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Typed GET/PUT against a single NiFi resource path.
#[async_trait]
pub trait NiFiRestClient: Send + Sync {
    /// Fetch the resource at `path` (relative to the API base).
    /// Returns `Ok(None)` when the remote signals 404.
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Replace the resource at `path` with `body`.
    /// Returns `Ok(None)` when the remote signals 404 — NiFi uses this both
    /// for "missing" and for a stale-revision rejection.
    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>>;
}

/// Production `NiFiRestClient` over HTTP.
pub struct HttpNiFiClient {
    client: Client,
    base_url: String,
}

impl HttpNiFiClient {
    pub fn new(config: &NiFiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_body(response: reqwest::Response) -> Result<Option<Value>> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NiFiError::Api {
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl NiFiRestClient for HttpNiFiClient {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::into_body(response).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self.client.put(&url).json(&body).send().await?;
        Self::into_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_against_trimmed_base() {
        let config = NiFiConfig::new("http://nifi.example.com:8080/nifi-api/").unwrap();
        let client = HttpNiFiClient::new(&config).unwrap();
        assert_eq!(
            client.url("/processors/abc"),
            "http://nifi.example.com:8080/nifi-api/processors/abc"
        );
    }
}
