//! HTTP client for library downloads.

use std::io::Read;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Opens byte streams for remote locations.
///
/// The fetcher only needs a readable body; implementations decide how to
/// get one. Non-success responses must be reported as errors.
pub trait HttpClient: Send + Sync {
    /// Start a GET request and return the response body as a stream.
    fn open(&self, url: &Url) -> Result<Box<dyn Read + Send>>;
}

/// Blocking reqwest client.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with the default timeout and user agent.
    pub fn new() -> Result<Self> {
        Self::with_settings(Duration::from_secs(DEFAULT_TIMEOUT_SECS), None)
    }

    /// Create a client with a custom timeout and optional user agent.
    pub fn with_settings(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let user_agent = user_agent
            .map(str::to_string)
            .unwrap_or_else(|| format!("jarloader/{}", env!("CARGO_PKG_VERSION")));

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("failed to create HTTP client")?;

        Ok(ReqwestClient { client })
    }
}

impl HttpClient for ReqwestClient {
    fn open(&self, url: &Url) -> Result<Box<dyn Read + Send>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("HTTP request failed for {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} from {}", response.status(), url);
        }

        Ok(Box::new(response))
    }
}
