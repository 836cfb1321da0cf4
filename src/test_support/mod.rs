//! Test utilities and mocks for jarloader unit tests.
//!
//! Mocks stand in for the two collaborators the core never owns: the
//! network (`MockHttpClient`) and the host loader (`RecordingHost`).
//!
//! # Example
//!
//! ```rust,ignore
//! use jarloader::test_support::{jar_bytes, MockHttpClient, MockHttpResponse, RecordingHost};
//!
//! #[test]
//! fn test_example() {
//!     let mut client = MockHttpClient::new();
//!     client.mock_url("https://repo.example.com/a.jar", MockHttpResponse::ok(jar_bytes()));
//!
//!     let mut host = RecordingHost::new().with_available(["b.jar"]);
//!     // Use mocks in tests...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use url::Url;

use crate::host::{Host, RegistrationError};
use crate::sources::HttpClient;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock HTTP response for testing downloads.
#[derive(Debug, Clone)]
pub struct MockHttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
    /// Delay before the response is returned.
    pub delay: Option<Duration>,
    /// Fail with an I/O error halfway through the body.
    pub fail_midway: bool,
}

impl MockHttpResponse {
    /// Create a successful response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        MockHttpResponse {
            status: 200,
            body: body.into(),
            delay: None,
            fail_midway: false,
        }
    }

    /// Create a not found response.
    pub fn not_found() -> Self {
        MockHttpResponse {
            status: 404,
            body: b"Not Found".to_vec(),
            delay: None,
            fail_midway: false,
        }
    }

    /// Create a server error response.
    pub fn server_error(message: &str) -> Self {
        MockHttpResponse {
            status: 500,
            body: message.as_bytes().to_vec(),
            delay: None,
            fail_midway: false,
        }
    }

    /// Delay the response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Break the connection after half the body.
    pub fn truncated_with_error(mut self) -> Self {
        self.fail_midway = true;
        self
    }

    /// Check if this is a successful response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A body that yields some bytes and then a connection reset.
struct BrokenBody {
    data: Cursor<Vec<u8>>,
}

impl Read for BrokenBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
            n => Ok(n),
        }
    }
}

/// Mock HTTP client for testing downloads.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    responses: HashMap<String, MockHttpResponse>,
    requests: Mutex<Vec<String>>,
    default_response: Option<MockHttpResponse>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for a URL.
    pub fn mock_url(&mut self, url: &str, response: MockHttpResponse) -> &mut Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Set a default response for unmatched URLs.
    pub fn set_default(&mut self, response: MockHttpResponse) -> &mut Self {
        self.default_response = Some(response);
        self
    }

    /// Get all requested URLs, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl HttpClient for MockHttpClient {
    fn open(&self, url: &Url) -> Result<Box<dyn Read + Send>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let response = match self.responses.get(url.as_str()).or(self.default_response.as_ref()) {
            Some(r) => r.clone(),
            None => bail!("no mock response for URL: {}", url),
        };

        if let Some(delay) = response.delay {
            std::thread::sleep(delay);
        }

        if !response.is_success() {
            bail!("HTTP {} from {}", response.status, url);
        }

        if response.fail_midway {
            let half = response.body.len() / 2;
            let mut body = response.body;
            body.truncate(half);
            return Ok(Box::new(BrokenBody {
                data: Cursor::new(body),
            }));
        }

        Ok(Box::new(Cursor::new(response.body)))
    }
}

/// Host that records registrations instead of loading anything.
#[derive(Debug, Default)]
pub struct RecordingHost {
    available: Vec<String>,
    registered: Vec<PathBuf>,
    calls: usize,
    rejected_names: Vec<String>,
}

impl RecordingHost {
    /// Create a host with an empty search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put names on the host's search path.
    pub fn with_available<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available.extend(names.into_iter().map(Into::into));
        self
    }

    /// Reject registration of any path with this file name.
    pub fn reject(mut self, file_name: &str) -> Self {
        self.rejected_names.push(file_name.to_string());
        self
    }

    /// Paths accepted so far, in order.
    pub fn registered(&self) -> &[PathBuf] {
        &self.registered
    }

    /// Number of `register_path` calls, including rejected ones.
    pub fn register_calls(&self) -> usize {
        self.calls
    }
}

impl Host for RecordingHost {
    fn list_available_names(&self) -> Result<Vec<String>> {
        Ok(self.available.clone())
    }

    fn register_path(&mut self, path: &Path) -> Result<(), RegistrationError> {
        self.calls += 1;

        let rejected = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.rejected_names.iter().any(|r| r == n));
        if rejected {
            return Err(RegistrationError::new(path, "rejected by test host"));
        }

        self.registered.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_http_records_requests() {
        let mut client = MockHttpClient::new();
        client.mock_url("https://repo.example.com/a.jar", MockHttpResponse::ok("abc"));

        let url = Url::parse("https://repo.example.com/a.jar").unwrap();
        let mut body = String::new();
        client.open(&url).unwrap().read_to_string(&mut body).unwrap();

        assert_eq!(body, "abc");
        assert_eq!(client.requests(), vec![url.to_string()]);
    }

    #[test]
    fn test_mock_http_unknown_url() {
        let client = MockHttpClient::new();
        let url = Url::parse("https://repo.example.com/missing.jar").unwrap();
        assert!(client.open(&url).is_err());
    }

    #[test]
    fn test_mock_http_default_response() {
        let mut client = MockHttpClient::new();
        client.set_default(MockHttpResponse::not_found());

        let url = Url::parse("https://repo.example.com/any.jar").unwrap();
        let err = client.open(&url).err().unwrap();
        assert!(err.to_string().contains("HTTP 404"));
    }
}
