//! jarloader - make a fixed set of JVM libraries available to a host
//!
//! This crate decides, for every library in a fixed table, whether the host
//! can already resolve it, whether a valid copy is cached locally, or whether
//! it must be downloaded; downloads with atomic placement and verification;
//! and registers the result with the host loader in declaration order.

pub mod core;
pub mod host;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities and mocks for jarloader unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations of the HTTP client and
/// the host loader, plus jar fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{DependencySpec, DependencyTable, SearchPathIndex};
pub use host::{ClasspathHost, Host, RegistrationError};
pub use ops::{load, load_into_host, LoadError, LoadOptions, LoadReport};
pub use resolver::{plan, FetchAction, ResolutionDecision, ResolutionPlan};
pub use sources::{is_valid_archive, FetchError, Fetcher, HttpClient, ReqwestClient};
pub use util::context::GlobalContext;
