//! Library sources.
//!
//! Validation of local archives and fetching of missing ones over HTTP.

pub mod archive;
pub mod fetcher;
pub mod http;

pub use archive::{is_valid_archive, MANIFEST_ENTRY};
pub use fetcher::{FetchError, Fetcher};
pub use http::{HttpClient, ReqwestClient};
