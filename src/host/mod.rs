//! Host integration.
//!
//! The host owns the dynamic loader. jarloader only needs two things from
//! it: the names already on its search path, and a way to add a path.

pub mod classpath;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use classpath::ClasspathHost;

/// The host loader rejected a path.
#[derive(Debug, Error)]
#[error("failed to register {}: {reason}", path.display())]
pub struct RegistrationError {
    pub path: PathBuf,
    pub reason: String,
}

impl RegistrationError {
    /// Create a new registration error.
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RegistrationError {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// The capabilities jarloader needs from the host runtime.
pub trait Host {
    /// File names currently resolvable by the host loader.
    fn list_available_names(&self) -> anyhow::Result<Vec<String>>;

    /// Make the contents of an absolute path resolvable.
    fn register_path(&mut self, path: &Path) -> Result<(), RegistrationError>;
}
