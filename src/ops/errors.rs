//! Load error types and diagnostics.

use thiserror::Error;

use crate::core::TableError;
use crate::host::RegistrationError;
use crate::sources::FetchError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A fatal failure of a load run.
///
/// Nothing is registered with the host once any of these is returned from
/// the planning or fetch stages.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to read the host search path")]
    Host(#[source] anyhow::Error),

    #[error("offline mode: {} missing librar{} cannot be downloaded", missing.len(), if missing.len() == 1 { "y" } else { "ies" })]
    Offline { missing: Vec<String> },

    #[error("failed to start download workers")]
    Workers(#[source] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl LoadError {
    /// The stage of the run that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            LoadError::Table(_) => "dependency table",
            LoadError::Host(_) => "search path",
            LoadError::Offline { .. } | LoadError::Workers(_) | LoadError::Fetch(_) => "fetch",
            LoadError::Registration(_) => "registration",
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_context(format!("stage: {}", self.stage()));

        match self {
            LoadError::Table(_) => diag,

            LoadError::Host(e) => diag.with_context(format!("{:#}", e)),

            LoadError::Offline { missing } => {
                let diag = missing
                    .iter()
                    .fold(diag, |d, name| d.with_context(format!("missing: {}", name)));
                diag.with_suggestion(suggestions::OFFLINE)
            }

            LoadError::Workers(e) => diag.with_context(e.to_string()),

            LoadError::Fetch(e) => {
                let diag = diag.with_context(format!("dependency: {}", e.name()));
                match e {
                    FetchError::Network { source, .. } => diag
                        .with_context(format!("cause: {:#}", source))
                        .with_suggestion(suggestions::CHECK_NETWORK),
                    FetchError::Corrupted { .. } => diag.with_suggestion(suggestions::CORRUPT_DOWNLOAD),
                    FetchError::Io { path, source, .. } => diag
                        .with_location(path.clone())
                        .with_context(format!("cause: {}", source))
                        .with_suggestion(suggestions::CHECK_PERMISSIONS),
                }
            }

            LoadError::Registration(e) => diag
                .with_location(e.path.clone())
                .with_suggestion(suggestions::CHECK_CACHE_PATH),
        }
    }
}
