//! Resolution planning.
//!
//! Classifies each dependency as already on the search path, cached in the
//! library directory, or needing a download. Planning reads the filesystem
//! but never writes to it and never touches the network.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{DependencySpec, SearchPathIndex};
use crate::sources::archive::is_valid_archive;

/// How a single dependency will be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "path", rename_all = "kebab-case")]
pub enum ResolutionDecision {
    /// Already resolvable by the host; nothing to register.
    AlreadyAvailable,
    /// A valid copy exists in the cache directory.
    CachedLocally(PathBuf),
    /// Must be downloaded to this path before registration.
    NeedsFetch(PathBuf),
}

impl ResolutionDecision {
    /// Check if the dependency is satisfied without a download.
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, ResolutionDecision::NeedsFetch(_))
    }
}

impl fmt::Display for ResolutionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionDecision::AlreadyAvailable => write!(f, "loaded in classpath"),
            ResolutionDecision::CachedLocally(_) => write!(f, "available in local files"),
            ResolutionDecision::NeedsFetch(_) => {
                write!(f, "not found in the local files, required downloading")
            }
        }
    }
}

/// A download to perform. Consumed exactly once by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAction {
    /// The dependency to download.
    pub spec: DependencySpec,
    /// Where the downloaded file is published.
    pub destination: PathBuf,
}

/// One dependency together with its decision.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedDependency {
    #[serde(flatten)]
    pub spec: DependencySpec,
    pub decision: ResolutionDecision,
}

/// The outcome of planning: what to download and what to register.
#[derive(Debug, Clone, Default)]
pub struct ResolutionPlan {
    entries: Vec<PlannedDependency>,
    paths_to_register: Vec<PathBuf>,
    pending_fetches: Vec<FetchAction>,
}

impl ResolutionPlan {
    /// Every dependency with its decision, in declaration order.
    pub fn entries(&self) -> &[PlannedDependency] {
        &self.entries
    }

    /// Paths to hand to the loader, in declaration order.
    ///
    /// Paths of pending fetches are included: their position is reserved
    /// here so completion order of downloads cannot change it.
    pub fn paths_to_register(&self) -> &[PathBuf] {
        &self.paths_to_register
    }

    /// Downloads to run before registration.
    pub fn pending_fetches(&self) -> &[FetchAction] {
        &self.pending_fetches
    }

    /// Check if nothing needs downloading.
    pub fn is_satisfied(&self) -> bool {
        self.pending_fetches.is_empty()
    }

    /// Count dependencies matching a predicate on their decision.
    pub fn count(&self, f: impl Fn(&ResolutionDecision) -> bool) -> usize {
        self.entries.iter().filter(|e| f(&e.decision)).count()
    }
}

/// Build a resolution plan for `specs`.
pub fn plan(specs: &[DependencySpec], available: &SearchPathIndex, cache_dir: &Path) -> ResolutionPlan {
    let mut plan = ResolutionPlan {
        entries: Vec::with_capacity(specs.len()),
        paths_to_register: Vec::with_capacity(specs.len()),
        pending_fetches: Vec::new(),
    };

    for spec in specs {
        let decision = decide(spec, available, cache_dir);

        match &decision {
            ResolutionDecision::AlreadyAvailable => {
                tracing::info!("[Y] {} ({})", spec.name(), decision);
            }
            ResolutionDecision::CachedLocally(path) => {
                tracing::info!("[Y] {} ({})", spec.name(), decision);
                plan.paths_to_register.push(path.clone());
            }
            ResolutionDecision::NeedsFetch(path) => {
                tracing::info!("[N] {} ({})", spec.name(), decision);
                plan.paths_to_register.push(path.clone());
                plan.pending_fetches.push(FetchAction {
                    spec: spec.clone(),
                    destination: path.clone(),
                });
            }
        }

        plan.entries.push(PlannedDependency {
            spec: spec.clone(),
            decision,
        });
    }

    plan
}

fn decide(spec: &DependencySpec, available: &SearchPathIndex, cache_dir: &Path) -> ResolutionDecision {
    if available.contains(spec.name()) {
        return ResolutionDecision::AlreadyAvailable;
    }

    let path = cache_dir.join(spec.name());
    if is_valid_archive(&path) {
        ResolutionDecision::CachedLocally(path)
    } else {
        ResolutionDecision::NeedsFetch(path)
    }
}
