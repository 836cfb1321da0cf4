//! Dependency resolution.
//!
//! Resolution here is a classification, not a version solve: every entry of
//! the fixed table is matched against the host search path and the local
//! library cache.

pub mod plan;

pub use plan::{plan, FetchAction, PlannedDependency, ResolutionDecision, ResolutionPlan};
