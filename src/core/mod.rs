//! Core data structures for jarloader.
//!
//! - The fixed dependency table (`DependencySpec`, `DependencyTable`)
//! - The search path snapshot (`SearchPathIndex`)

pub mod dependency;
pub mod search_path;

pub use dependency::{DependencySpec, DependencyTable, TableError, MAVEN_MIRROR};
pub use search_path::SearchPathIndex;
