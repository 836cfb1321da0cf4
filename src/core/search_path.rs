//! Snapshot of the names the host can already resolve.

use std::collections::HashSet;

use crate::host::Host;

/// Read-only set of file names already on the host's search path.
///
/// Built once per run; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SearchPathIndex {
    names: HashSet<String>,
}

impl SearchPathIndex {
    /// An index with nothing on the search path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from plain names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchPathIndex {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Take a snapshot of the host's current search path.
    pub fn snapshot<H: Host + ?Sized>(host: &H) -> anyhow::Result<Self> {
        Ok(Self::from_names(host.list_available_names()?))
    }

    /// Check if a name is already resolvable.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names in the index.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
