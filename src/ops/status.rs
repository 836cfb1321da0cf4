//! Status operation: report what a load run would do.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{DependencyTable, SearchPathIndex};
use crate::resolver::{plan, PlannedDependency, ResolutionDecision};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Planned state of every dependency, without fetching anything.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Library cache directory
    pub cache_dir: PathBuf,

    /// True when nothing needs downloading
    pub satisfied: bool,

    /// One entry per dependency, in declaration order
    pub dependencies: Vec<PlannedDependency>,
}

/// Plan a run and report it.
pub fn status(table: &DependencyTable, available: &SearchPathIndex, cache_dir: &Path) -> StatusReport {
    let plan = plan(table.specs(), available, cache_dir);

    StatusReport {
        cache_dir: cache_dir.to_path_buf(),
        satisfied: plan.is_satisfied(),
        dependencies: plan.entries().to_vec(),
    }
}

impl StatusReport {
    /// Number of dependencies that would be downloaded.
    pub fn missing(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| matches!(d.decision, ResolutionDecision::NeedsFetch(_)))
            .count()
    }

    /// Render one `[Y]`/`[N]` line per dependency.
    pub fn format_human(&self) -> String {
        let mut output = String::new();
        for dep in &self.dependencies {
            let mark = if dep.decision.is_satisfied() { "Y" } else { "N" };
            output.push_str(&format!("[{}] {} ({})\n", mark, dep.spec.name(), dep.decision));
        }
        output
    }

    /// Warning naming every library a load run would download, if any.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        let missing = self.missing();
        if missing == 0 {
            return None;
        }

        let diag = Diagnostic::warning(format!(
            "{} {} would need downloading",
            missing,
            if missing == 1 { "library" } else { "libraries" }
        ))
        .with_location(self.cache_dir.clone());

        let diag = self
            .dependencies
            .iter()
            .filter(|d| !d.decision.is_satisfied())
            .fold(diag, |d, dep| d.with_context(format!("missing: {}", dep.spec.name())));

        Some(diag.with_suggestion(suggestions::RUN_LOAD))
    }
}
