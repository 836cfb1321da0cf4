//! A classpath-string host.
//!
//! Models a JVM launch classpath: entries come from `--classpath` or the
//! `CLASSPATH` environment variable, registration appends to the list, and
//! the result is rendered back as a classpath string for the launcher.
//!
//! Entry forms:
//! - `path/to/lib.jar` contributes `lib.jar`
//! - `path/to/classes` contributes `classes`
//! - `path/to/dir/*` contributes every `.jar` directly inside `dir`

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{glob, Pattern};

use super::{Host, RegistrationError};

/// Environment variable read by [`ClasspathHost::from_env`].
pub const CLASSPATH_ENV: &str = "CLASSPATH";

/// Host backed by an ordered list of classpath entries.
#[derive(Debug, Clone, Default)]
pub struct ClasspathHost {
    /// Entries present before this run
    entries: Vec<PathBuf>,

    /// Paths added by registration, in order
    registered: Vec<PathBuf>,
}

impl ClasspathHost {
    /// Create a host from explicit entries.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        ClasspathHost {
            entries,
            registered: Vec::new(),
        }
    }

    /// Parse a platform classpath string (`:` or `;` separated).
    pub fn from_classpath(classpath: &OsStr) -> Self {
        let entries = std::env::split_paths(classpath)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        Self::new(entries)
    }

    /// Read the classpath from `CLASSPATH`, empty if unset.
    pub fn from_env() -> Self {
        match std::env::var_os(CLASSPATH_ENV) {
            Some(cp) => Self::from_classpath(&cp),
            None => Self::default(),
        }
    }

    /// Entries present before registration.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Paths registered so far, in order.
    pub fn registered(&self) -> &[PathBuf] {
        &self.registered
    }

    /// Render the full classpath: original entries, then registered paths.
    pub fn classpath(&self) -> Result<OsString> {
        std::env::join_paths(self.entries.iter().chain(&self.registered))
            .context("classpath entry contains the path separator")
    }

    /// Expand one entry into the names it makes resolvable.
    fn names_for_entry(entry: &Path, names: &mut Vec<String>) -> Result<()> {
        if entry.file_name() == Some(OsStr::new("*")) {
            let dir = entry.parent().unwrap_or(Path::new("."));
            let pattern = format!("{}/*.jar", Pattern::escape(&dir.to_string_lossy()));

            let paths = glob(&pattern)
                .with_context(|| format!("invalid classpath entry: {}", entry.display()))?;

            for path in paths {
                match path {
                    Ok(p) if p.is_file() => push_file_name(&p, names),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("skipping unreadable classpath entry: {}", e),
                }
            }
            return Ok(());
        }

        if entry.exists() {
            push_file_name(entry, names);
        } else {
            tracing::debug!("classpath entry does not exist: {}", entry.display());
        }
        Ok(())
    }
}

fn push_file_name(path: &Path, names: &mut Vec<String>) {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        names.push(name.to_string());
    }
}

impl Host for ClasspathHost {
    fn list_available_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in &self.entries {
            Self::names_for_entry(entry, &mut names)?;
        }
        Ok(names)
    }

    fn register_path(&mut self, path: &Path) -> Result<(), RegistrationError> {
        if !path.is_absolute() {
            return Err(RegistrationError::new(path, "path is not absolute"));
        }
        if !path.is_file() {
            return Err(RegistrationError::new(path, "not an existing file"));
        }
        if std::env::join_paths([path]).is_err() {
            return Err(RegistrationError::new(
                path,
                "path contains the classpath separator",
            ));
        }

        if self.registered.iter().any(|p| p == path) {
            tracing::debug!("already registered: {}", path.display());
            return Ok(());
        }

        self.registered.push(path.to_path_buf());
        Ok(())
    }
}
