//! Global context for jarloader operations.
//!
//! Provides centralized access to configuration and paths. The home
//! directory holds `config.toml` and, by default, the `libraries/` cache.
//! Set `JARLOADER_HOME` to relocate it.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::util::config::{load_config, Config};

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "JARLOADER_HOME";

/// Name of the library cache directory under the home directory.
pub const LIBRARIES_DIR: &str = "libraries";

/// Project directories for jarloader
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "jarloader", "jarloader"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for configuration and the default cache
    home: PathBuf,

    /// Merged global + project configuration
    config: Config,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext, loading configuration from disk.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => PROJECT_DIRS
                .as_ref()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| cwd.join(".jarloader")),
        };

        Ok(Self::with_home(cwd, home))
    }

    /// Create a GlobalContext with explicit directories.
    pub fn with_home(cwd: PathBuf, home: PathBuf) -> Self {
        let mut ctx = GlobalContext {
            cwd,
            home,
            config: Config::default(),
            color: true,
        };
        ctx.config = load_config(&ctx.config_path(), &ctx.project_config_path());
        ctx
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Override the library cache directory.
    pub fn set_cache_dir(&mut self, dir: PathBuf) {
        self.config.cache.dir = Some(dir);
    }

    /// Get the library cache directory.
    ///
    /// A relative configured directory is resolved against the working
    /// directory.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.config.cache.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.cwd.join(dir),
            None => self.home.join(LIBRARIES_DIR),
        }
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.cwd.join(".jarloader").join("config.toml")
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}
