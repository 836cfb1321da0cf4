//! Configuration file support for jarloader.
//!
//! jarloader reads two configuration file locations:
//! - Global: `<config dir>/config.toml` - User-wide defaults
//! - Project: `.jarloader/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [cache]
//! dir = "/srv/app/libraries"
//!
//! [net]
//! timeout = 120
//! offline = false
//!
//! [fetch]
//! jobs = 4
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::http::DEFAULT_TIMEOUT_SECS;

/// jarloader configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library cache settings
    pub cache: CacheConfig,

    /// Network settings
    pub net: NetConfig,

    /// Download scheduling settings
    pub fetch: FetchConfig,
}

/// Library cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding downloaded libraries (None = platform default)
    pub dir: Option<PathBuf>,
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// HTTP timeout in seconds
    pub timeout: Option<u64>,

    /// User agent sent with downloads
    pub user_agent: Option<String>,

    /// Offline mode (fail instead of downloading)
    #[serde(default)]
    pub offline: bool,
}

/// Download scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Number of concurrent downloads (None = one per CPU)
    pub jobs: Option<usize>,

    /// Show a progress bar while downloading
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            jobs: None,
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl NetConfig {
    /// Effective HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.cache.dir.is_some() {
            self.cache.dir = other.cache.dir;
        }

        if other.net.timeout.is_some() {
            self.net.timeout = other.net.timeout;
        }
        if other.net.user_agent.is_some() {
            self.net.user_agent = other.net.user_agent;
        }
        if other.net.offline {
            self.net.offline = true;
        }

        if other.fetch.jobs.is_some() {
            self.fetch.jobs = other.fetch.jobs;
        }
        // progress defaults to true, so only an explicit opt-out is carried over
        if !other.fetch.progress {
            self.fetch.progress = false;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jarloader/config.toml)
/// 2. Global config (<config dir>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cache.dir.is_none());
        assert!(!config.net.offline);
        assert!(config.fetch.progress);
        assert_eq!(config.net.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[cache]
dir = "/srv/libraries"

[net]
timeout = 5
offline = true

[fetch]
jobs = 2
progress = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.cache.dir, Some(PathBuf::from("/srv/libraries")));
        assert_eq!(config.net.timeout(), Duration::from_secs(5));
        assert!(config.net.offline);
        assert_eq!(config.fetch.jobs, Some(2));
        assert!(!config.fetch.progress);
    }

    #[test]
    fn test_config_partial_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[fetch]\njobs = 3\n").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.fetch.jobs, Some(3));
        assert!(config.fetch.progress);
    }

    #[test]
    fn test_config_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[fetch\njobs = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.fetch.jobs.is_none());
    }

    #[test]
    fn test_load_config_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(&global, "[net]\ntimeout = 30\n\n[fetch]\njobs = 8\n").unwrap();
        std::fs::write(&project, "[fetch]\njobs = 1\n").unwrap();

        let config = load_config(&global, &project);
        assert_eq!(config.net.timeout, Some(30));
        assert_eq!(config.fetch.jobs, Some(1));
    }
}
