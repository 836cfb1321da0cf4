//! Library fetcher.
//!
//! Downloads go to a temporary file next to the destination and are renamed
//! into place only once fully written, so the destination path never holds
//! a partial file. The published file is then re-validated.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use glob::{glob, Pattern};

use thiserror::Error;

use crate::resolver::FetchAction;
use crate::sources::archive::is_valid_archive;
use crate::sources::http::HttpClient;
use crate::util::hash::sha256_file;

/// Buffer size for streaming downloads.
const STREAM_BUFFER_SIZE: usize = 8192;

/// Name affixes of in-flight download files.
const TEMP_PREFIX: &str = "jarloader-";
const TEMP_SUFFIX: &str = ".jar";

/// Age after which an untouched download file is considered abandoned.
pub const STALE_TEMP_AGE: Duration = Duration::from_secs(15 * 60);

/// Error fetching a single library.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to download `{name}` from {url}")]
    Network {
        name: String,
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("downloaded file corrupted: {url}")]
    Corrupted { name: String, url: String },

    #[error("failed to store `{name}` at {}", path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Name of the dependency that failed.
    pub fn name(&self) -> &str {
        match self {
            FetchError::Network { name, .. }
            | FetchError::Corrupted { name, .. }
            | FetchError::Io { name, .. } => name,
        }
    }

    /// Check if this failure came from the network.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }

    /// Check if the download completed but failed validation.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, FetchError::Corrupted { .. })
    }
}

/// Executes fetch actions against an HTTP client.
pub struct Fetcher<C> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher.
    pub fn new(client: C) -> Self {
        Fetcher { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Download one library and publish it at the action's destination.
    ///
    /// Returns the published path. Any existing file at the destination is
    /// replaced.
    pub fn fetch(&self, action: &FetchAction) -> Result<PathBuf, FetchError> {
        let spec = &action.spec;
        let dest = &action.destination;
        let name = spec.name();
        let url = spec.source();

        let mut body = self
            .client
            .open(url)
            .map_err(|source| FetchError::Network {
                name: name.to_string(),
                url: url.to_string(),
                source,
            })?;

        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let io_err = |source: io::Error| FetchError::Io {
            name: name.to_string(),
            path: dest.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(io_err)?;

        // Same directory as the destination so the final rename is atomic.
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .map_err(io_err)?;

        let written = stream_to_file(&mut body, tmp.as_file_mut(), name, url.as_str(), dest)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        tmp.persist(dest).map_err(|e| io_err(e.error))?;

        if !is_valid_archive(dest) {
            return Err(FetchError::Corrupted {
                name: name.to_string(),
                url: url.to_string(),
            });
        }

        match sha256_file(dest) {
            Ok(digest) => tracing::debug!("{} ({} bytes) sha256={}", name, written, digest),
            Err(e) => tracing::warn!("could not hash {}: {:#}", dest.display(), e),
        }

        Ok(dest.clone())
    }
}

/// Remove download files left in `dir` by a killed run.
///
/// Only files untouched for at least `max_age` are removed, so downloads in
/// progress in another process survive. Returns the number removed.
pub fn sweep_stale_temp_files(dir: &Path, max_age: Duration) -> usize {
    let pattern = format!(
        "{}/{}*{}",
        Pattern::escape(&dir.to_string_lossy()),
        TEMP_PREFIX,
        TEMP_SUFFIX
    );
    let Ok(paths) = glob(&pattern) else {
        return 0;
    };

    let now = SystemTime::now();
    let mut removed = 0;
    for path in paths.flatten() {
        let stale = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age >= max_age);
        if !stale {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("removed stale download {}", path.display());
                removed += 1;
            }
            Err(e) => tracing::warn!("could not remove {}: {}", path.display(), e),
        }
    }
    removed
}

/// Copy the response body into `file`, keeping read and write failures apart.
fn stream_to_file(
    body: &mut dyn Read,
    file: &mut File,
    name: &str,
    url: &str,
    dest: &Path,
) -> Result<u64, FetchError> {
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FetchError::Network {
                    name: name.to_string(),
                    url: url.to_string(),
                    source: anyhow::Error::new(e).context("failed to read response body"),
                })
            }
        };

        file.write_all(&buffer[..n]).map_err(|source| FetchError::Io {
            name: name.to_string(),
            path: dest.to_path_buf(),
            source,
        })?;
        written += n as u64;
    }

    Ok(written)
}
