//! Registration of resolved libraries with the host loader.

use std::path::PathBuf;

use crate::host::{Host, RegistrationError};
use crate::util::fs::absolute_path;

/// Register every path with the host, in the given order.
///
/// Paths are made absolute first. Stops at the first rejection. Returns the
/// absolute paths that were registered.
pub fn register<H: Host + ?Sized>(
    host: &mut H,
    paths: &[PathBuf],
) -> Result<Vec<PathBuf>, RegistrationError> {
    let mut registered = Vec::with_capacity(paths.len());

    for path in paths {
        let absolute = absolute_path(path).map_err(|e| {
            RegistrationError::new(path, format!("cannot resolve absolute path: {}", e))
        })?;

        host.register_path(&absolute)?;
        tracing::info!("Added to classpath: {}", absolute.display());
        registered.push(absolute);
    }

    Ok(registered)
}
