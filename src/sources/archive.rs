//! Archive validation.
//!
//! A library is only trusted if it opens as a zip container and carries a
//! jar manifest. Presence on disk is not enough: interrupted or garbage
//! downloads must be re-fetched.

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

/// The entry every loadable jar must contain.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Check whether `path` is a well-formed jar.
///
/// Never fails: a missing file, an I/O error or a corrupt archive all
/// answer `false`.
pub fn is_valid_archive(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("{} is not readable: {}", path.display(), e);
            return false;
        }
    };

    let archive = match ZipArchive::new(file) {
        Ok(a) => a,
        Err(e) => {
            tracing::debug!("{} is not a zip archive: {}", path.display(), e);
            return false;
        }
    };

    // Presence only; the entry itself is never decompressed.
    let has_manifest = archive.index_for_name(MANIFEST_ENTRY).is_some();
    if !has_manifest {
        tracing::debug!("{} has no {}", path.display(), MANIFEST_ENTRY);
    }
    has_manifest
}
