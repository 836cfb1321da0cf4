//! Test fixtures: jar files and dependency tables.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::DependencyTable;
use crate::sources::MANIFEST_ENTRY;

/// Base URL used by [`table`].
pub const TEST_REPO: &str = "https://repo.example.com/";

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, contents) in entries {
        zip.start_file(*name, options).expect("failed to start zip entry");
        zip.write_all(contents).expect("failed to write zip entry");
    }

    zip.finish().expect("failed to finish zip").into_inner()
}

/// Bytes of a minimal, valid jar.
pub fn jar_bytes() -> Vec<u8> {
    zip_bytes(&[
        (MANIFEST_ENTRY, &b"Manifest-Version: 1.0\r\n\r\n"[..]),
        ("scala/Predef.class", &b"\xca\xfe\xba\xbe"[..]),
    ])
}

/// Write a valid jar, creating parent directories.
pub fn write_jar(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create jar directory");
    }
    std::fs::write(path, jar_bytes()).expect("failed to write jar");
}

/// Write a jar whose manifest uses a compression method no reader supports.
pub fn write_jar_with_unreadable_manifest(path: &Path) {
    const UNKNOWN_METHOD: [u8; 2] = 0x00ffu16.to_le_bytes();

    let mut bytes = zip_bytes(&[(MANIFEST_ENTRY, &b"Manifest-Version: 1.0\r\n\r\n"[..])]);

    // Local file header: method at offset 8
    assert_eq!(&bytes[..4], b"PK\x03\x04");
    bytes[8..10].copy_from_slice(&UNKNOWN_METHOD);

    // Central directory header: method at offset 10
    let central = bytes
        .windows(4)
        .position(|w| w == b"PK\x01\x02")
        .expect("central directory header");
    bytes[central + 10..central + 12].copy_from_slice(&UNKNOWN_METHOD);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create jar directory");
    }
    std::fs::write(path, bytes).expect("failed to write jar");
}

/// Write a well-formed zip that is not a jar (no manifest).
pub fn write_zip_without_manifest(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create zip directory");
    }
    let bytes = zip_bytes(&[("readme.txt", &b"hello"[..])]);
    std::fs::write(path, bytes).expect("failed to write zip");
}

/// A dependency table whose sources live under [`TEST_REPO`].
pub fn table(names: &[&str]) -> DependencyTable {
    let urls: Vec<String> = names.iter().map(|n| format!("{}{}", TEST_REPO, n)).collect();
    DependencyTable::from_pairs(names.iter().copied().zip(urls.iter().map(String::as_str)))
        .expect("invalid test dependency table")
}
