//! Utility functions for error handling
//!
//! File helpers that attach the offending path to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PrepError, Result};

/// Open a file for reading, reporting what it was needed for on failure
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(PrepError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Expected a file for: {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        PrepError::io(path, io::Error::new(e.kind(), format!("{context}: {e}")))
    })
}

/// Create a file for writing, truncating any previous content
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::create(path).map_err(|e| {
        PrepError::io(
            path,
            io::Error::new(
                e.kind(),
                format!("Failed to create file for {purpose}: {e}"),
            ),
        )
    })
}

/// Create a directory and its parents; an existing directory is not an error
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PrepError::io(path, e))
}

/// Write bytes to a file in one call
pub fn safe_write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| PrepError::io(path, e))
}
