//! External BGZF compression
//!
//! The recoded VCF is block-compressed by the htslib `bgzip` tool so that it
//! can be indexed downstream. `bgzip <file>` replaces `<file>` with
//! `<file>.gz`; any failure is returned to the caller.

use crate::core::error::BgzipError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default executable name
pub const BGZIP: &str = "bgzip";

/// Compress `path` in place with `bgzip`, returning the `.gz` path
pub fn bgzip_file<P: AsRef<Path>>(path: P) -> Result<PathBuf, BgzipError> {
    bgzip_file_with(BGZIP, path)
}

/// Compress `path` with a specific bgzip-compatible executable
pub fn bgzip_file_with<P: AsRef<Path>>(program: &str, path: P) -> Result<PathBuf, BgzipError> {
    let path = path.as_ref();
    log::info!("Compressing {} with {}", path.display(), program);

    let output = Command::new(program)
        .arg(path)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BgzipError::NotFound,
            _ => BgzipError::Io(e),
        })?;

    if !output.status.success() {
        return Err(BgzipError::Failed {
            path: path.to_path_buf(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(compressed_path(path))
}

/// Path bgzip writes for `path`
pub fn compressed_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}
