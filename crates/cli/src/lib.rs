use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod commands;

/// Absolute form of a user-supplied path. Existing paths are canonicalized;
/// paths that do not exist yet (output files and dirs) are joined onto the
/// current directory.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if let Ok(resolved) = path.canonicalize() {
        return Ok(resolved);
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Infer a design name from the input file path.
///
/// If the path has no file stem (e.g., `/`), fallback to `unnamed-design`.
pub fn infer_design_name(path: &Path) -> String {
    path.file_stem().and_then(|os_str| os_str.to_str()).unwrap_or("unnamed-design").to_string()
}

/// Hex SHA-256 of a file's contents, streamed through the hasher.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open input for hashing: {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to hash input: {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 of an in-memory buffer as a hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
