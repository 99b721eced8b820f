//! Plain-text file loading and saving.
//!
//! Files are newline-delimited text. Reading is permissive (`\n` or `\r\n`,
//! invalid UTF-8 replaced); writing joins lines with `\n` and adds no
//! trailing newline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Maximum length of a file name typed into a prompt.
pub const MAX_NAME_LEN: usize = 255;

/// Lines and on-disk size of a loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub lines: Vec<String>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNameError {
    #[error("File name cannot be empty")]
    Empty,
    #[error("File name cannot contain '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(
        "could not write {} ({primary_err}) or {} ({fallback_err})",
        .primary.display(),
        .fallback.display()
    )]
    Fallback {
        primary: PathBuf,
        primary_err: io::Error,
        fallback: PathBuf,
        fallback_err: io::Error,
    },
}

/// Split text into lines the way files are read.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(ToOwned::to_owned).collect()
}

/// Read `path`; `Ok(None)` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load(path: &Path) -> io::Result<Option<LoadedFile>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    let text = String::from_utf8_lossy(&bytes);
    Ok(Some(LoadedFile {
        lines: split_lines(&text),
        size: bytes.len() as u64,
    }))
}

/// Write `lines` to `path`, returning the number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save(path: &Path, lines: &[&str]) -> io::Result<u64> {
    let content = lines.join("\n");
    fs::write(path, &content)?;
    Ok(content.len() as u64)
}

/// Write to `primary`, retrying once at `fallback` if `primary` is not writable.
///
/// The retry only happens for permission failures or when `primary` is a
/// directory; other errors are returned as they are, with no fallback.
///
/// # Errors
///
/// Returns [`SaveError`] when no write succeeded.
pub fn save_with_fallback(
    primary: &Path,
    fallback: &Path,
    lines: &[&str],
) -> Result<(PathBuf, u64), SaveError> {
    let primary_err = match save(primary, lines) {
        Ok(size) => return Ok((primary.to_path_buf(), size)),
        Err(err) => err,
    };
    let retry = primary.is_dir() || primary_err.kind() == io::ErrorKind::PermissionDenied;
    if !retry || fallback == primary {
        return Err(SaveError::Write {
            path: primary.to_path_buf(),
            source: primary_err,
        });
    }
    tracing::warn!(
        primary = %primary.display(),
        fallback = %fallback.display(),
        error = %primary_err,
        "save failed, retrying at fallback path"
    );
    match save(fallback, lines) {
        Ok(size) => Ok((fallback.to_path_buf(), size)),
        Err(fallback_err) => Err(SaveError::Fallback {
            primary: primary.to_path_buf(),
            primary_err,
            fallback: fallback.to_path_buf(),
            fallback_err,
        }),
    }
}

/// The directory-qualified retry target for `primary`: its file name in `dir`.
pub fn fallback_path(dir: &Path, primary: &Path, name: &str) -> PathBuf {
    primary
        .file_name()
        .filter(|_| !primary.is_dir())
        .map_or_else(|| dir.join(name), |file| dir.join(file))
}

/// Check a file name typed by the user.
///
/// # Errors
///
/// Returns [`FileNameError`] for empty names or names with a path separator
/// (or, on Windows, any reserved character).
pub fn validate_file_name(name: &str) -> Result<(), FileNameError> {
    if name.is_empty() {
        return Err(FileNameError::Empty);
    }
    #[cfg(windows)]
    const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
    #[cfg(not(windows))]
    const RESERVED: &[char] = &['/'];
    match name.chars().find(|c| RESERVED.contains(c)) {
        Some(c) => Err(FileNameError::InvalidChar(c)),
        None => Ok(()),
    }
}
