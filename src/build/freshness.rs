//! Freshness signature of a theme's style sources.
//!
//! The signature is the sum of the modification times (whole Unix seconds)
//! of every `.scss`/`.css` file directly inside the source `scss/`
//! directory, plus the framework entry file of the template theme. It is a
//! coarse change detector: touching or rewriting any tracked file moves it
//! forward.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use glob::{glob, Pattern};
use tracing::{debug, warn};

use crate::build::BuildError;

/// Aggregate modification time of the tracked style sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FreshnessSignature(i64);

impl FreshnessSignature {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Whether the signature is newer than a stored marker.
    pub fn is_newer_than(self, marker: i64) -> bool {
        self.0 > marker
    }
}

impl fmt::Display for FreshnessSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a file name is tracked by the signature.
pub fn is_tracked_file(name: &str) -> bool {
    name.contains(".scss") || name.contains(".css")
}

/// List the tracked files directly inside `scss_dir`, sorted by path.
pub fn tracked_files(scss_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !scss_dir.is_dir() {
        return Err(BuildError::SourceNotFound(scss_dir.to_path_buf()));
    }

    let dir = scss_dir.to_str().ok_or_else(|| BuildError::NonUtf8Path(scss_dir.to_path_buf()))?;
    let pattern = format!("{}/*", Pattern::escape(dir));
    let entries = glob(&pattern).map_err(|e| BuildError::Io {
        path: scss_dir.to_path_buf(),
        source: std::io::Error::other(e.to_string()),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name().map(|n| is_tracked_file(&n.to_string_lossy())).unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Compute the freshness signature for a source directory.
///
/// A missing framework entry contributes nothing to the sum.
pub fn compute_signature(
    scss_dir: &Path,
    framework_entry: &Path,
) -> Result<FreshnessSignature, BuildError> {
    let files = tracked_files(scss_dir)?;

    let mut total: i64 = 0;
    for file in &files {
        total += modified_secs(file)?;
    }

    match modified_secs(framework_entry) {
        Ok(secs) => total += secs,
        Err(_) => warn!(path = %framework_entry.display(), "framework entry not found"),
    }

    debug!(files = files.len(), signature = total, "computed freshness signature");
    Ok(FreshnessSignature(total))
}

/// Modification time of a file in whole seconds since the Unix epoch.
pub fn modified_secs(path: &Path) -> Result<i64, BuildError> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| BuildError::Io { path: path.to_path_buf(), source })?;
    Ok(system_time_secs(modified))
}

fn system_time_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
