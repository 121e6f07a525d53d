//! Build result types.
//!
//! Contains types for representing the outcome of a style build.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::build::FreshnessSignature;

/// Why the compiled stylesheet is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    /// Requested explicitly
    Forced,
    /// Development mode disables the cache
    DevelopmentMode,
    /// The compiled stylesheet does not exist
    ArtifactMissing,
    /// The freshness signature moved past the stored marker
    SourcesChanged,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReason::Forced => write!(f, "forced"),
            RebuildReason::DevelopmentMode => write!(f, "development mode"),
            RebuildReason::ArtifactMissing => write!(f, "compiled stylesheet missing"),
            RebuildReason::SourcesChanged => write!(f, "sources changed"),
        }
    }
}

/// Decide whether the stylesheet must be regenerated.
///
/// Returns `None` when the artifact exists, the signature is not newer than
/// the marker, and neither development nor force mode is active.
pub fn rebuild_reason(
    signature: FreshnessSignature,
    marker: i64,
    artifact_exists: bool,
    development: bool,
    force: bool,
) -> Option<RebuildReason> {
    if force {
        Some(RebuildReason::Forced)
    } else if development {
        Some(RebuildReason::DevelopmentMode)
    } else if !artifact_exists {
        Some(RebuildReason::ArtifactMissing)
    } else if signature.is_newer_than(marker) {
        Some(RebuildReason::SourcesChanged)
    } else {
        None
    }
}

/// Inputs and decision of a style build, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Directory the sources are compiled from
    pub source_root: PathBuf,
    /// Compiled stylesheet path
    pub css_path: PathBuf,
    pub signature: FreshnessSignature,
    /// Stored marker, `0` when never set
    pub marker: i64,
    pub artifact_exists: bool,
    /// `None` when the artifact is up to date
    pub reason: Option<RebuildReason>,
}

impl BuildPlan {
    pub fn needs_rebuild(&self) -> bool {
        self.reason.is_some()
    }
}

/// Details of a completed rebuild.
#[derive(Debug, Clone)]
pub struct RebuildReport {
    pub reason: RebuildReason,
    pub css_path: PathBuf,
    /// Source map path, written in development mode only
    pub map_path: Option<PathBuf>,
    /// Signature stored as the new marker
    pub signature: FreshnessSignature,
    /// Marker before the rebuild
    pub previous_marker: i64,
    /// Number of SCSS files the compiler loaded
    pub files_loaded: usize,
    /// Size of the written stylesheet in bytes
    pub css_bytes: usize,
    pub duration: Duration,
}

/// Outcome of a style build.
#[derive(Debug, Clone)]
pub enum StyleBuildOutcome {
    /// Nothing written, marker unchanged
    UpToDate { signature: FreshnessSignature, marker: i64 },
    /// Stylesheet regenerated and marker updated
    Rebuilt(RebuildReport),
}

impl StyleBuildOutcome {
    pub fn is_rebuilt(&self) -> bool {
        matches!(self, StyleBuildOutcome::Rebuilt(_))
    }

    /// Marker value after the build.
    pub fn marker(&self) -> i64 {
        match self {
            StyleBuildOutcome::UpToDate { marker, .. } => *marker,
            StyleBuildOutcome::Rebuilt(report) => report.signature.value(),
        }
    }

    /// Generate a summary string.
    pub fn summary(&self) -> String {
        match self {
            StyleBuildOutcome::UpToDate { signature, marker } => {
                format!("Stylesheet up to date (signature {}, marker {})", signature, marker)
            }
            StyleBuildOutcome::Rebuilt(report) => {
                let mut s = format!(
                    "Compiled {} ({} bytes, {} files) in {:.2}s [{}]",
                    report.css_path.display(),
                    report.css_bytes,
                    report.files_loaded,
                    report.duration.as_secs_f64(),
                    report.reason
                );
                if let Some(map) = &report.map_path {
                    s.push_str(&format!("\n  Source map: {}", map.display()));
                }
                s
            }
        }
    }
}
