//! Error types for region location and replacement.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::fmt;

use omni_io::IoError;
use serde::Serialize;
use thiserror::Error;

/// Which locate strategy produced a region or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Literal insertion point.
    Anchor,
    /// Literal start/end marker pair.
    Bracket,
    /// Regular expression.
    Pattern,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Anchor => "anchor",
            Self::Bracket => "bracket",
            Self::Pattern => "pattern",
        })
    }
}

/// Error types for splice operations.
///
/// Region failures are recoverable values; the engine never aborts the process.
#[derive(Error, Debug)]
pub enum SpliceError {
    /// The anchor, a bracket marker or the pattern had zero matches.
    #[error("{kind} not found: {needle:?}")]
    RegionNotFound {
        /// Strategy that failed.
        kind: RegionKind,
        /// Literal or pattern source that was searched for.
        needle: String,
    },

    /// More than one candidate under `MatchPolicy::Unique`.
    #[error("{kind} is ambiguous: {needle:?} matches {count} times")]
    AmbiguousRegion {
        /// Strategy that failed.
        kind: RegionKind,
        /// Literal or pattern source that was searched for.
        needle: String,
        /// Number of non-overlapping candidates.
        count: usize,
    },

    /// Empty literal, pattern that does not compile, or unknown payload group.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Source, payload or destination I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

impl SpliceError {
    /// Process exit code for this failure.
    ///
    /// `1` region failures, `2` invalid strategy, `3` I/O.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::RegionNotFound { .. } | Self::AmbiguousRegion { .. } => 1,
            Self::InvalidStrategy(_) => 2,
            Self::Io(_) => 3,
        }
    }

    /// Strategy kind and needle of a region failure.
    #[must_use]
    pub fn region(&self) -> Option<(RegionKind, &str)> {
        match self {
            Self::RegionNotFound { kind, needle } | Self::AmbiguousRegion { kind, needle, .. } => {
                Some((*kind, needle))
            }
            Self::InvalidStrategy(_) | Self::Io(_) => None,
        }
    }
}

pub(crate) fn not_found(kind: RegionKind, needle: &str) -> SpliceError {
    SpliceError::RegionNotFound {
        kind,
        needle: needle.to_string(),
    }
}
