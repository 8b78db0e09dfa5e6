//! Core types for region location and replacement.
//!
//! Defines the data structures shared by the engine, diagnostics and driver.

use serde::Serialize;

use crate::document::Document;
use crate::error::RegionKind;

/// Default maximum size of a source or payload file (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// How to treat a needle that occurs more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// More than one candidate is an `AmbiguousRegion` failure.
    #[default]
    Unique,
    /// Take the leftmost candidate.
    FirstMatch,
}

/// Half-open byte range `[start, end)` into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-length span at `offset`.
    #[must_use]
    pub fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The designated capture group of a `Pattern` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadMatch {
    /// Group index or name as given.
    pub group: String,
    /// Byte span of the group.
    pub span: Span,
    /// Text of the group.
    pub text: String,
}

/// Result of a read-only locate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchInfo {
    /// Strategy that located the region.
    pub kind: RegionKind,
    /// Region that a replace would substitute.
    pub span: Span,
    /// Text of the region (empty for an anchor point).
    pub text: String,
    /// Line of `span.start` (1-indexed).
    pub line: usize,
    /// Column of `span.start` in chars (1-indexed).
    pub column: usize,
    /// Designated capture group, when the pattern has one and it participated.
    pub payload: Option<PayloadMatch>,
    /// Number of non-overlapping candidates in the document.
    pub candidates: usize,
}

/// Result of a successful replace.
///
/// `document` is the derived text; the input document is left as it was.
#[derive(Debug, Clone, Serialize)]
pub struct Splice {
    /// New document.
    #[serde(skip)]
    pub document: Document,
    /// Strategy that located the region.
    pub kind: RegionKind,
    /// Replaced span, in offsets of the original document.
    pub span: Span,
    /// Line of `span.start` in the original document (1-indexed).
    pub line: usize,
    /// Text that was removed.
    pub removed: String,
    /// Text that was inserted (the replacement, plus a newline the
    /// interior bracket convention may add).
    pub inserted: String,
    /// Number of non-overlapping candidates in the document.
    pub candidates: usize,
}

impl Splice {
    /// Characters removed from the original document.
    #[must_use]
    pub fn chars_removed(&self) -> usize {
        self.removed.chars().count()
    }

    /// Characters inserted into the new document.
    #[must_use]
    pub fn chars_inserted(&self) -> usize {
        self.inserted.chars().count()
    }
}

/// Configuration for splice operations.
///
/// Controls file size limits, ambiguity handling and diagnostic context size.
#[derive(Debug, Clone)]
pub struct SpliceConfig {
    /// Maximum file size in bytes (default 10 MiB).
    pub max_file_size: u64,
    /// Ambiguity handling.
    pub policy: MatchPolicy,
    /// Characters of document head/tail printed on failure.
    pub context_chars: usize,
    /// Characters printed after a start marker whose end marker is missing.
    pub marker_context_chars: usize,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            policy: MatchPolicy::Unique,
            context_chars: 200,
            marker_context_chars: 100,
        }
    }
}
