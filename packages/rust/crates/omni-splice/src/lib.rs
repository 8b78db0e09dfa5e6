#![allow(clippy::doc_markdown)]

//! omni-splice - Region Locate & Replace for Omni DevEnv
//!
//! Patches source files in place by locating a region of text and
//! substituting it. The target is opaque text; nothing is parsed.
//!
//! # Features
//!
//! - **Anchor**: Insert a block immediately before a literal
//! - **Bracket**: Replace a section between two literal markers
//! - **Pattern**: Locate or replace the first regex match, across lines
//! - **Explicit ambiguity**: Several candidates fail unless leftmost is asked for
//! - **Atomic writes**: The target is never left half-written
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-splice/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # SpliceError enum (thiserror)
//! ├── types.rs        # Span, MatchInfo, Splice, SpliceConfig
//! ├── document.rs     # Immutable Document
//! ├── strategy.rs     # LocateStrategy + validation
//! ├── engine.rs       # RegionEditor (pure)
//! ├── diagnostics.rs  # Failure context, excerpts, fallback probe
//! ├── diff.rs         # Unified diff
//! ├── report.rs       # Text / JSON reports
//! ├── driver.rs       # File I/O around the engine
//! ├── cli.rs          # clap definitions (binary)
//! └── main.rs         # omni-splice binary
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_splice::{Document, LocateStrategy, MatchPolicy, RegionEditor};
//!
//! let doc = Document::new("head\nSTART\nold body\nEND\ntail");
//! let splice = RegionEditor::locate_and_replace(
//!     &doc,
//!     &LocateStrategy::bracket("START", "END"),
//!     "new body",
//!     MatchPolicy::Unique,
//! )?;
//! assert_eq!(splice.document.as_str(), "head\nSTART\nnew body\nEND\ntail");
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod diagnostics;
mod diff;
mod document;
mod driver;
mod engine;
mod error;
mod report;
mod strategy;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use document::{Document, count_lines};
pub use engine::RegionEditor;
pub use error::{RegionKind, SpliceError};
pub use strategy::{BracketBoundary, LocateStrategy, PayloadGroup};
pub use types::{
    DEFAULT_MAX_FILE_SIZE, MatchInfo, MatchPolicy, PayloadMatch, Span, Splice, SpliceConfig,
};

// Driver and reporting
pub use driver::{
    DEFAULT_EXCERPT_HEAD, DEFAULT_EXCERPT_TAIL, LocateRequest, SpliceRequest, run_locate,
    run_splice,
};
pub use report::{FailureReport, LocateReport, Operation, SpliceReport};

// Diagnostics for callers that drive the engine themselves
pub use diagnostics::{Excerpt, FailureContext, FallbackProbe, MarkerContext, head_chars, tail_chars};

// Re-export diff utility for external use
pub use diff::generate_unified_diff;
