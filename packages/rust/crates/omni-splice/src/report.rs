//! Operator-facing reports.
//!
//! Each report renders as plain text (`Display`) or JSON (`Serialize`).

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::diagnostics::{Excerpt, FailureContext, FallbackProbe};
use crate::error::SpliceError;
use crate::types::{MatchInfo, Splice};

/// Driver operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Insert payload before an anchor.
    Insert,
    /// Print a located region.
    Locate,
    /// Replace a located region with payload.
    Replace,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "INSERT",
            Self::Locate => "LOCATE",
            Self::Replace => "REPLACE",
        })
    }
}

/// Summary of a persisted insert or replace.
#[derive(Debug, Clone, Serialize)]
pub struct SpliceReport {
    /// Insert or replace.
    pub operation: Operation,
    /// Path that was read.
    pub source: String,
    /// Path that was written.
    pub destination: String,
    /// Needle of the strategy that located the region.
    pub needle: String,
    /// Region and text metadata.
    pub splice: Splice,
    /// Document size before, in chars.
    pub chars_before: usize,
    /// Document size after, in chars.
    pub chars_after: usize,
    /// Lines in the removed text.
    pub lines_removed: usize,
    /// Lines in the inserted text.
    pub lines_inserted: usize,
    /// Unified diff, when requested.
    pub diff: Option<String>,
}

impl fmt::Display for SpliceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.splice;
        writeln!(f, "// {}: {}", self.operation, self.source)?;
        writeln!(
            f,
            "// Region: {} {:?} at L{} (bytes {}..{})",
            s.kind, self.needle, s.line, s.span.start, s.span.end
        )?;
        if s.candidates > 1 {
            writeln!(f, "// Candidates: {} (leftmost taken)", s.candidates)?;
        }
        writeln!(
            f,
            "// Removed: {} chars ({} lines)",
            s.chars_removed(),
            self.lines_removed
        )?;
        writeln!(
            f,
            "// Inserted: {} chars ({} lines)",
            s.chars_inserted(),
            self.lines_inserted
        )?;
        writeln!(
            f,
            "// Document: {} -> {} chars",
            self.chars_before, self.chars_after
        )?;
        writeln!(f, "// Written: {}", self.destination)?;
        if let Some(diff) = &self.diff {
            writeln!(f, "\n// Diff:")?;
            f.write_str(diff)?;
        }
        Ok(())
    }
}

/// A located region, printed for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    /// Path that was read.
    pub source: String,
    /// Needle of the strategy.
    pub needle: String,
    /// Location and text of the region.
    pub info: MatchInfo,
    /// Head/tail of the region text.
    pub excerpt: Excerpt,
}

impl fmt::Display for LocateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        writeln!(f, "// {}: {}", Operation::Locate, self.source)?;
        writeln!(
            f,
            "// Region: {} {:?} at L{}:{} (bytes {}..{})",
            info.kind, self.needle, info.line, info.column, info.span.start, info.span.end
        )?;
        writeln!(f, "// Length: {} chars", info.text.chars().count())?;
        if info.candidates > 1 {
            writeln!(f, "// Candidates: {} (leftmost taken)", info.candidates)?;
        }
        if let Some(payload) = &info.payload {
            writeln!(
                f,
                "// Payload group {}: bytes {}..{}, {} chars",
                payload.group,
                payload.span.start,
                payload.span.end,
                payload.text.chars().count()
            )?;
        }
        writeln!(f, "\n=== REGION START ===")?;
        writeln!(f, "{}", self.excerpt)?;
        writeln!(f, "=== REGION END ===")
    }
}

/// A failed operation; the source file is untouched.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Operation that failed.
    pub operation: Operation,
    /// Path that was (or would have been) read.
    pub source: String,
    /// Human-readable error.
    pub message: String,
    /// Process exit code.
    pub exit_code: u8,
    /// Document context for region failures.
    pub context: Option<FailureContext>,
    /// Underlying error.
    #[serde(skip)]
    pub error: SpliceError,
}

impl FailureReport {
    /// Wrap `error` for `source`.
    #[must_use]
    pub fn new(
        operation: Operation,
        source: &Path,
        error: SpliceError,
        context: Option<FailureContext>,
    ) -> Self {
        Self {
            operation,
            source: source.display().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code(),
            context,
            error,
        }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {} FAILED: {}", self.operation, self.source)?;
        writeln!(f, "// Error: {}", self.message)?;

        let Some(ctx) = &self.context else {
            return Ok(());
        };

        match &ctx.fallback {
            Some(FallbackProbe::Found { pattern, line }) => writeln!(
                f,
                "// Fallback {pattern:?} found at L{line}: declaration exists but the full pattern did not match"
            )?,
            Some(FallbackProbe::Missing { pattern }) => {
                writeln!(f, "// Fallback {pattern:?} not found either")?;
            }
            None => {}
        }
        if let Some(marker) = &ctx.marker_context {
            writeln!(
                f,
                "// Start marker found at L{} (byte {}), end marker missing after it:",
                marker.line, marker.offset
            )?;
            writeln!(f, "{}...", marker.text)?;
        }
        if !ctx.occurrence_lines.is_empty() {
            let lines: Vec<String> = ctx.occurrence_lines.iter().map(ToString::to_string).collect();
            writeln!(f, "// Candidates at lines: {}", lines.join(", "))?;
        }
        writeln!(f, "// Document: {} chars", ctx.document_chars)?;
        writeln!(f, "// Head:\n{}", ctx.head)?;
        writeln!(f, "// Tail:\n{}", ctx.tail)
    }
}
