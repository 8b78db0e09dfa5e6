//! Driver - file I/O around the engine.
//!
//! Reads the source and payload, runs exactly one strategy, and persists the
//! new document atomically. Every failure comes back as a `FailureReport`;
//! the source file is only touched after the new document is complete.

use std::path::{Path, PathBuf};

use omni_io::{read_text_safe, write_text_atomic};
use tracing::{info, warn};

use crate::diagnostics::{Excerpt, FailureContext, FallbackProbe};
use crate::diff::generate_unified_diff;
use crate::document::{Document, count_lines};
use crate::engine::RegionEditor;
use crate::error::SpliceError;
use crate::report::{FailureReport, LocateReport, Operation, SpliceReport};
use crate::strategy::LocateStrategy;
use crate::types::SpliceConfig;

/// Default number of leading region chars printed by locate.
pub const DEFAULT_EXCERPT_HEAD: usize = 2000;
/// Default number of trailing region chars printed by locate.
pub const DEFAULT_EXCERPT_TAIL: usize = 1000;

/// An insert or replace against one file.
#[derive(Debug, Clone)]
pub struct SpliceRequest {
    /// Report label.
    pub operation: Operation,
    /// Document to patch.
    pub source: PathBuf,
    /// File holding the replacement text.
    pub payload: PathBuf,
    /// Where to write; the source when `None`.
    pub destination: Option<PathBuf>,
    /// How to find the region.
    pub strategy: LocateStrategy,
    /// Simpler pattern probed after a `RegionNotFound`, for diagnostics only.
    pub fallback: Option<LocateStrategy>,
    /// Include a unified diff in the report.
    pub with_diff: bool,
}

/// A read-only locate against one file.
#[derive(Debug, Clone)]
pub struct LocateRequest {
    /// Document to search.
    pub source: PathBuf,
    /// How to find the region.
    pub strategy: LocateStrategy,
    /// Leading region chars to print.
    pub head: usize,
    /// Trailing region chars to print.
    pub tail: usize,
}

/// Run an insert or replace and persist the result.
///
/// # Errors
/// A `FailureReport` for invalid strategies (before any I/O), unreadable
/// inputs, region failures (with document context) and write failures.
pub fn run_splice(
    request: &SpliceRequest,
    config: &SpliceConfig,
) -> Result<SpliceReport, FailureReport> {
    let fail = |error: SpliceError, context: Option<FailureContext>| {
        FailureReport::new(request.operation, &request.source, error, context)
    };

    request.strategy.validate().map_err(|e| fail(e, None))?;
    if let Some(fallback) = &request.fallback {
        fallback.validate().map_err(|e| fail(e, None))?;
    }

    let document = read_document(&request.source, config).map_err(|e| fail(e, None))?;
    let replacement = read_text_safe(&request.payload, config.max_file_size)
        .map_err(|e| fail(e.into(), None))?;

    let splice = match RegionEditor::locate_and_replace(
        &document,
        &request.strategy,
        &replacement,
        config.policy,
    ) {
        Ok(splice) => splice,
        Err(error) => {
            let mut context = FailureContext::collect(&document, &request.strategy, &error, config);
            if let (Some(ctx), Some(fallback), SpliceError::RegionNotFound { .. }) =
                (context.as_mut(), &request.fallback, &error)
            {
                let probe = FallbackProbe::run(&document, fallback);
                warn!(primary = %request.strategy.needle(), ?probe, "primary region not found, probed fallback");
                ctx.fallback = Some(probe);
            }
            return Err(fail(error, context));
        }
    };

    let destination = request.destination.as_ref().unwrap_or(&request.source);
    write_text_atomic(destination, splice.document.as_str()).map_err(|e| fail(e.into(), None))?;

    info!(
        source = %request.source.display(),
        destination = %destination.display(),
        kind = %splice.kind,
        removed = splice.removed.len(),
        inserted = splice.inserted.len(),
        "region spliced"
    );

    let diff = request.with_diff.then(|| {
        let label = request
            .source
            .file_name()
            .map_or_else(|| request.source.display().to_string(), |n| n.to_string_lossy().to_string());
        generate_unified_diff(document.as_str(), splice.document.as_str(), &label)
    });

    Ok(SpliceReport {
        operation: request.operation,
        source: request.source.display().to_string(),
        destination: destination.display().to_string(),
        needle: request.strategy.needle().to_string(),
        chars_before: document.char_len(),
        chars_after: splice.document.char_len(),
        lines_removed: count_lines(&splice.removed),
        lines_inserted: count_lines(&splice.inserted),
        diff,
        splice,
    })
}

/// Locate a region and return an excerpt of it; nothing is written.
///
/// # Errors
/// A `FailureReport` for invalid strategies, an unreadable source and
/// region failures.
pub fn run_locate(
    request: &LocateRequest,
    config: &SpliceConfig,
) -> Result<LocateReport, FailureReport> {
    let fail = |error: SpliceError, context: Option<FailureContext>| {
        FailureReport::new(Operation::Locate, &request.source, error, context)
    };

    request.strategy.validate().map_err(|e| fail(e, None))?;
    let document = read_document(&request.source, config).map_err(|e| fail(e, None))?;

    match RegionEditor::locate_only(&document, &request.strategy, config.policy) {
        Ok(info) => Ok(LocateReport {
            source: request.source.display().to_string(),
            needle: request.strategy.needle().to_string(),
            excerpt: Excerpt::new(&info.text, request.head, request.tail),
            info,
        }),
        Err(error) => {
            let context = FailureContext::collect(&document, &request.strategy, &error, config);
            Err(fail(error, context))
        }
    }
}

fn read_document(path: &Path, config: &SpliceConfig) -> Result<Document, SpliceError> {
    Ok(Document::new(read_text_safe(path, config.max_file_size)?))
}
