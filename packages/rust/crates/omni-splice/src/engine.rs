//! Region-replace engine.
//!
//! Pure functions over a `Document`: no I/O, no state between calls.

use tracing::debug;

use crate::document::Document;
use crate::error::{RegionKind, SpliceError, not_found};
use crate::strategy::{BracketBoundary, CompiledStrategy, LocateStrategy};
use crate::types::{MatchInfo, MatchPolicy, PayloadMatch, Span, Splice};

/// RegionEditor - locate a region in a document and replace it.
///
/// # Example
///
/// ```rust,ignore
/// use omni_splice::{Document, LocateStrategy, MatchPolicy, RegionEditor};
///
/// let doc = Document::new("alpha\nexport default X;\n");
/// let splice = RegionEditor::locate_and_replace(
///     &doc,
///     &LocateStrategy::anchor("export default X;"),
///     "const y = 1;\n",
///     MatchPolicy::Unique,
/// )?;
/// assert_eq!(splice.document.as_str(), "alpha\nconst y = 1;\nexport default X;\n");
/// ```
#[derive(Debug)]
pub struct RegionEditor;

/// A located region before it is turned into a `MatchInfo` or `Splice`.
struct Region {
    kind: RegionKind,
    span: Span,
    payload: Option<PayloadMatch>,
    candidates: usize,
    /// Line break closing an interior bracket region that ends at a line start.
    line_break: Option<&'static str>,
}

impl RegionEditor {
    /// Locate the region without producing a new document.
    ///
    /// # Errors
    /// `InvalidStrategy`, `RegionNotFound` or `AmbiguousRegion`.
    pub fn locate_only(
        document: &Document,
        strategy: &LocateStrategy,
        policy: MatchPolicy,
    ) -> Result<MatchInfo, SpliceError> {
        let compiled = strategy.compile()?;
        let region = find_region(document.as_str(), &compiled, policy)?;
        let (line, column) = document.position(region.span.start);

        debug!(kind = %region.kind, start = region.span.start, end = region.span.end, "located region");

        Ok(MatchInfo {
            kind: region.kind,
            span: region.span,
            text: document.slice(region.span).to_string(),
            line,
            column,
            payload: region.payload,
            candidates: region.candidates,
        })
    }

    /// Locate the region and derive a document with it replaced.
    ///
    /// `replacement` is inserted verbatim. The only adjustment is the
    /// trailing newline `BracketBoundary::Interior` may add.
    ///
    /// # Errors
    /// `InvalidStrategy`, `RegionNotFound` or `AmbiguousRegion`.
    pub fn locate_and_replace(
        document: &Document,
        strategy: &LocateStrategy,
        replacement: &str,
        policy: MatchPolicy,
    ) -> Result<Splice, SpliceError> {
        let compiled = strategy.compile()?;
        let region = find_region(document.as_str(), &compiled, policy)?;

        let mut inserted = replacement.to_string();
        if let Some(line_break) = region.line_break {
            if !inserted.is_empty() && !inserted.ends_with('\n') {
                inserted.push_str(line_break);
            }
        }

        let new_document = document.splice(region.span, &inserted);
        let (line, _) = document.position(region.span.start);

        debug!(
            kind = %region.kind,
            start = region.span.start,
            end = region.span.end,
            inserted = inserted.len(),
            "replaced region"
        );

        Ok(Splice {
            document: new_document,
            kind: region.kind,
            span: region.span,
            line,
            removed: document.slice(region.span).to_string(),
            inserted,
            candidates: region.candidates,
        })
    }
}

fn find_region(
    text: &str,
    strategy: &CompiledStrategy<'_>,
    policy: MatchPolicy,
) -> Result<Region, SpliceError> {
    match strategy {
        CompiledStrategy::Anchor { marker } => find_anchor(text, marker, policy),
        CompiledStrategy::Bracket {
            start,
            end,
            boundary,
        } => find_bracket(text, start, end, *boundary, policy),
        CompiledStrategy::Pattern {
            source,
            regex,
            payload,
        } => {
            let Some(caps) = regex.captures(text) else {
                return Err(not_found(RegionKind::Pattern, source));
            };
            let candidates = regex.find_iter(text).count();
            ensure_unique(RegionKind::Pattern, source, candidates, policy)?;

            let whole = caps.get(0).map_or(Span::point(0), |m| Span::new(m.start(), m.end()));
            let payload = payload.and_then(|(index, group)| {
                caps.get(index).map(|m| PayloadMatch {
                    group: group.to_string(),
                    span: Span::new(m.start(), m.end()),
                    text: m.as_str().to_string(),
                })
            });

            Ok(Region {
                kind: RegionKind::Pattern,
                span: whole,
                payload,
                candidates,
                line_break: None,
            })
        }
    }
}

fn find_anchor(text: &str, marker: &str, policy: MatchPolicy) -> Result<Region, SpliceError> {
    let Some(offset) = text.find(marker) else {
        return Err(not_found(RegionKind::Anchor, marker));
    };
    let candidates = text.matches(marker).count();
    ensure_unique(RegionKind::Anchor, marker, candidates, policy)?;

    Ok(Region {
        kind: RegionKind::Anchor,
        span: Span::point(offset),
        payload: None,
        candidates,
        line_break: None,
    })
}

fn find_bracket(
    text: &str,
    start: &str,
    end: &str,
    boundary: BracketBoundary,
    policy: MatchPolicy,
) -> Result<Region, SpliceError> {
    let Some(start_offset) = text.find(start) else {
        return Err(not_found(RegionKind::Bracket, start));
    };
    let candidates = text.matches(start).count();
    ensure_unique(RegionKind::Bracket, start, candidates, policy)?;

    // The end marker is always the first one after the start marker.
    let after_start = start_offset + start.len();
    let Some(relative) = text[after_start..].find(end) else {
        return Err(not_found(RegionKind::Bracket, end));
    };
    let end_offset = after_start + relative;

    let (span, line_break) = match boundary {
        BracketBoundary::Inclusive => (Span::new(start_offset, end_offset + end.len()), None),
        BracketBoundary::Interior => {
            let between = &text[after_start..end_offset];
            let interior_start = if start.ends_with('\n') {
                after_start
            } else {
                between.find('\n').map_or(after_start, |i| after_start + i + 1)
            };
            let interior_end = text[interior_start..end_offset]
                .rfind('\n')
                .map_or(end_offset, |i| interior_start + i + 1);
            let before_end = &text[..interior_end];
            let line_break = if before_end.ends_with("\r\n") {
                Some("\r\n")
            } else if before_end.ends_with('\n') {
                Some("\n")
            } else {
                None
            };
            (Span::new(interior_start, interior_end), line_break)
        }
    };

    Ok(Region {
        kind: RegionKind::Bracket,
        span,
        payload: None,
        candidates,
        line_break,
    })
}

fn ensure_unique(
    kind: RegionKind,
    needle: &str,
    count: usize,
    policy: MatchPolicy,
) -> Result<(), SpliceError> {
    if policy == MatchPolicy::Unique && count > 1 {
        return Err(SpliceError::AmbiguousRegion {
            kind,
            needle: needle.to_string(),
            count,
        });
    }
    Ok(())
}
