//! Failure context and region excerpts for the operator.
//!
//! All lengths are counted in chars, so a cut never lands inside a UTF-8
//! sequence.

use std::fmt;

use serde::Serialize;

use crate::document::Document;
use crate::engine::RegionEditor;
use crate::error::{RegionKind, SpliceError};
use crate::strategy::{LocateStrategy, build_regex};
use crate::types::{MatchPolicy, SpliceConfig};

/// Most occurrence lines listed for an ambiguous needle.
const MAX_LISTED_OCCURRENCES: usize = 10;

/// Leading `n` chars of `text`.
#[must_use]
pub fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Trailing `n` chars of `text`.
#[must_use]
pub fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &text[i..],
        None => text,
    }
}

/// Text following a start marker whose end marker was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerContext {
    /// Byte offset of the start marker.
    pub offset: usize,
    /// Line of the start marker (1-indexed).
    pub line: usize,
    /// Text from the start marker on.
    pub text: String,
}

/// Outcome of probing a simpler pattern after the primary one missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FallbackProbe {
    /// The fallback matched: the declaration exists but the full pattern did not match.
    Found {
        /// Fallback pattern source.
        pattern: String,
        /// Line of the fallback match (1-indexed).
        line: usize,
    },
    /// The fallback did not match either.
    Missing {
        /// Fallback pattern source.
        pattern: String,
    },
}

impl FallbackProbe {
    /// Run `fallback` against `document`, leftmost match.
    #[must_use]
    pub fn run(document: &Document, fallback: &LocateStrategy) -> Self {
        let pattern = fallback.needle().to_string();
        match RegionEditor::locate_only(document, fallback, MatchPolicy::FirstMatch) {
            Ok(info) => Self::Found {
                pattern,
                line: info.line,
            },
            Err(_) => Self::Missing { pattern },
        }
    }
}

/// What the operator needs to see to fix a failed locate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureContext {
    /// Strategy that failed.
    pub kind: RegionKind,
    /// Needle that was missing or ambiguous.
    pub needle: String,
    /// Size of the searched document in chars.
    pub document_chars: usize,
    /// First chars of the document.
    pub head: String,
    /// Last chars of the document.
    pub tail: String,
    /// Set when a bracket start marker was found but its end marker was not.
    pub marker_context: Option<MarkerContext>,
    /// Lines of each candidate when the needle was ambiguous.
    pub occurrence_lines: Vec<usize>,
    /// Set when a fallback pattern was probed.
    pub fallback: Option<FallbackProbe>,
}

impl FailureContext {
    /// Build the context for a region failure; `None` for other errors.
    #[must_use]
    pub fn collect(
        document: &Document,
        strategy: &LocateStrategy,
        error: &SpliceError,
        config: &SpliceConfig,
    ) -> Option<Self> {
        let (kind, needle) = error.region()?;
        let text = document.as_str();

        let marker_context = match (strategy, error) {
            (LocateStrategy::Bracket { start, end, .. }, SpliceError::RegionNotFound { needle, .. })
                if needle == end =>
            {
                text.find(start.as_str()).map(|offset| MarkerContext {
                    offset,
                    line: document.position(offset).0,
                    text: head_chars(&text[offset..], config.marker_context_chars).to_string(),
                })
            }
            _ => None,
        };

        let occurrence_lines = if matches!(error, SpliceError::AmbiguousRegion { .. }) {
            occurrence_lines(document, strategy)
        } else {
            Vec::new()
        };

        Some(Self {
            kind,
            needle: needle.to_string(),
            document_chars: document.char_len(),
            head: head_chars(text, config.context_chars).to_string(),
            tail: tail_chars(text, config.context_chars).to_string(),
            marker_context,
            occurrence_lines,
            fallback: None,
        })
    }
}

/// Lines of the first few candidates for the strategy's primary needle.
fn occurrence_lines(document: &Document, strategy: &LocateStrategy) -> Vec<usize> {
    let text = document.as_str();
    let offsets: Vec<usize> = match strategy {
        LocateStrategy::Anchor { .. } | LocateStrategy::Bracket { .. } => text
            .match_indices(strategy.needle())
            .take(MAX_LISTED_OCCURRENCES)
            .map(|(i, _)| i)
            .collect(),
        LocateStrategy::Pattern { source, .. } => build_regex(source)
            .map(|re| {
                re.find_iter(text)
                    .take(MAX_LISTED_OCCURRENCES)
                    .map(|m| m.start())
                    .collect()
            })
            .unwrap_or_default(),
    };
    offsets
        .into_iter()
        .map(|offset| document.position(offset).0)
        .collect()
}

/// First and last chars of a located region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    /// Leading chars (the whole text when nothing was elided).
    pub head: String,
    /// Trailing chars; `None` when nothing was elided.
    pub tail: Option<String>,
    /// Chars left out between `head` and `tail`.
    pub elided_chars: usize,
}

impl Excerpt {
    /// Keep `head` leading and `tail` trailing chars of `text`.
    #[must_use]
    pub fn new(text: &str, head: usize, tail: usize) -> Self {
        let total = text.chars().count();
        let kept = head.saturating_add(tail);
        if total <= kept {
            return Self {
                head: text.to_string(),
                tail: None,
                elided_chars: 0,
            };
        }
        Self {
            head: head_chars(text, head).to_string(),
            tail: Some(tail_chars(text, tail).to_string()),
            elided_chars: total - kept,
        }
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.head)?;
        if let Some(tail) = &self.tail {
            write!(f, "\n\n... [{} chars elided] ...\n\n{tail}", self.elided_chars)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_tail_chars() {
        assert_eq!(head_chars("✅abc", 2), "✅a");
        assert_eq!(tail_chars("abc✅", 2), "c✅");
        assert_eq!(head_chars("ab", 10), "ab");
        assert_eq!(tail_chars("ab", 10), "ab");
        assert_eq!(tail_chars("ab", 0), "");
    }

    #[test]
    fn test_excerpt_elides_middle() {
        let excerpt = Excerpt::new("0123456789", 3, 2);
        assert_eq!(excerpt.head, "012");
        assert_eq!(excerpt.tail.as_deref(), Some("89"));
        assert_eq!(excerpt.elided_chars, 5);
        assert!(excerpt.to_string().contains("[5 chars elided]"));
    }

    #[test]
    fn test_excerpt_huge_limits_keep_whole_text() {
        let excerpt = Excerpt::new("abcdef", usize::MAX, 1);
        assert_eq!(excerpt.head, "abcdef");
        assert_eq!(excerpt.elided_chars, 0);

        let excerpt = Excerpt::new("abcdef", 1, usize::MAX);
        assert!(excerpt.tail.is_none());
    }

    #[test]
    fn test_excerpt_short_region_whole() {
        let excerpt = Excerpt::new("short", 3, 2);
        assert_eq!(excerpt.to_string(), "short");
    }

    #[test]
    fn test_marker_context_after_start() {
        let doc = Document::new("head\nSTART\nbody without end\n");
        let strategy = LocateStrategy::bracket("START", "END");
        let err = RegionEditor::locate_only(&doc, &strategy, MatchPolicy::Unique).unwrap_err();

        let ctx = FailureContext::collect(&doc, &strategy, &err, &SpliceConfig::default())
            .expect("region failure");
        let marker = ctx.marker_context.expect("marker context");
        assert_eq!(marker.line, 2);
        assert!(marker.text.starts_with("START\nbody"));
        assert_eq!(ctx.needle, "END");
    }

    #[test]
    fn test_ambiguous_lists_lines() {
        let doc = Document::new("x;\ny\nx;\n");
        let strategy = LocateStrategy::anchor("x;");
        let err = RegionEditor::locate_only(&doc, &strategy, MatchPolicy::Unique).unwrap_err();

        let ctx = FailureContext::collect(&doc, &strategy, &err, &SpliceConfig::default())
            .expect("region failure");
        assert_eq!(ctx.occurrence_lines, vec![1, 3]);
    }

    #[test]
    fn test_fallback_probe() {
        let doc = Document::new("const parseWeaknessesFromUnified = (t) => {\n");
        let found = FallbackProbe::run(&doc, &LocateStrategy::pattern("const parseWeaknessesFromUnified"));
        assert!(matches!(found, FallbackProbe::Found { line: 1, .. }));

        let missing = FallbackProbe::run(&doc, &LocateStrategy::pattern("const parseOther"));
        assert!(matches!(missing, FallbackProbe::Missing { .. }));
    }
}
