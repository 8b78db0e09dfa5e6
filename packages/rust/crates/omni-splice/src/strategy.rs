//! Locate strategies and their validation.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{RegionKind, SpliceError};

/// Which part of a bracketed section is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketBoundary {
    /// Keep both markers and their lines; replace the lines between them.
    ///
    /// The interior starts after the line break that follows the start
    /// marker (right after the marker when the end marker shares its line)
    /// and stops after the last line break before the end marker (right
    /// before the marker when there is none). When the interior ends at a
    /// line start, a non-empty replacement without a trailing newline gets
    /// one, so the end marker keeps its own line.
    #[default]
    Interior,
    /// Replace from the first byte of the start marker to the last byte of
    /// the end marker. Markers are consumed; carry them in the replacement
    /// to keep them.
    Inclusive,
}

/// Capture group designated as a pattern's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadGroup {
    /// Group by index (`0` is the whole match).
    Index(usize),
    /// Named group (`(?P<name>...)`).
    Name(String),
}

impl FromStr for PayloadGroup {
    type Err = SpliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SpliceError::InvalidStrategy(
                "payload group must not be empty".to_string(),
            ));
        }
        Ok(s.parse::<usize>()
            .map_or_else(|_| Self::Name(s.to_string()), Self::Index))
    }
}

impl fmt::Display for PayloadGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// How to find a region within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocateStrategy {
    /// Zero-length point immediately before `marker`.
    Anchor {
        /// Literal to insert before.
        marker: String,
    },
    /// Section from `start` to the first `end` after it.
    Bracket {
        /// Literal start marker.
        start: String,
        /// Literal end marker.
        end: String,
        /// Marker inclusion convention.
        boundary: BracketBoundary,
    },
    /// First match of a regular expression, compiled in multi-line mode.
    Pattern {
        /// Pattern source.
        source: String,
        /// Group shown by locate-only; the replaced span is always the
        /// whole match.
        payload: Option<PayloadGroup>,
    },
}

impl LocateStrategy {
    /// `Anchor` strategy.
    #[must_use]
    pub fn anchor(marker: impl Into<String>) -> Self {
        Self::Anchor {
            marker: marker.into(),
        }
    }

    /// `Bracket` strategy keeping both markers.
    #[must_use]
    pub fn bracket(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Bracket {
            start: start.into(),
            end: end.into(),
            boundary: BracketBoundary::Interior,
        }
    }

    /// `Bracket` strategy consuming both markers.
    #[must_use]
    pub fn bracket_inclusive(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Bracket {
            start: start.into(),
            end: end.into(),
            boundary: BracketBoundary::Inclusive,
        }
    }

    /// `Pattern` strategy without a payload group.
    #[must_use]
    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern {
            source: source.into(),
            payload: None,
        }
    }

    /// `Pattern` strategy exposing `group` as its payload.
    #[must_use]
    pub fn pattern_with_payload(source: impl Into<String>, group: PayloadGroup) -> Self {
        Self::Pattern {
            source: source.into(),
            payload: Some(group),
        }
    }

    /// Strategy kind.
    #[must_use]
    pub fn kind(&self) -> RegionKind {
        match self {
            Self::Anchor { .. } => RegionKind::Anchor,
            Self::Bracket { .. } => RegionKind::Bracket,
            Self::Pattern { .. } => RegionKind::Pattern,
        }
    }

    /// Primary needle: the anchor, the start marker, or the pattern source.
    #[must_use]
    pub fn needle(&self) -> &str {
        match self {
            Self::Anchor { marker } => marker,
            Self::Bracket { start, .. } => start,
            Self::Pattern { source, .. } => source,
        }
    }

    /// Check literals and compile the pattern without searching anything.
    ///
    /// # Errors
    /// `SpliceError::InvalidStrategy` describing the first problem found.
    pub fn validate(&self) -> Result<(), SpliceError> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<CompiledStrategy<'_>, SpliceError> {
        match self {
            Self::Anchor { marker } => {
                require_literal("anchor", marker)?;
                Ok(CompiledStrategy::Anchor { marker })
            }
            Self::Bracket {
                start,
                end,
                boundary,
            } => {
                require_literal("start marker", start)?;
                require_literal("end marker", end)?;
                Ok(CompiledStrategy::Bracket {
                    start,
                    end,
                    boundary: *boundary,
                })
            }
            Self::Pattern { source, payload } => {
                if source.is_empty() {
                    return Err(SpliceError::InvalidStrategy(
                        "pattern must not be empty".to_string(),
                    ));
                }
                let regex = build_regex(source).map_err(|e| {
                    SpliceError::InvalidStrategy(format!("pattern {source:?} does not compile: {e}"))
                })?;
                let payload = payload
                    .as_ref()
                    .map(|group| resolve_group(&regex, group).map(|index| (index, group)))
                    .transpose()?;
                Ok(CompiledStrategy::Pattern {
                    source,
                    regex,
                    payload,
                })
            }
        }
    }
}

/// Validated strategy, borrowed from its `LocateStrategy`.
pub(crate) enum CompiledStrategy<'a> {
    Anchor {
        marker: &'a str,
    },
    Bracket {
        start: &'a str,
        end: &'a str,
        boundary: BracketBoundary,
    },
    Pattern {
        source: &'a str,
        regex: Regex,
        payload: Option<(usize, &'a PayloadGroup)>,
    },
}

/// Compile `source` with `^`/`$` matching at line boundaries.
///
/// `.` still stops at `\n`; spans that cross lines must say so (`[\s\S]`).
pub(crate) fn build_regex(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).multi_line(true).build()
}

fn require_literal(what: &str, literal: &str) -> Result<(), SpliceError> {
    if literal.is_empty() {
        return Err(SpliceError::InvalidStrategy(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}

fn resolve_group(regex: &Regex, group: &PayloadGroup) -> Result<usize, SpliceError> {
    let index = match group {
        PayloadGroup::Index(i) => (*i < regex.captures_len()).then_some(*i),
        PayloadGroup::Name(name) => regex
            .capture_names()
            .position(|n| n == Some(name.as_str())),
    };
    index.ok_or_else(|| {
        SpliceError::InvalidStrategy(format!(
            "pattern {:?} has no capture group {group}",
            regex.as_str()
        ))
    })
}
