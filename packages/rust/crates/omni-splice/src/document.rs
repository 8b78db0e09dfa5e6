//! Immutable text document.

use std::fmt;
use std::sync::Arc;

use crate::types::Span;

/// A full file's text at the moment it was read.
///
/// Cloning is cheap and never copies the text. There is no mutating API:
/// edits always produce a new `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: Arc<str>,
}

impl Document {
    /// Wrap decoded text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into()),
        }
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in Unicode scalar values.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// 1-indexed line and column (in chars) of a byte offset.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let before = &self.text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Text covered by `span`.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }

    /// Derive a new document with `span` replaced by `replacement`.
    pub(crate) fn splice(&self, span: Span, replacement: &str) -> Self {
        let mut text = String::with_capacity(self.text.len() - span.len() + replacement.len());
        text.push_str(&self.text[..span.start]);
        text.push_str(replacement);
        text.push_str(&self.text[span.end..]);
        Self::new(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Number of lines in `text`; an unterminated tail counts as a line.
#[must_use]
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}
