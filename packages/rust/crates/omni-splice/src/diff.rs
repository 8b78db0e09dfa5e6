//! Diff generation utilities.
//!
//! Unified diff of a splice for the success report, using the `similar` crate.

use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

/// Generate a unified diff between two strings.
///
/// # Arguments
/// * `original` - The original content
/// * `modified` - The modified content
/// * `label` - File name shown in the `---`/`+++` header
///
/// # Returns
/// Header, `@@` hunk headers, then lines prefixed with `+`, `-` or ` `.
/// Empty when the contents are equal.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str, label: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let groups = diff.grouped_ops(3);
    if groups.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    let _ = writeln!(output, "--- a/{label}");
    let _ = writeln!(output, "+++ b/{label}");

    for group in &groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old = first.old_range().start..last.old_range().end;
        let new = first.new_range().start..last.new_range().end;
        let _ = writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            old.start + 1,
            old.len(),
            new.start + 1,
            new.len()
        );

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                output.push(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}
