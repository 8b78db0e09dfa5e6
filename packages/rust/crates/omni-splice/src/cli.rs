use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use omni_splice::{
    BracketBoundary, DEFAULT_EXCERPT_HEAD, DEFAULT_EXCERPT_TAIL, DEFAULT_MAX_FILE_SIZE,
    LocateStrategy, MatchPolicy, PayloadGroup, SpliceConfig, SpliceError,
};

#[derive(Parser, Debug)]
#[command(name = "omni-splice")]
#[command(author, version, about = "Locate a region in a text file and insert, print or replace it.")]
pub(crate) struct Cli {
    /// Debug logs on stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Print the report as JSON.
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// Take the leftmost candidate instead of failing when a needle occurs more than once.
    #[arg(long, global = true)]
    pub(crate) first_match: bool,

    /// Maximum size of source and payload files, in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub(crate) max_file_size: u64,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    pub(crate) fn config(&self) -> SpliceConfig {
        SpliceConfig {
            max_file_size: self.max_file_size,
            policy: if self.first_match {
                MatchPolicy::FirstMatch
            } else {
                MatchPolicy::Unique
            },
            ..SpliceConfig::default()
        }
    }
}

/// Source, payload and destination of a write operation.
#[derive(Args, Debug)]
pub(crate) struct WriteArgs {
    /// File to patch.
    #[arg(long)]
    pub(crate) source: PathBuf,

    /// File holding the text to insert.
    #[arg(long)]
    pub(crate) payload: PathBuf,

    /// Write the result here instead of over the source.
    #[arg(long)]
    pub(crate) dest: Option<PathBuf>,

    /// Append a unified diff to the report.
    #[arg(long)]
    pub(crate) diff: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Insert the payload immediately before an anchor.
    Insert {
        /// Literal to insert before.
        #[arg(long)]
        anchor: String,

        /// Insert before the anchor (the only position; accepted for explicitness).
        #[arg(long)]
        before: bool,

        #[command(flatten)]
        files: WriteArgs,
    },
    /// Print a located region without writing anything.
    Locate {
        /// Literal anchor.
        #[arg(long, conflicts_with_all = ["start", "end", "pattern"])]
        anchor: Option<String>,

        /// Literal start marker.
        #[arg(long, requires = "end", conflicts_with = "pattern")]
        start: Option<String>,

        /// Literal end marker.
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Regular expression (multi-line: `^`/`$` match at line boundaries).
        #[arg(long)]
        pattern: Option<String>,

        /// Capture group (index or name) to report as the payload.
        #[arg(long, requires = "pattern")]
        group: Option<String>,

        /// Report the full marker span instead of the lines between markers.
        #[arg(long, requires = "start")]
        include_markers: bool,

        /// File to search.
        #[arg(long)]
        source: PathBuf,

        /// Leading chars of the region to print.
        #[arg(long, default_value_t = DEFAULT_EXCERPT_HEAD)]
        head: usize,

        /// Trailing chars of the region to print.
        #[arg(long, default_value_t = DEFAULT_EXCERPT_TAIL)]
        tail: usize,
    },
    /// Replace a bracketed section or a pattern match with the payload.
    Replace {
        /// Literal start marker.
        #[arg(long, requires = "end", conflicts_with = "pattern")]
        start: Option<String>,

        /// Literal end marker.
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Consume the markers too; the payload must carry them to keep them.
        #[arg(long, requires = "start")]
        include_markers: bool,

        /// Regular expression; the whole first match is replaced.
        #[arg(long)]
        pattern: Option<String>,

        /// Simpler pattern probed when `--pattern` does not match, to tell
        /// "declaration present" from "absent".
        #[arg(long, requires = "pattern")]
        fallback_pattern: Option<String>,

        #[command(flatten)]
        files: WriteArgs,
    },
}

/// Resolve the mutually exclusive target flags into a strategy.
pub(crate) fn resolve_target(
    anchor: Option<String>,
    start: Option<String>,
    end: Option<String>,
    pattern: Option<String>,
    group: Option<String>,
    include_markers: bool,
) -> Result<LocateStrategy, SpliceError> {
    let boundary = if include_markers {
        BracketBoundary::Inclusive
    } else {
        BracketBoundary::Interior
    };

    match (anchor, start, end, pattern) {
        (Some(marker), None, None, None) => Ok(LocateStrategy::anchor(marker)),
        (None, Some(start), Some(end), None) => Ok(LocateStrategy::Bracket {
            start,
            end,
            boundary,
        }),
        (None, None, None, Some(source)) => Ok(LocateStrategy::Pattern {
            source,
            payload: group.map(|g| g.parse::<PayloadGroup>()).transpose()?,
        }),
        _ => Err(SpliceError::InvalidStrategy(
            "give exactly one of --anchor, --start/--end or --pattern".to_string(),
        )),
    }
}
