//! omni-splice CLI: insert, locate or replace a region of a text file.
//!
//! Reports go to stdout (plain text, or JSON with `--json`); logs go to stderr.
//! Set `RUST_LOG=omni_splice=debug` (or pass `--verbose`) to trace the engine.
//!
//! Exit codes: 0 success, 1 region not found or ambiguous, 2 invalid
//! strategy, 3 I/O failure.

mod cli;

use std::fmt::Display;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use omni_splice::{
    FailureReport, LocateRequest, LocateStrategy, Operation, SpliceRequest, run_locate, run_splice,
};

use crate::cli::{Cli, Command, resolve_target};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warn
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_splice=debug,omni_io=debug"
        } else {
            "omni_splice=warn,omni_io=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.config();
    let json = cli.json;

    match cli.command {
        Command::Insert {
            anchor,
            before: _,
            files,
        } => {
            let request = SpliceRequest {
                operation: Operation::Insert,
                source: files.source,
                payload: files.payload,
                destination: files.dest,
                strategy: LocateStrategy::anchor(anchor),
                fallback: None,
                with_diff: files.diff,
            };
            finish(run_splice(&request, &config), json)
        }
        Command::Locate {
            anchor,
            start,
            end,
            pattern,
            group,
            include_markers,
            source,
            head,
            tail,
        } => {
            let strategy = match resolve_target(anchor, start, end, pattern, group, include_markers) {
                Ok(strategy) => strategy,
                Err(e) => return finish::<omni_splice::LocateReport>(
                    Err(FailureReport::new(Operation::Locate, &source, e, None)),
                    json,
                ),
            };
            let request = LocateRequest {
                source,
                strategy,
                head,
                tail,
            };
            finish(run_locate(&request, &config), json)
        }
        Command::Replace {
            start,
            end,
            include_markers,
            pattern,
            fallback_pattern,
            files,
        } => {
            let strategy = match resolve_target(None, start, end, pattern, None, include_markers) {
                Ok(strategy) => strategy,
                Err(e) => return finish::<omni_splice::SpliceReport>(
                    Err(FailureReport::new(Operation::Replace, &files.source, e, None)),
                    json,
                ),
            };
            let request = SpliceRequest {
                operation: Operation::Replace,
                source: files.source,
                payload: files.payload,
                destination: files.dest,
                strategy,
                fallback: fallback_pattern.map(LocateStrategy::pattern),
                with_diff: files.diff,
            };
            finish(run_splice(&request, &config), json)
        }
    }
}

fn finish<T: Serialize + Display>(
    result: Result<T, FailureReport>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match result {
        Ok(report) => {
            emit(&report, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            emit(&failure, json)?;
            Ok(ExitCode::from(failure.exit_code))
        }
    }
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> anyhow::Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{rendered}");
    } else {
        print!("{report}");
    }
    Ok(())
}
