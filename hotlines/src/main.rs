//! # hotlines - Main Entry Point
//!
//! Loads every source given on the command line, then prints either:
//! - **Per-source rankings** (default): the 50 hottest lines of each snapshot
//! - **Current-file ranking** (`--file <PATH>`): the 30 hottest lines of one
//!   file summed across all enabled snapshots, optionally followed by the
//!   annotated file (`--annotate`)
//!
//! With `--watch`, sources are polled for changes and rebuilt on a background
//! worker; the report is reprinted after every completed rebuild.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::Path;
use std::time::{Duration, SystemTime};

use hotlines::cli::Args;
use hotlines::domain::{DataSource, NormalizedName, SourceDiagnostic};
use hotlines::format::format_duration;
use hotlines::index::{file_loader, ProfileContext, RebuildWorker};
use hotlines::report::{render_annotated_file, render_hot_lines};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Shortest accepted `--interval`
const MIN_WATCH_INTERVAL_MS: u64 = 50;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let msg = err.to_string().to_lowercase();
    if msg.contains("missing required argument") || msg.contains("no enabled source") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();

    let sources = args.data_sources();
    if sources.is_empty() {
        anyhow::bail!(
            "Missing required argument: SOURCE\n\n\
             Usage:\n  \
             hotlines run.json                 Rank the hottest lines\n  \
             hotlines run.json --file app.py   Rank the lines of one file\n\n\
             Run 'hotlines --help' for more options"
        );
    }

    let mut ctx = ProfileContext::new(sources);
    report_diagnostics(ctx.rebuild());

    if !args.quiet {
        println!("hotlines v{}", env!("CARGO_PKG_VERSION"));
        for source in ctx.sources() {
            println!("source: {source}");
        }
    }

    print_report(&ctx, &args)?;

    if args.watch {
        watch(&mut ctx, &args).await?;
    }

    Ok(())
}

/// Print the ranking selected by the arguments against the live index
fn print_report(ctx: &ProfileContext, args: &Args) -> Result<()> {
    let index = ctx.index();
    if index.is_empty() {
        anyhow::bail!("No enabled source to rank (all sources are disabled)");
    }
    let widths = index.widths();

    if let Some(ref file) = args.file {
        let name = NormalizedName::from_path(&file.to_string_lossy());
        let ranked = index.rank_current_file_hot_lines(&name);
        let total: f64 = ranked.iter().map(|e| e.time).sum();

        println!("\n{name}: {} hot lines, {} total", ranked.len(), format_duration(total));
        for line in render_hot_lines(&ranked, widths) {
            println!("  {line}");
        }

        if args.annotate {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!();
            for line in render_annotated_file(&content, &name, &index) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let selected: Vec<usize> = match args.source {
        Some(n) if n < index.len() => vec![n],
        Some(n) => anyhow::bail!("Invalid source index {n}: {} enabled sources", index.len()),
        None => (0..index.len()).collect(),
    };

    for source_index in selected {
        let loaded = &index.sources()[source_index];
        if loaded.snapshot.is_none() {
            println!("\n#{source_index} {}: not loaded", loaded.location);
            continue;
        }
        let ranked = index.rank_hot_lines(source_index);
        println!("\n#{source_index} {}: {} hot lines", loaded.location, ranked.len());
        for line in render_hot_lines(&ranked, widths) {
            println!("  {line}");
        }
    }

    Ok(())
}

fn report_diagnostics(diagnostics: &[SourceDiagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {diagnostic}");
    }
}

/// Poll sources for changes until Ctrl+C, rebuilding off-thread
async fn watch(ctx: &mut ProfileContext, args: &Args) -> Result<()> {
    let worker = RebuildWorker::spawn(file_loader())?;
    let interval = Duration::from_millis(args.interval.max(MIN_WATCH_INTERVAL_MS));
    let mut stamps = modification_times(ctx.sources());

    if !args.quiet {
        println!("\nwatching {} sources every {}ms", stamps.len(), interval.as_millis());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let current = modification_times(ctx.sources());
        if current != stamps {
            info!("profile sources changed, requesting rebuild");
            stamps = current;
            ctx.request_rebuild(&worker)?;
        }

        if let Some(outcome) = worker.try_latest() {
            if ctx.apply(outcome) {
                report_diagnostics(ctx.diagnostics());
                if let Err(e) = print_report(ctx, args) {
                    warn!("{e:#}");
                }
            }
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = &mut ctrl_c => {
                break;
            }
        }
    }

    Ok(())
}

/// Modification time of each enabled source (`None` when unreadable)
fn modification_times(sources: &[DataSource]) -> Vec<Option<SystemTime>> {
    sources
        .iter()
        .filter(|s| s.enabled)
        .map(|s| Path::new(&s.location).metadata().and_then(|m| m.modified()).ok())
        .collect()
}
