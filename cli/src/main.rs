//! CLI for Coresift
//!
//! Post-mortem triage of a frozen process image: reconstructs the population
//! of lightweight scheduled tasks from a snapshot/executable pair and slices
//! it down to the tasks relevant to a hang or crash investigation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coresift_engine::{backend, run_triage, Criteria};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod output;

#[derive(Parser, Debug)]
#[command(name = "coresift")]
#[command(about = "Post-mortem triage for frozen task populations", long_about = None)]
#[command(version)]
struct Args {
    /// Executable the snapshot was captured from
    executable: PathBuf,

    /// Snapshot (core image) to inspect
    core_dump: PathBuf,

    /// Resolve and print variables for retained frames
    #[arg(long)]
    show_variables: bool,

    /// Inspect only the task with this identity (0 = all)
    #[arg(long, default_value = "0")]
    id: i64,

    /// Inspect only the frame at this ordinal (0 = all)
    #[arg(long, default_value = "0")]
    frame: usize,

    /// Variable tree depth budget
    #[arg(long, default_value = "5")]
    depth: i64,

    /// Print only variables whose name contains this
    #[arg(long, default_value = "")]
    variable: String,

    /// Path expression evaluated against each matched variable
    #[arg(long)]
    expr: Option<String>,

    /// Keep only frames whose function name contains this
    #[arg(long, default_value = "")]
    frame_filter: String,

    /// Keep only tasks with a frame whose function name contains this
    #[arg(long, default_value = "")]
    filter: String,

    /// Print at most this many tasks (0 = unlimited)
    #[arg(long, default_value = "0")]
    limit: i64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let criteria = Criteria {
        id: args.id,
        stack_filter: args.filter,
        frame_filter: args.frame_filter,
        frame: args.frame,
        variable: args.variable,
        expr: args.expr,
        depth: args.depth,
        limit: args.limit,
        show_variables: args.show_variables,
    };

    let snapshot = backend::open_snapshot(&args.core_dump, &args.executable)
        .context("failed to open snapshot")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_triage(snapshot.as_ref(), &criteria, &mut out)
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
