//! Headless Tetros runner (default binary).
//!
//! Plays random input against the engine at a fixed 60 Hz step. With `--sync`
//! every notification is written to stdout as a JSON line; logs go to stderr.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

use tetros::demo::{parse_demo_args, run_demo};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_demo_args(&args)?;

    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(level)
        .init();

    let summary = run_demo(&args)?;
    eprintln!(
        "frames={} games={} best_score={} high_score={}",
        summary.frames, summary.games, summary.best_score, summary.high_score
    );
    Ok(())
}
