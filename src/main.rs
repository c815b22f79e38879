//! Shooting Report - NYPD Shooting Incident Data count charts
//!
//! Loads the incident extract, cleans it, and renders the fixed set of count
//! charts to a multi-page deck plus one standalone image.

mod charts;
mod config;
mod data;
mod pipeline;
mod ppt;

use config::ReportConfig;
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let config = ReportConfig::default();
    info!(input = %config.input_path.display(), "Starting report");

    let summary = pipeline::run(&config)?;

    info!(
        rows = summary.rows,
        pages = summary.deck_pages,
        deck = %summary.deck_path.display(),
        image = %summary.image_path.display(),
        "Report complete"
    );
    Ok(())
}
