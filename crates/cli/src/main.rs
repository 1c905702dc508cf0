// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rf - Robot factory pipeline
//!
//! Runs the five-robot pipeline once and exits when the part is finished.
//! Ctrl-C interrupts every robot and exits cleanly.

use anyhow::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "rf",
    version,
    about = "Robot factory - five concurrent robots assembling one part"
)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let _log_guard = setup_logging();

    let handle = rf_engine::start();

    let shutdown = handle.shutdown_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, shutting down...");
            shutdown.trigger();
        }
    });

    let report = handle.join().await?;
    if report.completed() {
        info!(
            fuel_left = report.fuel_left,
            basic_construction = report.basic_construction,
            firmware = report.firmware,
            "part finished"
        );
    } else {
        info!("pipeline interrupted before the part was finished");
    }

    Ok(())
}

/// Log to stdout through a background writer so robots never wait on the
/// terminal.
fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(non_blocking))
        .init();

    guard
}
