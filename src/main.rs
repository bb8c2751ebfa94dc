// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitSense connector host
//!
//! Three commands:
//! - `discover` prints the stream catalog
//! - `sync` runs one cycle, writing records to stdout as JSON lines and
//!   persisting bookmarks to a state file
//! - `check` confirms the API is reachable

use clap::{Parser, Subcommand};
use fitsense_connector::{
    config::Config, models::SyncState, services::JsonLinesSink, Connector,
};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "fitsense-connector",
    version,
    about = "Incremental sync of FitSense fitness data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stream catalog as JSON
    Discover,
    /// Sync streams and write records to stdout as JSON lines
    Sync {
        #[arg(long, help = "State file holding bookmarks; updated after the run")]
        state: Option<PathBuf>,

        #[arg(
            long = "stream",
            help = "Only sync this stream (repeatable, defaults to all)"
        )]
        streams: Vec<String>,
    },
    /// Check that the FitSense API is reachable
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries records
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting FitSense connector"
    );

    let connector = Connector::from_config(&config)?;

    match cli.command {
        Command::Discover => {
            let catalog = serde_json::to_string_pretty(&connector.discover())?;
            println!("{catalog}");
        }
        Command::Sync {
            state: state_path,
            streams,
        } => {
            let mut state = match &state_path {
                Some(path) => SyncState::load(path)?,
                None => SyncState::default(),
            };

            let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout()));
            let result = if streams.is_empty() {
                connector.run(&mut state, &mut sink).await
            } else {
                connector.run_streams(&streams, &mut state, &mut sink).await
            };

            // Bookmarks of streams that completed are kept even if a later one failed
            if let Some(path) = &state_path {
                state.save(path)?;
            }

            let summary = result?;
            tracing::info!(
                streams = summary.streams.len(),
                records = summary.total_records(),
                "Sync complete"
            );
        }
        Command::Check => {
            let rows = connector.check().await?;
            tracing::info!(rows, "FitSense API reachable");
        }
    }

    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fitsense_connector=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
