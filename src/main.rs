//! Surebet Solver — Entry Point
//!
//! Loads the starting position from config.toml, runs one recompute
//! pass with no field under edit, and prints the result.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (env filter, configured level as fallback)
//! 3. Build the position and open a session
//! 4. Run one recompute pass
//! 5. Render as table or JSON per [display] format

use anyhow::{Context, Result};
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use config::OutputFormat;
use ports::focus::NoFocus;
use usecases::session::Session;

fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&path).context("Failed to load configuration")?;

    // ── 2. Initialize logging (stderr, stdout carries the result) ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        rows = config.position.rows.len(),
        bankroll = config.position.bankroll,
        fixed = ?config.position.fixed,
        "Starting surebet solver"
    );

    // ── 3. Build the position and open a session ────────────
    let position = config.position.to_position();
    let mut session = Session::new(position);

    // ── 4. One recompute pass, nothing under edit ────────────
    let output = session.recompute(&NoFocus);

    // ── 5. Render the result ─────────────────────────────────
    match config.display.format {
        OutputFormat::Table => {
            print!(
                "{}",
                adapters::console::render_table(session.position(), &output)
            );
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to encode output as JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
