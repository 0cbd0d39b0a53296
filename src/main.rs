//! Hriday: cardiovascular risk assessment client
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hriday::adapters::sanitize::SanitizingMakeWriter;
use hriday::config::{ClientConfig, LogMode};
use hriday::tui::App;

fn main() -> Result<()> {
    let config = ClientConfig::from_env();

    // Initialize logging.
    //
    // Writing logs to the terminal corrupts the TUI (alternate screen), so an
    // interactive session logs to a file unless told otherwise.
    let use_file = match config.log_mode {
        LogMode::File => true,
        LogMode::Stdout => false,
        LogMode::Auto => std::io::stdout().is_terminal(),
    };

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    config.report_warnings();

    tracing::info!(
        endpoint = %config.predict_url(),
        min_display_ms = config.min_display.as_millis() as u64,
        "Starting Hriday..."
    );

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Hriday shutdown complete.");

    Ok(())
}
