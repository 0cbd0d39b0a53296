//! Headless prediction: submit one form to the scoring service and print the result.
//!
//! Every field starts at its default; `name=value` arguments override it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hriday_predict -- [--url <base>] [--no-validate] age=54 ap_hi=150 smoke=1
//! ```
//!
//! The base URL otherwise comes from `HRIDAY_API_URL`. Exit status is 0 on a
//! result, 1 on a failed request and 2 on bad arguments or an invalid form.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hriday::adapters::sanitize::SanitizingMakeWriter;
use hriday::adapters::HttpScoringClient;
use hriday::application::{Lifecycle, PredictionOrchestrator, Session, SubmitError};
use hriday::domain::list_fields;
use hriday::{ClientConfig, HridayError};

const USAGE: &str = "Usage: hriday_predict [--url <base>] [--no-validate] [name=value ...]";

fn print_fields() {
    eprintln!("Fields:");
    for field in list_fields() {
        eprintln!(
            "  {:<12} {:<20} {}",
            field.name,
            field.label,
            field.domain_hint()
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(SanitizingMakeWriter::new(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    config.report_warnings();
    // Everything settles as soon as the service answers; there is no screen to hold.
    config.min_display = std::time::Duration::ZERO;

    let mut overrides: Vec<(String, String)> = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => {
                let url = args.next().unwrap_or_default();
                if url.is_empty() {
                    eprintln!("{USAGE}");
                    return ExitCode::from(2);
                }
                config.api_url = url.trim_end_matches('/').to_string();
            }
            "--no-validate" => config.validate_before_submit = false,
            "-h" | "--help" => {
                eprintln!("{USAGE}");
                print_fields();
                return ExitCode::SUCCESS;
            }
            other => match other.split_once('=') {
                Some((name, value)) => overrides.push((name.to_string(), value.to_string())),
                None => {
                    eprintln!("Unrecognized argument: {other}");
                    eprintln!("{USAGE}");
                    return ExitCode::from(2);
                }
            },
        }
    }

    match run(&config, &overrides) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            if let HridayError::Submit(SubmitError::Invalid(errors)) = &e {
                for err in errors {
                    eprintln!("  {err}");
                }
            }
            ExitCode::from(2)
        }
    }
}

fn run(config: &ClientConfig, overrides: &[(String, String)]) -> hriday::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let service = Arc::new(HttpScoringClient::new(config));
    let orchestrator =
        PredictionOrchestrator::new(service, runtime.handle().clone(), config.min_display);
    let mut session = Session::new(orchestrator, config.validate_before_submit);

    for (name, value) in overrides {
        session.update(name, value.as_str())?;
    }

    session.submit()?;

    let code = match runtime.block_on(session.wait()) {
        Lifecycle::Succeeded {
            display, result, ..
        } => {
            println!("{}", display.headline());
            println!("Cardiovascular Disease Probability: {}%", display.percentage_label);
            println!("Risk tier: {}", display.severity_tier);
            tracing::debug!(probability = result.probability, "Raw probability");
            ExitCode::SUCCESS
        }
        Lifecycle::Failed { reason } => {
            eprintln!("{}", reason.notice());
            tracing::warn!(?reason, "Prediction failed");
            ExitCode::FAILURE
        }
        other => {
            eprintln!("Request did not settle: {}", other.phase());
            ExitCode::FAILURE
        }
    };

    Ok(code)
}
