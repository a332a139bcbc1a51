//! # Invoice CLI
//!
//! Generates a PDF invoice from form values.
//!
//! ```text
//! invoice-cli [FORM.json] [--output-dir DIR] [--currency CODE]
//!             [--footer TEXT] [--always-show-tax-lines]
//! ```

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use invoice_cli::app::{load_form, prepare_invoice, totals_summary, write_invoice, SUCCESS_MESSAGE};
use invoice_cli::{Args, CliConfig, CliResult};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Invoice generation failed");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CliResult<()> {
    let config = CliConfig::load()?.with_overrides(args)?;
    info!(
        output_dir = %config.output_dir.display(),
        currency = %config.currency_code,
        "Configuration loaded"
    );

    let form = load_form(args.input.as_deref())?;
    let invoice = prepare_invoice(form, Local::now().date_naive())?;

    let totals = invoice.try_totals()?;
    println!("{}", totals_summary(&totals, &config.currency_code));

    let path = write_invoice(&invoice, &config)?;
    println!("{SUCCESS_MESSAGE}");
    println!("{}", path.display());

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the summary and result.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,invoice=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
