//! `analyze-trades <input.xml>`
//!
//! Reads `<Trade>` elements, classifies each correlation group and writes
//! `results.csv`. Progress is appended to `server.log`.

use std::process::ExitCode;

use clap::error::ErrorKind;
use tracing::{error, info};
use trade_cli::{failure_kind, init_logging, parse_args, run, usage_error, RunOptions};
use trade_core::config::LoggingConfig;
use trade_core::TracingDiagnostics;

fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _guard = init_logging(&LoggingConfig::default()).ok();
            error!("{}", usage_error(&err));
            info!("Usage: analyze-trades <input.xml>");
            if let Err(print_err) = err.print() {
                error!("failed to print usage: {}", print_err);
            }
            return ExitCode::from(2);
        }
    };

    let options = match RunOptions::from_args(&args) {
        Ok(options) => options,
        Err(err) => {
            let _guard = init_logging(&LoggingConfig::default()).ok();
            error!("{}: {}", err.kind(), err);
            error!("--ending unsuccessfully--");
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&options.config.logging) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: file logging disabled: {:#}", err);
            None
        }
    };

    info!(input = %options.input.display(), "Starting trade analysis");
    match run(&options, &TracingDiagnostics) {
        Ok(summary) => {
            let stats = &summary.stats;
            info!(
                trades = stats.total_trades,
                groups = stats.groups,
                accepted = stats.accepted,
                pending = stats.pending,
                rejected = stats.rejected,
                output = %summary.output.display(),
                "Run complete"
            );
            info!("--finished successfully--");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match failure_kind(&err) {
                "UnexpectedError" => error!("Unknown error ... {:?}", err),
                kind => error!("{}: {:#}", kind, err),
            }
            error!("--ending unsuccessfully--");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
