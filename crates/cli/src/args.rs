//! Command-line arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use trade_core::Error;

/// Classify correlated trades from an XML file and write the verdicts as CSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "analyze-trades", version)]
pub struct Args {
    /// Input XML file containing <Trade> elements.
    pub input: PathBuf,

    /// JSON configuration file. Missing sections use defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report path, overriding output.path from the configuration.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Parse an argument vector, program name first.
pub fn parse_args<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv)
}

/// Convert a clap failure into the crate's usage error, keeping clap's
/// first message line.
pub fn usage_error(err: &clap::Error) -> Error {
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .map(|line| line.trim_start_matches("error:").trim())
        .find(|line| !line.is_empty())
        .unwrap_or("invalid arguments");
    Error::usage(message)
}
