mod encode;
mod exit;
mod logging;

use std::path::PathBuf;

use clap::Parser;

use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "kimtape",
    version,
    about = "Convert binary files to KIM-1 paper tape records"
)]
struct Cli {
    /// Input binary file.
    input: PathBuf,

    /// Starting address in hex, with or without a 0x prefix. Default: 200.
    #[arg(value_name = "START_ADDRESS")]
    start_address: Option<String>,

    /// Write records to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Append the end-of-transmission summary record.
    #[arg(long)]
    terminator: bool,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match encode::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
