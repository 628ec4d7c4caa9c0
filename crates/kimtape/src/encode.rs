use std::fs::File;
use std::io::{self, BufWriter};

use kimtape_record::{Encoder, EncoderConfig, Terminator, DEFAULT_START_ADDRESS};
use tracing::info;

use crate::exit::{io_error, tape_error, CliError, CliResult, SUCCESS, USAGE};
use crate::Cli;

pub fn run(args: Cli) -> CliResult<i32> {
    let start_address = match args.start_address.as_deref() {
        Some(text) => parse_start_address(text)?,
        None => DEFAULT_START_ADDRESS,
    };

    let input = File::open(&args.input)
        .map_err(|err| io_error(&format!("failed opening {}", args.input.display()), err))?;

    let encoder = Encoder::with_config(EncoderConfig {
        start_address,
        terminator: if args.terminator {
            Terminator::Emit
        } else {
            Terminator::Omit
        },
    });

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            encoder
                .encode_to(input, BufWriter::new(file))
                .map_err(|err| tape_error("encode failed", err))?
        }
        None => {
            let stdout = io::stdout();
            encoder
                .encode_to(input, stdout.lock())
                .map_err(|err| tape_error("encode failed", err))?
        }
    };

    info!(
        records = summary.records,
        data_bytes = summary.data_bytes,
        start_address,
        "encode complete"
    );
    Ok(SUCCESS)
}

fn parse_start_address(input: &str) -> CliResult<u16> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(CliError::new(USAGE, "start address must not be empty"));
    }

    u16::from_str_radix(digits, 16).map_err(|_| {
        CliError::new(
            USAGE,
            format!("invalid start address: {trimmed} (expected hex in 0..=FFFF)"),
        )
    })
}
