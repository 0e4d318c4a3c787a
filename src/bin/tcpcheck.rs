//! Validate the TCP checksums of captured Ethernet/IPv4 frames.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use tcpcheck::easy::{check, Config, InputFormat};
use tcpcheck::utilities::configure_logger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File containing the frames to validate (hex frames from stdin if not set).
    input_file: Option<PathBuf>,
    /// Format of the input file.
    #[arg(short = 'f', long, default_value_t = InputFormat::Auto)]
    format: InputFormat,
    /// File to which the CSV reports will be written.
    #[arg(short = 'o', long)]
    output_file_csv: Option<PathBuf>,
    /// Minimum log level.
    #[arg(short = 'L', long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
    /// Reject frames that are not Ethernet/IPv4/TCP.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Only report frames whose checksum does not match.
    #[arg(long, default_value_t = false)]
    only_failures: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    configure_logger(args.log_level);

    let config = Config {
        input_file: args.input_file,
        input_format: args.format,
        output_file_csv: args.output_file_csv,
        strict: args.strict,
        only_failures: args.only_failures,
    };

    let statistics = check(config)?;
    if statistics.mismatches > 0 || statistics.parse_failures > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
