//! High-level interface for validating captured frames.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tcpcheck::easy::{check, Config};
//!
//! let config = Config {
//!     input_file: Some(PathBuf::from("capture.pcap")),
//!     ..Config::default()
//! };
//! let statistics = check(config).unwrap();
//!
//! println!("{}", statistics);
//! ```
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use strum::{Display, EnumString};

use crate::models::{Report, Status};
use crate::reader::{read_hex, read_pcap, CapturedFrame};
use crate::utilities::get_extension;
use crate::validator::{validate, validate_strict};

/// Format of the input file.
#[derive(Copy, Clone, Debug, Display, EnumString, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// Guess from the file extension.
    Auto,
    /// One hex-encoded frame per line.
    Hex,
    /// A pcap capture file with Ethernet link type.
    Pcap,
}

impl InputFormat {
    /// Resolve `Auto` using the extension of `path`.
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => match get_extension(path).as_str() {
                "pcap" | "pcapng" | "cap" => InputFormat::Pcap,
                _ => InputFormat::Hex,
            },
            other => other,
        }
    }
}

/// Validation configuration.
pub struct Config {
    /// File containing the frames to validate (hex from stdin if not set).
    pub input_file: Option<PathBuf>,
    /// Format of the input file.
    pub input_format: InputFormat,
    /// File to which the reports will be written (stdout if not set).
    pub output_file_csv: Option<PathBuf>,
    /// Reject frames that are not Ethernet/IPv4/TCP.
    pub strict: bool,
    /// Write only the reports of frames that did not match.
    pub only_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: None,
            input_format: InputFormat::Auto,
            output_file_csv: None,
            strict: false,
            only_failures: false,
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "input_file={:?}", self.input_file)?;
        write!(f, " input_format={}", self.input_format)?;
        write!(f, " output_file_csv={:?}", self.output_file_csv)?;
        write!(f, " strict={:?}", self.strict)?;
        write!(f, " only_failures={:?}", self.only_failures)
    }
}

/// Counters over a set of validated frames.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ValidationStatistics {
    pub frames: u64,
    pub matches: u64,
    pub mismatches: u64,
    pub parse_failures: u64,
}

impl ValidationStatistics {
    fn record(&mut self, status: Status) {
        self.frames += 1;
        match status {
            Status::Match => self.matches += 1,
            Status::Mismatch => self.mismatches += 1,
            Status::ParseFailure => self.parse_failures += 1,
        }
    }
}

impl Display for ValidationStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "frames={}", self.frames)?;
        write!(f, " matches={}", self.matches)?;
        write!(f, " mismatches={}", self.mismatches)?;
        write!(f, " parse_failures={}", self.parse_failures)
    }
}

/// Read, validate and report the frames described by `config`.
pub fn check(config: Config) -> Result<ValidationStatistics> {
    info!("{}", config);

    let frames = match &config.input_file {
        None => {
            info!("Reading hex frames from stdin, press CTRL+D to stop...");
            read_hex(stdin().lock())?
        }
        Some(path) => match config.input_format.resolve(path) {
            InputFormat::Pcap => read_pcap(path)?,
            _ => {
                let file = File::open(path)
                    .with_context(|| format!("Cannot open input file {}", path.display()))?;
                read_hex(BufReader::new(file))?
            }
        },
    };

    let output: Box<dyn Write> = match &config.output_file_csv {
        None => Box::new(stdout().lock()),
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Cannot create output file {}", path.display()))?,
        ),
    };

    let statistics = check_frames(&frames, config.strict, config.only_failures, output)?;
    info!("{}", statistics);
    Ok(statistics)
}

/// Validate `frames` and write one CSV report per frame to `output`.
pub fn check_frames<W: Write>(
    frames: &[CapturedFrame],
    strict: bool,
    only_failures: bool,
    output: W,
) -> Result<ValidationStatistics> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(output);
    let mut statistics = ValidationStatistics::default();

    for (index, frame) in frames.iter().enumerate() {
        let result = if strict {
            validate_strict(&frame.data)
        } else {
            validate(&frame.data)
        };
        let report = Report::new(index as u64, frame.timestamp, &result);
        match report.status {
            Status::Match => debug!("{}", report),
            Status::Mismatch | Status::ParseFailure => warn!("{}", report),
        }
        statistics.record(report.status);
        if !only_failures || report.status != Status::Match {
            writer.serialize(&report)?;
        }
    }

    writer.flush()?;
    Ok(statistics)
}
