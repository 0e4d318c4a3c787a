use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::ParseError;
use crate::models::{Status, Validation};

/// A flat record describing the validation of one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Position of the frame in its input, starting at 0.
    pub index: u64,
    /// The capture timestamp in microseconds (0 if unknown).
    pub capture_timestamp: u64,
    pub src_addr: Option<Ipv4Addr>,
    pub dst_addr: Option<Ipv4Addr>,
    pub ip_header_length: Option<usize>,
    pub total_length: Option<usize>,
    #[serde(serialize_with = "serialize_checksum")]
    pub embedded_checksum: Option<u16>,
    #[serde(serialize_with = "serialize_checksum")]
    pub computed_checksum: Option<u16>,
    pub status: Status,
    /// Reason of the parse failure, if any.
    pub error: Option<String>,
}

impl Report {
    pub fn new(
        index: u64,
        capture_timestamp: Duration,
        result: &Result<Validation, ParseError>,
    ) -> Self {
        let capture_timestamp = capture_timestamp.as_micros() as u64;
        match result {
            Ok(validation) => Report {
                index,
                capture_timestamp,
                src_addr: Some(validation.source),
                dst_addr: Some(validation.destination),
                ip_header_length: Some(validation.ip_header_length),
                total_length: Some(validation.total_length),
                embedded_checksum: Some(validation.outcome.embedded()),
                computed_checksum: Some(validation.outcome.computed()),
                status: validation.outcome.status(),
                error: None,
            },
            // No partial results for frames that cannot be decoded.
            Err(error) => Report {
                index,
                capture_timestamp,
                src_addr: None,
                dst_addr: None,
                ip_header_length: None,
                total_length: None,
                embedded_checksum: None,
                computed_checksum: None,
                status: Status::ParseFailure,
                error: Some(error.to_string()),
            },
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame={} status={}", self.index, self.status)?;
        if let (Some(src_addr), Some(dst_addr)) = (self.src_addr, self.dst_addr) {
            write!(f, " src_addr={} dst_addr={}", src_addr, dst_addr)?;
        }
        if let (Some(embedded), Some(computed)) =
            (self.embedded_checksum, self.computed_checksum)
        {
            write!(f, " embedded={:#06x} computed={:#06x}", embedded, computed)?;
        }
        if let Some(error) = &self.error {
            write!(f, " error=\"{}\"", error)?;
        }
        Ok(())
    }
}

/// Write checksums in hexadecimal, as they are usually shown by packet dissectors.
fn serialize_checksum<S>(value: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(checksum) => serializer.serialize_str(&format!("{:#06x}", checksum)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::time::Duration;

    use crate::error::ParseError;
    use crate::models::{Outcome, Report, Status, Validation};

    fn validation() -> Validation {
        Validation {
            ip_header_length: 20,
            total_length: 59,
            tcp_length: 39,
            source: Ipv4Addr::new(10, 0, 2, 15),
            destination: Ipv4Addr::new(10, 0, 2, 2),
            outcome: Outcome::new(0x582c, 0xee4e),
        }
    }

    #[test]
    fn test_report_from_validation() {
        let report = Report::new(3, Duration::from_millis(1500), &Ok(validation()));
        assert_eq!(report.index, 3);
        assert_eq!(report.capture_timestamp, 1_500_000);
        assert_eq!(report.status, Status::Mismatch);
        assert_eq!(report.embedded_checksum, Some(0xee4e));
        assert_eq!(report.computed_checksum, Some(0x582c));
        assert_eq!(
            report.to_string(),
            "frame=3 status=mismatch src_addr=10.0.2.15 dst_addr=10.0.2.2 embedded=0xee4e computed=0x582c"
        );
    }

    #[test]
    fn test_report_from_error() {
        let error = ParseError::FrameTooShort {
            length: 10,
            minimum: 34,
        };
        let report = Report::new(0, Duration::default(), &Err(error));
        assert_eq!(report.status, Status::ParseFailure);
        assert_eq!(report.computed_checksum, None);
        assert_eq!(
            report.error.as_deref(),
            Some("frame too short: 10 bytes, need at least 34")
        );
    }

    #[test]
    fn test_report_csv() {
        let mut output = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(true)
                .from_writer(&mut output);
            writer
                .serialize(Report::new(0, Duration::default(), &Ok(validation())))
                .unwrap();
            writer.flush().unwrap();
        }
        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "index,capture_timestamp,src_addr,dst_addr,ip_header_length,total_length,embedded_checksum,computed_checksum,status,error\n\
             0,0,10.0.2.15,10.0.2.2,20,59,0xee4e,0x582c,mismatch,\n"
        );
    }
}
