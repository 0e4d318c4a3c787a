use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Result of comparing the recomputed checksum with the embedded one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The embedded checksum is correct.
    Match { checksum: u16 },
    /// The embedded checksum differs from the recomputed one.
    Mismatch { computed: u16, embedded: u16 },
}

impl Outcome {
    /// Classify a computed checksum against the embedded one.
    pub fn new(computed: u16, embedded: u16) -> Self {
        if computed == embedded {
            Outcome::Match { checksum: computed }
        } else {
            Outcome::Mismatch { computed, embedded }
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match { .. })
    }

    pub fn computed(&self) -> u16 {
        match *self {
            Outcome::Match { checksum } => checksum,
            Outcome::Mismatch { computed, .. } => computed,
        }
    }

    pub fn embedded(&self) -> u16 {
        match *self {
            Outcome::Match { checksum } => checksum,
            Outcome::Mismatch { embedded, .. } => embedded,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Outcome::Match { .. } => Status::Match,
            Outcome::Mismatch { .. } => Status::Mismatch,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Match { checksum } => write!(f, "match checksum={:#06x}", checksum),
            Outcome::Mismatch { computed, embedded } => write!(
                f,
                "mismatch computed={:#06x} embedded={:#06x}",
                computed, embedded
            ),
        }
    }
}

/// Classification of a frame, including frames that could not be decoded.
#[derive(
    Copy, Clone, Debug, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Match,
    Mismatch,
    ParseFailure,
}

/// A successfully decoded frame and its checksum outcome.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Validation {
    /// The IPv4 header length in bytes.
    pub ip_header_length: usize,
    /// The IPv4 total length in bytes.
    pub total_length: usize,
    /// The TCP segment length, as used in the pseudo-header.
    pub tcp_length: usize,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub outcome: Outcome,
}

impl Display for Validation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ihl={} total_length={} tcp_length={} {}",
            self.source,
            self.destination,
            self.ip_header_length,
            self.total_length,
            self.tcp_length,
            self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::models::{Outcome, Status};

    #[test]
    fn test_outcome() {
        let outcome = Outcome::new(0x582c, 0xee4e);
        assert_eq!(
            outcome,
            Outcome::Mismatch {
                computed: 0x582c,
                embedded: 0xee4e
            }
        );
        assert!(!outcome.is_match());
        assert_eq!(outcome.computed(), 0x582c);
        assert_eq!(outcome.embedded(), 0xee4e);
        assert_eq!(outcome.status(), Status::Mismatch);
        assert_eq!(
            outcome.to_string(),
            "mismatch computed=0x582c embedded=0xee4e"
        );

        let outcome = Outcome::new(0x582c, 0x582c);
        assert!(outcome.is_match());
        assert_eq!(outcome.status(), Status::Match);
        assert_eq!(outcome.to_string(), "match checksum=0x582c");
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(Status::ParseFailure.to_string(), "parse_failure");
        assert_eq!(Status::from_str("mismatch").unwrap(), Status::Mismatch);
    }
}
