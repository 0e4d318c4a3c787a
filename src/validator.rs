//! Validate the TCP checksum of an Ethernet + IPv4 + TCP frame.
//!
//! ```
//! use tcpcheck::validator::validate;
//! use tcpcheck::models::Outcome;
//!
//! let frame = hex::decode(
//!     "52550a00020252540012345608004500003b0000000064063ead0a00020f0a00020207d065f3\
//!      000041a70000fa025018ffffee4e000061206d6573736167652066726f6d2078763621",
//! )
//! .unwrap();
//! let validation = validate(&frame).unwrap();
//! assert_eq!(
//!     validation.outcome,
//!     Outcome::Mismatch { computed: 0x582c, embedded: 0xee4e }
//! );
//! ```
use log::trace;
use pnet::packet::ethernet::EtherTypes;

use crate::checksum::internet_checksum;
use crate::error::ParseError;
use crate::frame::{Frame, PSEUDO_HEADER_LEN};
use crate::models::{Outcome, Validation};

/// Recompute the TCP checksum of `frame` and compare it with the embedded one.
///
/// The EtherType and the IPv4 protocol fields are not checked.
pub fn validate(frame: &[u8]) -> Result<Validation, ParseError> {
    let frame = Frame::new(frame)?;
    validate_frame(&frame)
}

/// Same as [`validate`], but also reject frames that are not IPv4/TCP.
pub fn validate_strict(frame: &[u8]) -> Result<Validation, ParseError> {
    let frame = Frame::new(frame)?;
    let ethertype = frame.ethertype();
    if ethertype != EtherTypes::Ipv4 {
        return Err(ParseError::NotIpv4(ethertype.0));
    }
    if !frame.is_tcp() {
        return Err(ParseError::NotTcp(frame.ip_protocol().0));
    }
    validate_frame(&frame)
}

fn validate_frame(frame: &Frame) -> Result<Validation, ParseError> {
    let segment = frame.tcp_segment()?;
    let embedded = segment.checksum();
    let pseudo_header = frame.pseudo_header();
    trace!(
        "ihl={} total_length={} segment_length={} pseudo_header={:?}",
        frame.ip_header_length(),
        frame.ip_total_length(),
        segment.len(),
        pseudo_header
    );

    let mut buffer = Vec::with_capacity(PSEUDO_HEADER_LEN + segment.len());
    buffer.extend_from_slice(&pseudo_header.to_bytes());
    buffer.extend_from_slice(&segment.with_zero_checksum());
    let computed = internet_checksum(&buffer);

    Ok(Validation {
        ip_header_length: frame.ip_header_length(),
        total_length: frame.ip_total_length(),
        tcp_length: frame.tcp_length(),
        source: frame.source(),
        destination: frame.destination(),
        outcome: Outcome::new(computed, embedded),
    })
}
