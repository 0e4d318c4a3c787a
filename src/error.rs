//! Structural errors raised while decoding a frame.
use thiserror::Error;

/// A frame that cannot be decoded into an IPv4 TCP segment.
///
/// A parse error is never a checksum mismatch: when it is returned,
/// no checksum has been computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The frame cannot hold the Ethernet and minimal IPv4 headers.
    #[error("frame too short: {length} bytes, need at least {minimum}")]
    FrameTooShort { length: usize, minimum: usize },

    /// The IPv4 header length field is below the 20 bytes of a fixed header.
    #[error("IPv4 header length too short: {length} bytes")]
    HeaderTooShort { length: usize },

    /// The IPv4 total length points past the end of the frame.
    #[error("IPv4 total length {total_length} exceeds frame ({available} bytes after Ethernet header)")]
    TotalLengthExceedsFrame {
        total_length: usize,
        available: usize,
    },

    /// The TCP segment cannot hold its checksum field.
    #[error("TCP segment too short: {length} bytes, need at least {minimum}")]
    SegmentTooShort { length: usize, minimum: usize },

    /// The EtherType is not IPv4 (strict mode only).
    #[error("not an IPv4 frame: EtherType {0:#06x}")]
    NotIpv4(u16),

    /// The IPv4 protocol is not TCP (strict mode only).
    #[error("not a TCP segment: IP protocol {0}")]
    NotTcp(u8),
}
