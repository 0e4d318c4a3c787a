//! Views over a captured Ethernet + IPv4 + TCP frame.
//!
//! Nothing here copies the frame: the accessors read the header fields in
//! place, at fixed offsets from the start of the 14-byte Ethernet header.
use std::net::Ipv4Addr;

use pnet::packet::ethernet::{EtherType, EthernetPacket};
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::Ipv4Packet;

use crate::error::ParseError;

/// Size of the Ethernet header preceding the IPv4 header.
pub const ETHERNET_HEADER_LEN: usize = 14;
/// Size of an IPv4 header without options.
pub const MIN_IPV4_HEADER_LEN: usize = 20;
/// Smallest frame from which the IPv4 header fields can be read (34 bytes).
pub const MIN_FRAME_LEN: usize = ETHERNET_HEADER_LEN + MIN_IPV4_HEADER_LEN;
/// Offset of the checksum field within the TCP header.
pub const TCP_CHECKSUM_OFFSET: usize = 16;
/// Smallest TCP segment that still holds the checksum field.
pub const MIN_TCP_SEGMENT_LEN: usize = TCP_CHECKSUM_OFFSET + 2;
/// Size of the IPv4 pseudo-header.
pub const PSEUDO_HEADER_LEN: usize = 12;

/// A frame holding an IPv4 header after a 14-byte Ethernet header.
#[derive(Debug)]
pub struct Frame<'a> {
    data: &'a [u8],
    ip: Ipv4Packet<'a>,
}

impl<'a> Frame<'a> {
    /// Build a view over `data`, which must be at least [`MIN_FRAME_LEN`] bytes.
    pub fn new(data: &'a [u8]) -> Result<Self, ParseError> {
        let too_short = ParseError::FrameTooShort {
            length: data.len(),
            minimum: MIN_FRAME_LEN,
        };
        if data.len() < MIN_FRAME_LEN {
            return Err(too_short);
        }
        let ip = data
            .get(ETHERNET_HEADER_LEN..)
            .and_then(Ipv4Packet::new)
            .ok_or(too_short)?;
        Ok(Self { data, ip })
    }

    pub fn ethertype(&self) -> EtherType {
        // The frame is longer than the Ethernet header, so this cannot fail.
        EthernetPacket::new(self.data)
            .map(|ethernet| ethernet.get_ethertype())
            .unwrap_or(EtherType(0))
    }

    pub fn ip_protocol(&self) -> IpNextHeaderProtocol {
        self.ip.get_next_level_protocol()
    }

    /// Returns true if the IPv4 protocol field announces TCP.
    pub fn is_tcp(&self) -> bool {
        self.ip_protocol() == IpNextHeaderProtocols::Tcp
    }

    /// IPv4 header length in bytes (IHL × 4).
    pub fn ip_header_length(&self) -> usize {
        self.ip.get_header_length() as usize * 4
    }

    /// IPv4 total length in bytes (header and payload).
    pub fn ip_total_length(&self) -> usize {
        self.ip.get_total_length() as usize
    }

    pub fn source(&self) -> Ipv4Addr {
        self.ip.get_source()
    }

    pub fn destination(&self) -> Ipv4Addr {
        self.ip.get_destination()
    }

    /// Length of the IPv4 payload, as announced by the IPv4 header.
    pub fn tcp_length(&self) -> usize {
        self.ip_total_length().saturating_sub(self.ip_header_length())
    }

    /// Slice the TCP segment out of the frame.
    ///
    /// The segment spans from the end of the IPv4 header to the end of the IPv4
    /// datagram; Ethernet padding past the total length is ignored.
    pub fn tcp_segment(&self) -> Result<TcpSegment<'a>, ParseError> {
        let header_length = self.ip_header_length();
        let total_length = self.ip_total_length();
        if header_length < MIN_IPV4_HEADER_LEN {
            return Err(ParseError::HeaderTooShort {
                length: header_length,
            });
        }
        let available = self.data.len() - ETHERNET_HEADER_LEN;
        if total_length > available {
            return Err(ParseError::TotalLengthExceedsFrame {
                total_length,
                available,
            });
        }
        let length = self.tcp_length();
        if header_length > total_length || length < MIN_TCP_SEGMENT_LEN {
            return Err(ParseError::SegmentTooShort {
                length,
                minimum: MIN_TCP_SEGMENT_LEN,
            });
        }
        let start = ETHERNET_HEADER_LEN + header_length;
        let end = ETHERNET_HEADER_LEN + total_length;
        Ok(TcpSegment(&self.data[start..end]))
    }

    /// The pseudo-header covering this frame's TCP segment.
    pub fn pseudo_header(&self) -> PseudoHeader {
        PseudoHeader {
            source: self.source(),
            destination: self.destination(),
            // IPv4 total length is 16 bits, so the difference fits.
            tcp_length: self.tcp_length() as u16,
        }
    }
}

/// A TCP segment long enough to hold its checksum field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TcpSegment<'a>(&'a [u8]);

impl<'a> TcpSegment<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The checksum carried by the segment.
    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([
            self.0[TCP_CHECKSUM_OFFSET],
            self.0[TCP_CHECKSUM_OFFSET + 1],
        ])
    }

    /// A copy of the segment with the checksum field set to zero.
    pub fn with_zero_checksum(&self) -> Vec<u8> {
        let mut segment = self.0.to_vec();
        segment[TCP_CHECKSUM_OFFSET..MIN_TCP_SEGMENT_LEN].fill(0);
        segment
    }
}

/// The IPv4 pseudo-header prepended to a TCP segment for checksum purposes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PseudoHeader {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub tcp_length: u16,
}

impl PseudoHeader {
    /// Serialize in network byte order: source, destination, zero, protocol, length.
    pub fn to_bytes(&self) -> [u8; PSEUDO_HEADER_LEN] {
        let mut bytes = [0u8; PSEUDO_HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.source.octets());
        bytes[4..8].copy_from_slice(&self.destination.octets());
        bytes[8] = 0;
        bytes[9] = IpNextHeaderProtocols::Tcp.0;
        bytes[10..12].copy_from_slice(&self.tcp_length.to_be_bytes());
        bytes
    }
}
