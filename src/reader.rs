//! Read already-captured frames from pcap files or hex dumps.
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, trace};
use pcap::{Capture, Linktype};

/// A frame and the time at which it was captured.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapturedFrame {
    /// The capture timestamp (zero for hex input).
    pub timestamp: Duration,
    pub data: Vec<u8>,
}

/// Read all the frames of a pcap file.
///
/// Only Ethernet captures are supported, as the frame layout assumes a
/// 14-byte Ethernet header.
pub fn read_pcap(path: &Path) -> Result<Vec<CapturedFrame>> {
    let mut cap = Capture::from_file(path)
        .with_context(|| format!("Cannot open capture file {}", path.display()))?;
    let linktype = cap.get_datalink();
    if linktype != Linktype::ETHERNET {
        bail!("Unsupported link type: {:?}", linktype);
    }

    let mut frames = Vec::new();
    loop {
        match cap.next_packet() {
            Ok(packet) => {
                let timestamp = Duration::from_micros(
                    packet.header.ts.tv_sec as u64 * 1_000_000 + packet.header.ts.tv_usec as u64,
                );
                // A truncated capture (caplen < len) is kept as is:
                // the validator reports it as a parse failure.
                trace!(
                    "caplen={} len={}",
                    packet.header.caplen,
                    packet.header.len
                );
                frames.push(CapturedFrame {
                    timestamp,
                    data: packet.data.to_vec(),
                });
            }
            Err(pcap::Error::NoMorePackets) => break,
            Err(error) => return Err(error).context("Cannot read packet"),
        }
    }
    debug!("read {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Read hex-encoded frames, one per line.
///
/// Empty lines and lines starting with `#` are skipped. Whitespace and `:`
/// separators inside a line are ignored, so `52 55 0a` and `52:55:0a` are
/// both accepted.
pub fn read_hex<R: BufRead>(reader: R) -> Result<Vec<CapturedFrame>> {
    let mut frames = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("Cannot read line")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let digits: String = line
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();
        let data = hex::decode(&digits)
            .with_context(|| format!("Invalid hex frame on line {}", number + 1))?;
        frames.push(CapturedFrame {
            timestamp: Duration::default(),
            data,
        });
    }
    debug!("read {} hex frames", frames.len());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::reader::read_hex;

    #[test]
    fn test_read_hex() {
        let input = "# comment\n\n5255 0a00\n52:55:0a:00:02\n  ffff  \n";
        let frames = read_hex(Cursor::new(input)).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].data, vec![0x52, 0x55, 0x0a, 0x00]);
        assert_eq!(frames[1].data, vec![0x52, 0x55, 0x0a, 0x00, 0x02]);
        assert_eq!(frames[2].data, vec![0xff, 0xff]);
    }

    #[test]
    fn test_read_hex_invalid() {
        let error = read_hex(Cursor::new("5255\nzz\n")).unwrap_err();
        assert_eq!(error.to_string(), "Invalid hex frame on line 2");
        assert!(read_hex(Cursor::new("525\n")).is_err());
    }
}
