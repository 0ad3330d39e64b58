//! Manual TCP probes with a fixed 16 byte payload.
//!
//! A probe is one segment with the requested flags. When those flags include
//! SYN, a RST from a fresh source port follows so the target does not keep a
//! half-open connection around.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use secwrap_common::error::ProbeError;
use secwrap_common::network::flags::TcpFlagSet;
use tracing::debug;

use crate::network::tcp::{self, SegmentSpec};
use crate::network::transport::PacketSink;

pub const PROBE_SEQUENCE: u32 = 1000;
pub const PROBE_PAYLOAD: [u8; 16] = [b'A'; 16];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRequest {
    pub dst_addr: Ipv4Addr,
    pub dst_port: u16,
    pub flags: TcpFlagSet,
}

impl ProbeRequest {
    pub fn new(dst_addr: Ipv4Addr, dst_port: u16, flags: TcpFlagSet) -> Self {
        Self {
            dst_addr,
            dst_port,
            flags,
        }
    }

    /// Builds a request from raw operator input.
    pub fn parse(dst_addr: &str, dst_port: &str, flags: &str) -> Result<Self, ProbeError> {
        let dst_addr = Ipv4Addr::from_str(dst_addr.trim())
            .map_err(|_| ProbeError::InvalidAddress(dst_addr.trim().to_string()))?;
        let dst_port = dst_port
            .trim()
            .parse::<u16>()
            .map_err(|_| ProbeError::InvalidPort(dst_port.trim().to_string()))?;
        let flags = TcpFlagSet::from_str(flags)?;
        Ok(Self::new(dst_addr, dst_port, flags))
    }

    pub fn wants_reset(&self) -> bool {
        self.flags.contains(TcpFlagSet::SYN)
    }
}

/// What went out on the wire for one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSegment {
    pub dst_addr: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub flags: TcpFlagSet,
    pub payload_len: usize,
    pub bytes_sent: usize,
}

/// Sends the probe and, for SYN probes, the trailing RST.
///
/// `src_addr` is only used for the checksum pseudo header. No replies are read.
pub fn send_probe<S: PacketSink>(
    sink: &mut S,
    src_addr: Ipv4Addr,
    request: &ProbeRequest,
) -> Result<Vec<SentSegment>, ProbeError> {
    let mut sent: Vec<SentSegment> = Vec::with_capacity(2);
    sent.push(send_segment(sink, src_addr, request, request.flags)?);

    if request.wants_reset() {
        sent.push(send_segment(sink, src_addr, request, TcpFlagSet::RST)?);
    }

    Ok(sent)
}

fn send_segment<S: PacketSink>(
    sink: &mut S,
    src_addr: Ipv4Addr,
    request: &ProbeRequest,
    flags: TcpFlagSet,
) -> Result<SentSegment, ProbeError> {
    let src_port: u16 = rand::random();
    let spec = SegmentSpec {
        src_addr,
        dst_addr: request.dst_addr,
        src_port,
        dst_port: request.dst_port,
        flags,
        sequence: PROBE_SEQUENCE,
        payload: &PROBE_PAYLOAD,
    };
    let segment = tcp::build_segment(&spec)?;

    let dst = IpAddr::V4(request.dst_addr);
    let bytes_sent = sink
        .send_to(&segment, dst)
        .map_err(|source| ProbeError::Transport { dst, source })?;
    debug!("sent {bytes_sent} bytes to {dst}:{} flags={flags}", request.dst_port);

    Ok(SentSegment {
        dst_addr: request.dst_addr,
        src_port,
        dst_port: request.dst_port,
        flags,
        payload_len: PROBE_PAYLOAD.len(),
        bytes_sent,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<(Vec<u8>, IpAddr)>,
    }

    impl PacketSink for RecordingSink {
        fn send_to(&mut self, segment: &[u8], dst: IpAddr) -> io::Result<usize> {
            self.sent.push((segment.to_vec(), dst));
            Ok(segment.len())
        }
    }

    struct FailingSink;

    impl PacketSink for FailingSink {
        fn send_to(&mut self, _segment: &[u8], _dst: IpAddr) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    const SRC: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

    #[test]
    fn syn_probe_is_followed_by_rst() {
        let request = ProbeRequest::parse("198.51.100.7", "80", "S").unwrap();
        let mut sink = RecordingSink::default();

        let sent = send_probe(&mut sink, SRC, &request).unwrap();

        assert_eq!(sink.sent.len(), 2);
        assert_eq!(tcp::segment_flags(&sink.sent[0].0), Some(TcpFlagSet::SYN.bits()));
        assert_eq!(tcp::segment_flags(&sink.sent[1].0), Some(TcpFlagSet::RST.bits()));
        for (segment, dst) in &sink.sent {
            assert_eq!(*dst, IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)));
            assert_eq!(segment.len(), tcp::TCP_HDR_LEN + 16);
        }
        assert_eq!(sent[1].flags, TcpFlagSet::RST);
        assert!(sent.iter().all(|s| s.payload_len == 16 && s.dst_port == 80));
    }

    #[test]
    fn non_syn_probe_is_sent_once() {
        let request = ProbeRequest::parse("198.51.100.7", "443", "A").unwrap();
        let mut sink = RecordingSink::default();

        let sent = send_probe(&mut sink, SRC, &request).unwrap();

        assert_eq!(sent.len(), 1);
        assert_eq!(sink.sent.len(), 1);
        assert_eq!(tcp::segment_flags(&sink.sent[0].0), Some(TcpFlagSet::ACK.bits()));
    }

    #[test]
    fn syn_ack_still_triggers_reset() {
        let request = ProbeRequest::parse("198.51.100.7", "22", "SA").unwrap();
        let mut sink = RecordingSink::default();
        assert_eq!(send_probe(&mut sink, SRC, &request).unwrap().len(), 2);
    }

    #[test]
    fn transport_errors_are_returned() {
        let request = ProbeRequest::parse("198.51.100.7", "80", "S").unwrap();
        let err = send_probe(&mut FailingSink, SRC, &request).unwrap_err();
        assert!(matches!(err, ProbeError::Transport { .. }));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            ProbeRequest::parse("example", "80", "S"),
            Err(ProbeError::InvalidAddress(_))
        ));
        assert!(matches!(
            ProbeRequest::parse("10.0.0.1", "70000", "S"),
            Err(ProbeError::InvalidPort(_))
        ));
        assert!(matches!(
            ProbeRequest::parse("10.0.0.1", "80", "Z"),
            Err(ProbeError::Flags(_))
        ));
    }
}
