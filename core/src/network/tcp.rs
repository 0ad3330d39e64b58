use std::net::Ipv4Addr;

use pnet::packet::tcp::{self, MutableTcpPacket, TcpPacket};
use secwrap_common::error::ProbeError;
use secwrap_common::network::flags::TcpFlagSet;

pub const TCP_HDR_LEN: usize = 20;
/// Window advertised by probes, same as Scapy's default.
pub const DEFAULT_WINDOW: u16 = 8192;

/// Fields of a single outbound segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpec<'a> {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub flags: TcpFlagSet,
    pub sequence: u32,
    pub payload: &'a [u8],
}

/// Writes a 20 byte TCP header followed by the payload and fills in the checksum.
pub fn build_segment(spec: &SegmentSpec<'_>) -> Result<Vec<u8>, ProbeError> {
    let mut buf: Vec<u8> = vec![0u8; TCP_HDR_LEN + spec.payload.len()];
    let mut pkt = MutableTcpPacket::new(&mut buf)
        .ok_or_else(|| ProbeError::Packet("buffer too small for TCP header".into()))?;

    pkt.set_source(spec.src_port);
    pkt.set_destination(spec.dst_port);
    pkt.set_sequence(spec.sequence);
    pkt.set_acknowledgement(0);
    pkt.set_data_offset((TCP_HDR_LEN / 4) as u8);
    pkt.set_flags(spec.flags.bits().into());
    pkt.set_window(DEFAULT_WINDOW);
    pkt.set_urgent_ptr(0);
    pkt.set_payload(spec.payload);

    let checksum = tcp::ipv4_checksum(&pkt.to_immutable(), &spec.src_addr, &spec.dst_addr);
    pkt.set_checksum(checksum);

    Ok(buf)
}

/// Flag bits of an encoded segment, or `None` if it is too short to hold a header.
pub fn segment_flags(segment: &[u8]) -> Option<u8> {
    TcpPacket::new(segment).map(|pkt| pkt.get_flags() as u8)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
