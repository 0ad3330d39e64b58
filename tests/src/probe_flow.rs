use std::net::{IpAddr, Ipv4Addr};

use secwrap_common::network::flags::TcpFlagSet;
use secwrap_core::network::tcp::{self, TCP_HDR_LEN};
use secwrap_core::network::transport;
use secwrap_core::probe::{self, PROBE_PAYLOAD, ProbeRequest};

use crate::utils::RecordingSink;

const SRC: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

#[test]
fn syn_probe_makes_exactly_two_transmissions() {
    let request = ProbeRequest::parse("203.0.113.9", "8443", "S").unwrap();
    let mut sink = RecordingSink::default();

    probe::send_probe(&mut sink, SRC, &request).unwrap();

    assert_eq!(sink.sent.len(), 2);
    let flags: Vec<Option<u8>> = sink.sent.iter().map(|(seg, _)| tcp::segment_flags(seg)).collect();
    assert_eq!(flags, [Some(TcpFlagSet::SYN.bits()), Some(TcpFlagSet::RST.bits())]);

    for (segment, dst) in &sink.sent {
        assert_eq!(*dst, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)));
        assert_eq!(&segment[TCP_HDR_LEN..], &PROBE_PAYLOAD[..]);
    }
}

#[test]
fn flags_without_syn_make_one_transmission() {
    for flags in ["A", "R", "F", "PA", "FPU"] {
        let request = ProbeRequest::parse("203.0.113.9", "80", flags).unwrap();
        let mut sink = RecordingSink::default();

        probe::send_probe(&mut sink, SRC, &request).unwrap();

        assert_eq!(sink.sent.len(), 1, "flags {flags}");
    }
}

#[test]
fn every_segment_carries_sequence_1000() {
    let request = ProbeRequest::parse("203.0.113.9", "80", "SE").unwrap();
    let mut sink = RecordingSink::default();

    probe::send_probe(&mut sink, SRC, &request).unwrap();

    for (segment, _) in &sink.sent {
        let seq = u32::from_be_bytes([segment[4], segment[5], segment[6], segment[7]]);
        assert_eq!(seq, probe::PROBE_SEQUENCE);
    }
}

#[test]
#[ignore]
fn raw_syn_probe_to_loopback() {
    let request = ProbeRequest::parse("127.0.0.1", "9", "S").unwrap();
    let src = transport::detect_source_ip(request.dst_addr).unwrap();
    let mut sink = transport::TcpTransport::open().unwrap();

    let sent = probe::send_probe(&mut sink, src, &request).unwrap();

    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|s| s.bytes_sent == TCP_HDR_LEN + PROBE_PAYLOAD.len()));
}
