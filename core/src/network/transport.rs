use std::io;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use pnet::{
    packet::{ip::IpNextHeaderProtocols, tcp::TcpPacket},
    transport::{self, TransportChannelType, TransportProtocol, TransportSender},
};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_TCP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Tcp));

/// Anything that can put a finished TCP segment on the wire.
///
/// The segment starts at the TCP header; the IP header is added below this layer.
pub trait PacketSink {
    fn send_to(&mut self, segment: &[u8], dst: IpAddr) -> io::Result<usize>;
}

/// Raw layer 4 TCP channel. The kernel writes the IPv4 header.
///
/// Opening it requires root or `CAP_NET_RAW`.
pub struct TcpTransport {
    tx: TransportSender,
}

impl TcpTransport {
    pub fn open() -> io::Result<Self> {
        let (tx, _rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_TCP)?;
        Ok(Self { tx })
    }
}

impl PacketSink for TcpTransport {
    fn send_to(&mut self, segment: &[u8], dst: IpAddr) -> io::Result<usize> {
        let packet = TcpPacket::new(segment).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "segment shorter than a TCP header")
        })?;
        self.tx.send_to(packet, dst)
    }
}

/// Source address the kernel would pick to reach `dst`.
///
/// Connecting a UDP socket only consults the routing table; nothing is sent.
pub fn detect_source_ip(dst: Ipv4Addr) -> io::Result<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((dst, 9))?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ipv4_addr) => Ok(ipv4_addr),
        IpAddr::V6(_) => Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "route to IPv4 target has no IPv4 source",
        )),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
