use std::net::Ipv4Addr;
use std::str::FromStr;

/// Returns `true` when `ip` is a dotted-quad IPv4 address outside the
/// loopback, link-local and RFC 1918 ranges.
///
/// Empty or malformed input is never public.
///
/// Carrier-grade NAT, benchmarking, multicast and IPv6 space are not
/// excluded.
pub fn is_public_ip(ip: &str) -> bool {
    let ip = ip.trim();
    if ip.is_empty() {
        return false;
    }

    match Ipv4Addr::from_str(ip) {
        Ok(ipv4_addr) => !is_reserved(&ipv4_addr),
        Err(_) => false,
    }
}

fn is_reserved(ipv4_addr: &Ipv4Addr) -> bool {
    match ipv4_addr.octets() {
        [127, ..] => true,
        [169, 254, ..] => true,
        [10, ..] => true,
        [192, 168, ..] => true,
        [172, second, ..] => (16..=31).contains(&second),
        _ => false,
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
