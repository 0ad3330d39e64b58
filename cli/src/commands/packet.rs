use anyhow::Context;
use colored::*;
use is_root::is_root;
use secwrap_common::config::Config;
use secwrap_core::network::transport::{self, TcpTransport};
use secwrap_core::probe::{self, ProbeRequest, SentSegment};
use tracing::{info, warn};

use crate::terminal::{colors, print, prompt};

const TARGET_PROMPT: &str = "Enter target IP address: ";
const PORT_PROMPT: &str = "Enter target port: ";
const FLAGS_PROMPT: &str = "Enter TCP flags (e.g., S for SYN, R for RST, A for ACK, etc.): ";

pub fn packet(
    target: Option<String>,
    port: Option<String>,
    flags: Option<String>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let target = prompt::or_ask(target, TARGET_PROMPT)?;
    let port = prompt::or_ask(port, PORT_PROMPT)?;
    let flags = prompt::or_ask(flags, FLAGS_PROMPT)?;
    let request = ProbeRequest::parse(&target, &port, &flags)?;

    if cfg.quiet == 0 {
        print::set_key_width(&["Target", "Flags"]);
        print::aligned_line("Target", format!("{}:{}", request.dst_addr, request.dst_port));
        print::aligned_line("Flags", request.flags.to_string());
    }

    if !is_root() {
        warn!("Raw sockets usually need root or CAP_NET_RAW");
    }

    let src_addr = transport::detect_source_ip(request.dst_addr)
        .with_context(|| format!("no route to {}", request.dst_addr))?;
    let mut sink = TcpTransport::open().context("opening raw TCP channel")?;

    if request.wants_reset() {
        info!("SYN requested, a RST will follow");
    }
    let sent: Vec<SentSegment> = probe::send_probe(&mut sink, src_addr, &request)?;

    print::header("packets sent", cfg.quiet);
    print_segments(&sent, cfg);
    Ok(())
}

fn print_segments(sent: &[SentSegment], cfg: &Config) {
    for (idx, segment) in sent.iter().enumerate() {
        if cfg.quiet > 1 {
            print::print(&format!(
                "{}:{} {} {}",
                segment.dst_addr, segment.dst_port, segment.flags, segment.bytes_sent
            ));
            continue;
        }

        print::tree_head(idx, &format!("flags {}", segment.flags));
        print::as_tree_one_level(vec![
            ("Target".to_string(), segment.dst_addr.to_string().color(colors::IPV4_ADDR)),
            ("Ports".to_string(), format!("{} -> {}", segment.src_port, segment.dst_port).color(colors::PORT)),
            ("Payload".to_string(), format!("{} bytes", segment.payload_len).normal()),
            ("Sent".to_string(), format!("{} bytes", segment.bytes_sent).normal()),
        ]);
    }
}
