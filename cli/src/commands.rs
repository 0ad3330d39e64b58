pub mod nat_ips;
pub mod packet;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use secwrap_common::config::{DEFAULT_MGMT_CLI, DEFAULT_NAT_LAYER, DEFAULT_SESSION_FILE};

#[derive(Parser)]
#[command(name = "secwrap")]
#[command(about = "Small wrappers for manual network and firewall checks.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce decorative output (-q hides headers, -qq prints results only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a 16 byte TCP probe with chosen flags (prompts for missing values)
    #[command(alias = "p")]
    Packet {
        /// Target IPv4 address
        #[arg(short, long)]
        target: Option<String>,
        /// Target port
        #[arg(short, long)]
        port: Option<String>,
        /// TCP flags, e.g. S for SYN, R for RST, A for ACK
        #[arg(short, long)]
        flags: Option<String>,
    },
    /// List the public addresses referenced by a firewall NAT rulebase
    #[command(alias = "n")]
    NatIps {
        /// NAT rule layer to read
        #[arg(short, long, default_value = DEFAULT_NAT_LAYER)]
        layer: String,
        /// Where the API session id is kept while logged in
        #[arg(short, long, default_value = DEFAULT_SESSION_FILE)]
        session_file: PathBuf,
        /// Management CLI program to invoke
        #[arg(long, default_value = DEFAULT_MGMT_CLI)]
        mgmt_cli: PathBuf,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
