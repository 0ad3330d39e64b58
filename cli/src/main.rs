mod commands;
mod terminal;

use commands::{CommandLine, Commands, nat_ips, packet};
use secwrap_common::config::{Config, MgmtConfig};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        quiet: commands.quiet,
    };
    print::banner(cfg.quiet);

    if let Err(e) = run(commands.command, &cfg).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, cfg: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Packet { target, port, flags } => {
            print::header("manual tcp probe", cfg.quiet);
            packet::packet(target, port, flags, cfg)
        }
        Commands::NatIps {
            layer,
            session_file,
            mgmt_cli,
        } => {
            print::header("nat public address extraction", cfg.quiet);
            let mgmt_cfg = MgmtConfig {
                nat_layer: layer,
                session_file,
                program: mgmt_cli,
            };
            nat_ips::nat_ips(&mgmt_cfg, cfg).await
        }
    }
}
