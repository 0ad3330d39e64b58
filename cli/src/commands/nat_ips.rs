use std::collections::BTreeSet;

use colored::*;
use secwrap_common::config::{Config, MgmtConfig};
use secwrap_common::error::MgmtError;
use secwrap_core::mgmt::MgmtClient;
use secwrap_core::mgmt::runner::{CommandRunner, ProcessRunner};
use secwrap_core::nat;
use tracing::{error, info};

use crate::mprint;
use crate::terminal::{colors, print, spinner};

pub async fn nat_ips(mgmt_cfg: &MgmtConfig, cfg: &Config) -> anyhow::Result<()> {
    if cfg.quiet == 0 {
        print_settings(mgmt_cfg);
    }

    let client = MgmtClient::new(mgmt_cfg, ProcessRunner);
    let public_ips = collect(&client, mgmt_cfg).await.inspect_err(report)?;

    print_results(&public_ips, cfg);

    info!("Logging out...");
    client.logout().await?;
    Ok(())
}

async fn collect<R: CommandRunner>(
    client: &MgmtClient<R>,
    mgmt_cfg: &MgmtConfig,
) -> Result<BTreeSet<String>, MgmtError> {
    info!("Logging into the management API...");
    spinner::start("Waiting for login...");
    let login = client.login().await;
    spinner::stop();
    login?;

    info!("Fetching NAT rulebase from layer '{}'...", mgmt_cfg.nat_layer);
    spinner::start(format!("Reading layer '{}'...", mgmt_cfg.nat_layer));
    let rules = nat::fetch_nat_rulebase(client, &mgmt_cfg.nat_layer).await;
    spinner::stop();

    Ok(nat::extract_public_ips(&rules?))
}

fn print_settings(mgmt_cfg: &MgmtConfig) {
    print::set_key_width(&["Layer", "Session", "Program"]);
    print::aligned_line("Layer", mgmt_cfg.nat_layer.as_str());
    print::aligned_line("Session", mgmt_cfg.session_file.display().to_string());
    print::aligned_line("Program", mgmt_cfg.program.display().to_string());
}

/// Dumps raw command output next to parse failures so the operator can see what came back.
fn report(err: &MgmtError) {
    if let Some(raw) = err.raw_output() {
        error!("Unexpected output ({:?} error):", err.kind());
        print::print(raw);
    }
}

fn print_results(public_ips: &BTreeSet<String>, cfg: &Config) {
    if cfg.quiet < 2 {
        mprint!();
    }
    print::header("nat public addresses", cfg.quiet);

    let count: ColoredString = public_ips.len().to_string().bold().green();
    print::print(&format!(
        "{} Found {} unique public IPs:",
        "[*]".yellow().bold(),
        count
    ));
    for ip in public_ips {
        print::print(&format!("{}", ip.color(colors::IPV4_ADDR)));
    }

    if public_ips.is_empty() && cfg.quiet == 0 {
        print::no_results();
    }
    print::fat_separator(cfg.quiet);
}
