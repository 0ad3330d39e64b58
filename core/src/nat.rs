use std::collections::BTreeSet;

use secwrap_common::error::MgmtError;
use secwrap_common::nat::{NatRule, NatRulebase};
use secwrap_common::network::ip::is_public_ip;
use tracing::debug;

use crate::mgmt::MgmtClient;
use crate::mgmt::runner::CommandRunner;

const SHOW_NAT_RULEBASE: &str = "show-nat-rulebase";

/// Fetches the NAT rules of `layer`. A response without a `rulebase` has no rules.
pub async fn fetch_nat_rulebase<R: CommandRunner>(
    client: &MgmtClient<R>,
    layer: &str,
) -> Result<Vec<NatRule>, MgmtError> {
    let value = client.run_mgmt_cli(&[SHOW_NAT_RULEBASE, "name", layer]).await?;
    let rulebase: NatRulebase =
        serde_json::from_value(value.clone()).map_err(|source| MgmtError::InvalidJson {
            operation: SHOW_NAT_RULEBASE.to_string(),
            stdout: value.to_string(),
            source,
        })?;
    debug!("layer '{layer}' returned {} rules", rulebase.rulebase.len());
    Ok(rulebase.rulebase)
}

/// Collects every original or translated destination that is publicly routable.
///
/// Iterating the result yields the addresses in ascending string order.
pub fn extract_public_ips(rules: &[NatRule]) -> BTreeSet<String> {
    rules
        .iter()
        .flat_map(|rule| rule.destination_ips())
        .filter(|ip| is_public_ip(ip))
        .map(str::to_string)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
