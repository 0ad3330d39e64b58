use std::path::PathBuf;

pub const DEFAULT_NAT_LAYER: &str = "Standard";
pub const DEFAULT_SESSION_FILE: &str = "session.json";
pub const DEFAULT_MGMT_CLI: &str = "mgmt_cli";

pub struct Config {
    /// Suppresses headers and decorative output.
    ///
    /// `1` keeps results and log lines, `2` keeps results only.
    pub quiet: u8,
}

/// Settings for talking to the firewall management API through `mgmt_cli`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MgmtConfig {
    /// Name of the NAT rule layer to query.
    pub nat_layer: String,
    /// Where the session id is stored between calls.
    ///
    /// Exists only while logged in.
    pub session_file: PathBuf,
    /// Program used for every API call.
    pub program: PathBuf,
}

impl Default for MgmtConfig {
    fn default() -> Self {
        Self {
            nat_layer: DEFAULT_NAT_LAYER.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            program: PathBuf::from(DEFAULT_MGMT_CLI),
        }
    }
}
