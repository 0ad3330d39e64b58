use std::fs;
use std::io;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use secwrap_common::config::MgmtConfig;
use secwrap_core::mgmt::runner::{CommandOutput, CommandRunner};
use secwrap_core::network::transport::PacketSink;
use serde_json::{Value, json};

/// Temporary directory removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", rand::random::<u64>()));
        fs::create_dir_all(&path).expect("creating scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mgmt_config(&self, layer: &str) -> MgmtConfig {
        MgmtConfig {
            nat_layer: layer.to_string(),
            session_file: self.path.join("session.json"),
            program: PathBuf::from("mgmt_cli"),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Stand-in for `mgmt_cli` that answers login, show-nat-rulebase and logout.
pub struct FakeMgmtCli {
    pub sid: Option<String>,
    pub rulebase: Value,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl FakeMgmtCli {
    pub fn new(rulebase: Value) -> Self {
        Self {
            sid: Some("fake-sid".to_string()),
            rulebase,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|args| args.first().cloned())
            .collect()
    }
}

fn ok(stdout: String) -> CommandOutput {
    CommandOutput {
        success: true,
        stdout,
        stderr: String::new(),
    }
}

#[async_trait]
impl CommandRunner for FakeMgmtCli {
    async fn run(&self, _program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.to_vec());

        let reply = match args.first().map(String::as_str) {
            Some("login") => match &self.sid {
                Some(sid) => ok(json!({ "sid": sid, "api-server-version": "1.9" }).to_string()),
                None => ok(json!({ "message": "no sid" }).to_string()),
            },
            Some("show-nat-rulebase") => ok(self.rulebase.to_string()),
            Some("logout") => ok(json!({ "message": "OK" }).to_string()),
            _ => CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "unknown command".to_string(),
            },
        };
        Ok(reply)
    }
}

pub fn rule(orig: Option<&str>, xlate: Option<&str>) -> Value {
    let mut rule = json!({ "type": "nat-rule", "nat-settings": { "method": "static" } });
    if let Some(ip) = orig {
        rule["original-destination"] = json!({ "name": format!("host_{ip}"), "ipv4-address": ip });
    }
    if let Some(ip) = xlate {
        rule["nat-settings"]["translated-destination"] =
            json!({ "name": format!("host_{ip}"), "ipv4-address": ip });
    }
    rule
}

/// Keeps every segment handed to it.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Vec<(Vec<u8>, IpAddr)>,
}

impl PacketSink for RecordingSink {
    fn send_to(&mut self, segment: &[u8], dst: IpAddr) -> io::Result<usize> {
        self.sent.push((segment.to_vec(), dst));
        Ok(segment.len())
    }
}
