//! # NAT Rulebase Model
//!
//! The subset of a `show-nat-rulebase` response that address extraction needs.
//! Unknown fields are ignored and every object is optional, so sections and
//! partially filled rules decode without error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NatRulebase {
    #[serde(default)]
    pub rulebase: Vec<NatRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NatRule {
    #[serde(default)]
    pub original_destination: Option<AddressObject>,
    #[serde(default)]
    pub nat_settings: Option<NatSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NatSettings {
    #[serde(default)]
    pub translated_destination: Option<AddressObject>,
}

/// A network object as referenced from a rule. Only host objects carry an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AddressObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ipv4_address: Option<String>,
}

impl AddressObject {
    pub fn host(ipv4_address: &str) -> Self {
        Self {
            name: None,
            ipv4_address: Some(ipv4_address.to_string()),
        }
    }
}

impl NatRule {
    /// Builds a rule from optional original and translated destination addresses.
    pub fn with_destinations(original: Option<&str>, translated: Option<&str>) -> Self {
        Self {
            original_destination: original.map(AddressObject::host),
            nat_settings: Some(NatSettings {
                translated_destination: translated.map(AddressObject::host),
            }),
        }
    }

    pub fn original_destination_ip(&self) -> Option<&str> {
        self.original_destination
            .as_ref()
            .and_then(|obj| obj.ipv4_address.as_deref())
    }

    pub fn translated_destination_ip(&self) -> Option<&str> {
        self.nat_settings
            .as_ref()
            .and_then(|nat| nat.translated_destination.as_ref())
            .and_then(|obj| obj.ipv4_address.as_deref())
    }

    /// Both destination addresses in rule order, original first.
    pub fn destination_ips(&self) -> impl Iterator<Item = &str> {
        self.original_destination_ip()
            .into_iter()
            .chain(self.translated_destination_ip())
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
