use secwrap_common::error::{ErrorKind, MgmtError};
use secwrap_core::mgmt::MgmtClient;
use secwrap_core::nat;
use serde_json::json;

use crate::utils::{FakeMgmtCli, ScratchDir, rule};

#[tokio::test]
async fn full_run_extracts_sorted_public_addresses() {
    let scratch = ScratchDir::new("secwrap-nat-flow");
    let cfg = scratch.mgmt_config("Standard");
    let fake = FakeMgmtCli::new(json!({
        "rulebase": [
            rule(Some("8.8.8.8"), Some("10.0.0.1")),
            rule(Some("192.168.1.1"), Some("203.0.113.5")),
        ]
    }));
    let client = MgmtClient::new(&cfg, fake);

    client.login().await.unwrap();
    assert!(cfg.session_file.is_file());

    let rules = nat::fetch_nat_rulebase(&client, &cfg.nat_layer).await.unwrap();
    let public_ips = nat::extract_public_ips(&rules);
    client.logout().await.unwrap();

    assert_eq!(
        public_ips.iter().map(String::as_str).collect::<Vec<_>>(),
        ["203.0.113.5", "8.8.8.8"]
    );
    assert!(!cfg.session_file.exists());
    assert_eq!(
        client.runner().operations(),
        ["login", "show-nat-rulebase", "logout"]
    );
}

#[tokio::test]
async fn rulebase_query_names_the_configured_layer() {
    let scratch = ScratchDir::new("secwrap-nat-layer");
    let cfg = scratch.mgmt_config("Perimeter NAT");
    let fake = FakeMgmtCli::new(json!({ "rulebase": [] }));
    let client = MgmtClient::new(&cfg, fake);

    client.login().await.unwrap();
    let rules = nat::fetch_nat_rulebase(&client, &cfg.nat_layer).await.unwrap();
    client.logout().await.unwrap();

    assert!(rules.is_empty());
    let calls = client_calls(&client);
    assert_eq!(calls[1][..3], ["show-nat-rulebase", "name", "Perimeter NAT"]);
}

#[tokio::test]
async fn query_without_session_sends_nothing() {
    let scratch = ScratchDir::new("secwrap-nat-nosession");
    let cfg = scratch.mgmt_config("Standard");
    let client = MgmtClient::new(&cfg, FakeMgmtCli::new(json!({ "rulebase": [] })));

    let err = nat::fetch_nat_rulebase(&client, &cfg.nat_layer).await.unwrap_err();

    assert!(matches!(err, MgmtError::SessionMissing(_)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(client_calls(&client).is_empty());
}

#[tokio::test]
async fn login_without_sid_leaves_no_session() {
    let scratch = ScratchDir::new("secwrap-nat-nosid");
    let cfg = scratch.mgmt_config("Standard");
    let mut fake = FakeMgmtCli::new(json!({}));
    fake.sid = None;
    let client = MgmtClient::new(&cfg, fake);

    let err = client.login().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!scratch.path().join("session.json").exists());
}

#[tokio::test]
async fn rulebase_of_wrong_shape_is_a_parse_error() {
    let scratch = ScratchDir::new("secwrap-nat-shape");
    let cfg = scratch.mgmt_config("Standard");
    let client = MgmtClient::new(&cfg, FakeMgmtCli::new(json!({ "rulebase": "nope" })));

    client.login().await.unwrap();
    let err = nat::fetch_nat_rulebase(&client, &cfg.nat_layer).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    client.logout().await.unwrap();
}

fn client_calls(client: &MgmtClient<FakeMgmtCli>) -> Vec<Vec<String>> {
    client.runner().calls.lock().unwrap().clone()
}
