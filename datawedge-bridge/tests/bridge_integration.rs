//! Integration tests for the consumer-facing bridge surface

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use proptest::prelude::*;

use datawedge_api::{keys, Extra, Intent, LocalPeer};
use datawedge_bridge::{BridgeConfig, BridgeError, CommandOutcome, ScannerBridge};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Test Helpers
// ============================================================================

fn setup(config: BridgeConfig) -> (Arc<LocalPeer>, ScannerBridge) {
    let peer = Arc::new(LocalPeer::new());
    let bridge = ScannerBridge::new(peer.clone(), config).unwrap();
    (peer, bridge)
}

fn quiet_config() -> BridgeConfig {
    BridgeConfig::new().with_configure_on_start(false)
}

fn scan_broadcast(data: &str) -> Intent {
    Intent::new(keys::DEFAULT_SCAN_ACTION)
        .with_category(keys::CATEGORY_DEFAULT)
        .with_extra(keys::EXTRA_DATA_STRING, data)
}

// ============================================================================
// Event stream
// ============================================================================

#[tokio::test]
async fn test_end_to_end_scan_stream() {
    let (peer, bridge) = setup(quiet_config());
    let mut scans = bridge.subscribe().unwrap();

    peer.broadcast(&scan_broadcast(" E200001 "));
    let scan = tokio::time::timeout(RECV_TIMEOUT, scans.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scan.payload(), "E200001");

    bridge.unsubscribe(&scans);
    peer.broadcast(&scan_broadcast(" E200001 "));

    let after = tokio::time::timeout(RECV_TIMEOUT, scans.next()).await.unwrap();
    assert!(after.is_none());
}

#[test]
fn test_commands_work_without_subscription() {
    let (peer, bridge) = setup(quiet_config());

    assert!(!bridge.event_manager().is_subscribed());
    assert_eq!(bridge.dispatch("startScan").unwrap(), CommandOutcome::Sent);
    assert_eq!(bridge.dispatch("stopScan").unwrap(), CommandOutcome::Sent);
    assert_eq!(peer.sent_intents().len(), 2);
}

#[test]
fn test_second_subscribe_fails() {
    let (peer, bridge) = setup(quiet_config());
    let _scans = bridge.subscribe().unwrap();

    assert!(matches!(
        bridge.subscribe(),
        Err(BridgeError::EventManager(
            datawedge_event_manager::EventManagerError::AlreadySubscribed(_)
        ))
    ));
    assert_eq!(peer.receiver_count(), 1);
}

#[test]
fn test_dropping_bridge_unregisters_receiver() {
    let (peer, bridge) = setup(quiet_config());
    let _scans = bridge.subscribe().unwrap();

    drop(bridge);
    assert_eq!(peer.receiver_count(), 0);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_unknown_command_not_implemented() {
    let (peer, bridge) = setup(quiet_config());

    let result = bridge.dispatch("foo");
    assert!(matches!(result, Err(BridgeError::NotImplemented(ref name)) if name == "foo"));
    assert!(peer.sent_intents().is_empty());
}

#[test]
fn test_configure_twice_is_idempotent() {
    let (peer, bridge) = setup(quiet_config());

    assert!(bridge.dispatch("configureDataWedge").unwrap().as_bool());
    assert!(bridge.dispatch("configureDataWedge").unwrap().as_bool());

    let sent = peer.sent_intents();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);

    for intent in &sent {
        assert_eq!(intent.action(), keys::API_ACTION);
        assert_eq!(intent.string_extra(keys::EXTRA_SEND_RESULT), Some("true"));

        let config = intent
            .extra(keys::EXTRA_SET_CONFIG)
            .and_then(Extra::as_bundle)
            .unwrap();
        assert_eq!(config["CONFIG_MODE"].as_str(), Some("CREATE_IF_NOT_EXIST"));

        let plugins = config["PLUGIN_CONFIG"].as_bundle_array().unwrap();
        let names: Vec<_> = plugins
            .iter()
            .map(|plugin| plugin["PLUGIN_NAME"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["INTENT", "BARCODE", "RFID"]);
        assert!(plugins
            .iter()
            .all(|plugin| plugin["RESET_CONFIG"].as_str() == Some("true")));
    }
}

#[test]
fn test_configuration_wire_shape() {
    let (peer, bridge) = setup(quiet_config().with_package_name("com.example.scanner"));
    bridge.configure_profile().unwrap();

    let json = serde_json::to_value(&peer.sent_intents()[0]).unwrap();
    let config = &json["extras"][keys::EXTRA_SET_CONFIG];

    assert_eq!(config["PROFILE_NAME"], "Tagify_Profile");
    assert_eq!(config["PROFILE_ENABLED"], "true");
    assert_eq!(config["APP_LIST"]["PACKAGE_NAME"], "com.example.scanner");
    assert_eq!(config["APP_LIST"]["ACTIVITY_LIST"][0], "*");

    let intent_params = &config["PLUGIN_CONFIG"][0]["PARAM_LIST"];
    assert_eq!(intent_params["intent_action"], keys::DEFAULT_SCAN_ACTION);
    assert_eq!(intent_params["intent_category"], keys::CATEGORY_DEFAULT);
    assert_eq!(intent_params["intent_delivery"], "2");

    let barcode_params = &config["PLUGIN_CONFIG"][1]["PARAM_LIST"];
    assert_eq!(barcode_params["scanner_selection"], "auto");
}

#[test]
fn test_send_result_can_be_disabled() {
    let (peer, bridge) = setup(quiet_config().with_send_result(false));
    bridge.configure_profile().unwrap();

    assert!(peer.sent_intents()[0].extra(keys::EXTRA_SEND_RESULT).is_none());
}

#[test]
fn test_availability_examples() {
    let (_, zebra) = setup(quiet_config().with_manufacturer("Zebra Technologies"));
    assert_eq!(zebra.dispatch("isAvailable").unwrap(), CommandOutcome::Available(true));

    let (_, samsung) = setup(quiet_config().with_manufacturer("Samsung"));
    assert_eq!(samsung.dispatch("isAvailable").unwrap(), CommandOutcome::Available(false));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Availability is exactly "contains zebra or symbol", ignoring case
    #[test]
    fn prop_availability_matches_vendor_fragment(manufacturer in "[A-Za-z ]{0,24}") {
        let lower = manufacturer.to_lowercase();
        let expected = lower.contains("zebra") || lower.contains("symbol");

        let (_, bridge) = setup(quiet_config().with_manufacturer(manufacturer));
        prop_assert_eq!(bridge.is_available(), expected);
    }

    /// Any vendor embedding a known fragment is accepted
    #[test]
    fn prop_embedded_fragment_available(
        prefix in "[a-z]{0,6}",
        fragment in prop::sample::select(vec!["Zebra", "ZEBRA", "symbol", "SyMbOl"]),
        suffix in "[a-z ]{0,6}",
    ) {
        let manufacturer = format!("{prefix}{fragment}{suffix}");
        let (_, bridge) = setup(quiet_config().with_manufacturer(manufacturer));
        prop_assert!(bridge.is_available());
    }
}
