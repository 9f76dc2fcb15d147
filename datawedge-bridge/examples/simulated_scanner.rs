//! Drive the bridge against an in-memory DataWedge stand-in
//!
//! Run with `DATAWEDGE_LOG_MODE=debug` to see the lifecycle logs.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use datawedge_api::{keys, Intent, LocalPeer};
use datawedge_bridge::logging::init_logging_from_env;
use datawedge_bridge::{BridgeConfig, ScannerBridge};

fn scan(source: &str, data: &str, label_type: &str) -> Intent {
    Intent::new(keys::DEFAULT_SCAN_ACTION)
        .with_category(keys::CATEGORY_DEFAULT)
        .with_extra(keys::EXTRA_SOURCE, source)
        .with_extra(keys::EXTRA_DATA_STRING, data)
        .with_extra(keys::EXTRA_LABEL_TYPE, label_type)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let peer = Arc::new(LocalPeer::new());
    let bridge = ScannerBridge::new(
        peer.clone(),
        BridgeConfig::new().with_manufacturer("Zebra Technologies"),
    )?;

    println!("DataWedge available: {}", bridge.dispatch("isAvailable")?.as_bool());
    println!("Broadcasts sent during startup: {}", peer.sent_intents().len());

    let mut scans = bridge.subscribe()?;
    bridge.dispatch("startScan")?;

    // DataWedge broadcasts from its own thread
    let scanner = {
        let peer = Arc::clone(&peer);
        thread::spawn(move || {
            let reads = [
                ("rfid", " E2000017221101441890ABCD ", "EPC"),
                ("scanner", "   ", "LABEL-TYPE-EAN13"),
                ("scanner", "5601234567890", "LABEL-TYPE-EAN13"),
            ];
            for (source, data, label_type) in reads {
                peer.broadcast(&scan(source, data, label_type));
                thread::sleep(Duration::from_millis(100));
            }
        })
    };

    for _ in 0..2 {
        match tokio::time::timeout(Duration::from_secs(2), scans.recv()).await {
            Ok(Some(event)) => println!(
                "Scan from {}: {} ({})",
                event.source().as_str(),
                event.payload(),
                event.label_type()
            ),
            Ok(None) => break,
            Err(_) => {
                println!("No scan within timeout");
                break;
            }
        }
    }

    scanner
        .join()
        .map_err(|_| "scanner thread panicked")?;

    bridge.dispatch("stopScan")?;
    bridge.unsubscribe(&scans);
    println!("Receivers after unsubscribe: {}", peer.receiver_count());

    Ok(())
}
