//! # DataWedge Bridge
//!
//! Connects the Zebra DataWedge scanner service to a single in-process
//! consumer: a live stream of decoded scans plus a small command surface.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use datawedge_api::LocalPeer;
//! use datawedge_bridge::{BridgeConfig, ScannerBridge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), datawedge_bridge::BridgeError> {
//!     // A real host supplies a platform BroadcastPeer instead
//!     let peer = Arc::new(LocalPeer::new());
//!     let bridge = ScannerBridge::new(peer, BridgeConfig::default())?;
//!
//!     let mut scans = bridge.subscribe()?;
//!     bridge.dispatch("startScan")?;
//!
//!     while let Some(scan) = scans.recv().await {
//!         println!("Scanned: {}", scan.payload());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Commands
//!
//! | Name | Effect |
//! |------|--------|
//! | `startScan` | Soft trigger `START_SCANNING` |
//! | `stopScan` | Soft trigger `STOP_SCANNING` |
//! | `isAvailable` | Vendor check, no broadcast |
//! | `configureDataWedge` | Push the bridge's profile |
//!
//! Any other name fails with [`BridgeError::NotImplemented`].
//!
//! ## Architecture
//!
//! ```text
//! datawedge-bridge (commands + facade)
//!     ↓
//! datawedge-event-manager (subscription lifecycle, decoding, delivery)
//!     ↓
//! datawedge-api (intents, operations, profiles, BroadcastPeer)
//! ```

pub use bridge::ScannerBridge;
pub use command::{Command, CommandOutcome};
pub use config::{BridgeConfig, DEFAULT_VENDOR_ALLOW_LIST};
pub use error::{BridgeError, Result};

// Re-export commonly used types from the lower layers
pub use datawedge_api::{BroadcastPeer, DeviceProfile};
pub use datawedge_event_manager::{ScanEvent, ScanSource, ScanSubscription};

pub mod availability;
pub mod logging;

mod bridge;
mod command;
mod config;
mod error;
