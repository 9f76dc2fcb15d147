//! High-level DataWedge API for scanner control
//!
//! This crate provides a type-safe, trait-based API for talking to the Zebra
//! DataWedge service. DataWedge is an opaque broadcast peer: requests go out as
//! fire-and-forget intents and scans come back as broadcasts, so nothing in this
//! crate waits for an acknowledgement.
//!
//! # Sending operations
//!
//! ```rust
//! use std::sync::Arc;
//! use datawedge_api::{DataWedgeClient, LocalPeer, TriggerAction};
//!
//! let peer = Arc::new(LocalPeer::new());
//! let client = DataWedgeClient::new(peer.clone());
//!
//! // Success means the broadcast was sent, not that the scanner reacted
//! client.soft_scan_trigger(TriggerAction::Start)?;
//! assert_eq!(peer.sent_intents().len(), 1);
//! # Ok::<(), datawedge_api::ApiError>(())
//! ```
//!
//! # Profiles
//!
//! [`ProfileConfigurator`] builds the strongly-typed [`DeviceProfile`] the bridge
//! relies on and converts it to the nested bundle DataWedge expects only at the
//! wire boundary.

pub mod client;
pub mod configurator;
pub mod error;
pub mod intent;
pub mod keys;
pub mod local;
pub mod operation;
pub mod operations;
pub mod peer;
pub mod profile;

pub use client::DataWedgeClient;
pub use configurator::ProfileConfigurator;
pub use error::{ApiError, Result};
pub use intent::{Bundle, Extra, Intent, IntentFilter};
pub use local::{LocalPeer, PeerFaults};
pub use operation::DataWedgeOperation;
pub use operations::{SetConfigOperation, SoftScanTriggerOperation, TriggerAction};
pub use peer::{BroadcastPeer, BroadcastReceiver, ReceiverToken};
pub use profile::{AppBinding, ConfigMode, DeviceProfile, PluginConfig, PluginName};
