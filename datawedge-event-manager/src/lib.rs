//! # DataWedge Event Manager
//!
//! Turns DataWedge scan broadcasts into a live stream for exactly one consumer.
//!
//! ## Overview
//!
//! - **Single subscriber**: one [`ScanSubscription`] at a time; a second
//!   subscribe fails with [`EventManagerError::AlreadySubscribed`]
//! - **Lock-step lifecycle**: a scan receiver is registered with the peer if
//!   and only if a subscription is active
//! - **Decoding**: broadcasts are checked against the scan action and turned
//!   into [`ScanEvent`]s with a trimmed, non-empty payload
//! - **Dedicated delivery thread**: scans reach the subscriber in arrival order
//!   from one thread, regardless of which thread the platform used
//! - **Live only**: scans arriving with no subscriber are dropped, never buffered
//!
//! ## Usage
//!
//! ```rust,ignore
//! use datawedge_event_manager::{ReceiverConfig, ScanEventManager};
//!
//! let manager = ScanEventManager::new(peer, ReceiverConfig::default())?;
//! let mut subscription = manager.subscribe()?;
//!
//! while let Some(scan) = subscription.recv().await {
//!     println!("Scanned {} via {}", scan.payload(), scan.source().as_str());
//! }
//! ```

pub mod decoder;
pub mod error;
pub mod event;
pub mod manager;
pub mod subscription;
mod worker;

// Re-export main types for convenience
pub use error::{DecodeRejected, EventManagerError, Result};
pub use event::{ScanEvent, ScanSource, SubscriptionId};
pub use manager::{ReceiverConfig, ScanEventManager};
pub use subscription::ScanSubscription;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EventManagerError, ReceiverConfig, Result, ScanEvent, ScanEventManager, ScanSource,
        ScanSubscription, SubscriptionId,
    };
}
