//! The seam between the bridge and the broadcast platform
//!
//! Everything platform specific (sending broadcasts, registering receivers)
//! lives behind [`BroadcastPeer`]. The bridge never assumes a response: a
//! successful call only means the platform accepted the request.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::intent::{Intent, IntentFilter};

/// Opaque handle identifying a registered receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverToken(u64);

impl ReceiverToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReceiverToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiver-{}", self.0)
    }
}

/// Callback invoked by the peer for every matching broadcast
///
/// Called on whatever thread the platform dispatches broadcasts from, so
/// implementations must hand work off instead of blocking.
pub trait BroadcastReceiver: Send + Sync {
    fn on_receive(&self, intent: &Intent);
}

/// Fire-and-forget broadcast channel to the scanner service
pub trait BroadcastPeer: Send + Sync {
    /// Send a broadcast. Returns once the platform accepted it.
    fn send_broadcast(&self, intent: &Intent) -> Result<()>;

    /// Register a receiver for broadcasts matching `filter`
    fn register_receiver(
        &self,
        filter: IntentFilter,
        receiver: Arc<dyn BroadcastReceiver>,
    ) -> Result<ReceiverToken>;

    /// Remove a previously registered receiver
    ///
    /// Fails when the token is unknown, e.g. because the receiver was already
    /// removed.
    fn unregister_receiver(&self, token: ReceiverToken) -> Result<()>;
}
