//! In-memory broadcast peer
//!
//! Stands in for the platform in tests and demos: it records every outbound
//! broadcast and dispatches simulated scanner broadcasts to registered
//! receivers. Individual operations can be made to fail through
//! [`PeerFaults`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{ApiError, Result};
use crate::intent::{Intent, IntentFilter};
use crate::peer::{BroadcastPeer, BroadcastReceiver, ReceiverToken};

/// Failure injection switches for [`LocalPeer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerFaults {
    pub fail_send: bool,
    pub fail_register: bool,
    /// Deregistration fails and the receiver stays registered
    pub fail_unregister: bool,
}

struct Registration {
    token: ReceiverToken,
    filter: IntentFilter,
    receiver: Arc<dyn BroadcastReceiver>,
}

/// Simple in-memory peer for tests and non-device contexts
#[derive(Default)]
pub struct LocalPeer {
    receivers: RwLock<Vec<Registration>>,
    sent: Mutex<Vec<Intent>>,
    faults: Mutex<PeerFaults>,
    next_token: AtomicU64,
    registrations_total: AtomicU64,
}

impl LocalPeer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_faults(&self, faults: PeerFaults) {
        *self.faults.lock() = faults;
    }

    /// Simulate a broadcast from the scanner service
    ///
    /// Dispatches synchronously to every matching receiver, in registration
    /// order, and returns how many receivers saw it.
    pub fn broadcast(&self, intent: &Intent) -> usize {
        // Snapshot so receivers may (un)register without deadlocking
        let targets: Vec<Arc<dyn BroadcastReceiver>> = self
            .receivers
            .read()
            .iter()
            .filter(|registration| registration.filter.matches(intent))
            .map(|registration| Arc::clone(&registration.receiver))
            .collect();

        for receiver in &targets {
            receiver.on_receive(intent);
        }
        targets.len()
    }

    /// Every broadcast sent through [`BroadcastPeer::send_broadcast`], oldest first
    pub fn sent_intents(&self) -> Vec<Intent> {
        self.sent.lock().clone()
    }

    /// Drain recorded outbound broadcasts
    pub fn take_sent(&self) -> Vec<Intent> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Number of currently registered receivers
    pub fn receiver_count(&self) -> usize {
        self.receivers.read().len()
    }

    /// Number of successful registrations over the peer's lifetime
    pub fn registrations_total(&self) -> u64 {
        self.registrations_total.load(Ordering::SeqCst)
    }
}

impl BroadcastPeer for LocalPeer {
    fn send_broadcast(&self, intent: &Intent) -> Result<()> {
        if self.faults.lock().fail_send {
            return Err(ApiError::PeerSendFailure(format!(
                "local peer rejected broadcast '{}'",
                intent.action()
            )));
        }
        self.sent.lock().push(intent.clone());
        Ok(())
    }

    fn register_receiver(
        &self,
        filter: IntentFilter,
        receiver: Arc<dyn BroadcastReceiver>,
    ) -> Result<ReceiverToken> {
        if self.faults.lock().fail_register {
            return Err(ApiError::Registration(
                "local peer refused receiver registration".to_string(),
            ));
        }

        let token = ReceiverToken::new(self.next_token.fetch_add(1, Ordering::SeqCst));
        self.receivers.write().push(Registration {
            token,
            filter,
            receiver,
        });
        self.registrations_total.fetch_add(1, Ordering::SeqCst);
        Ok(token)
    }

    fn unregister_receiver(&self, token: ReceiverToken) -> Result<()> {
        if self.faults.lock().fail_unregister {
            return Err(ApiError::Unregistration(format!(
                "local peer failed to remove {}",
                token
            )));
        }

        let mut receivers = self.receivers.write();
        let before = receivers.len();
        receivers.retain(|registration| registration.token != token);
        if receivers.len() == before {
            return Err(ApiError::Unregistration(format!(
                "Receiver not registered: {}",
                token
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for LocalPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPeer")
            .field("receivers", &self.receiver_count())
            .field("sent", &self.sent.lock().len())
            .field("faults", &*self.faults.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl BroadcastReceiver for Recorder {
        fn on_receive(&self, intent: &Intent) {
            self.seen.lock().push(intent.action().to_string());
        }
    }

    #[test]
    fn test_broadcast_reaches_matching_receivers_only() {
        let peer = LocalPeer::new();
        let recorder = Arc::new(Recorder::default());
        peer.register_receiver(IntentFilter::new().with_action("scan"), recorder.clone())
            .unwrap();

        assert_eq!(peer.broadcast(&Intent::new("scan")), 1);
        assert_eq!(peer.broadcast(&Intent::new("other")), 0);
        assert_eq!(*recorder.seen.lock(), vec!["scan".to_string()]);
    }

    #[test]
    fn test_unregister_unknown_token_fails() {
        let peer = LocalPeer::new();
        let result = peer.unregister_receiver(ReceiverToken::new(42));
        assert!(matches!(result, Err(ApiError::Unregistration(_))));
    }

    #[test]
    fn test_failed_unregister_keeps_receiver() {
        let peer = LocalPeer::new();
        let filter = IntentFilter::new().with_action("scan");
        let token = peer
            .register_receiver(filter, Arc::new(Recorder::default()))
            .unwrap();

        peer.set_faults(PeerFaults {
            fail_unregister: true,
            ..Default::default()
        });
        assert!(peer.unregister_receiver(token).is_err());
        assert_eq!(peer.receiver_count(), 1);

        peer.set_faults(PeerFaults::default());
        peer.unregister_receiver(token).unwrap();
        assert_eq!(peer.receiver_count(), 0);
        assert_eq!(peer.registrations_total(), 1);
    }

    #[test]
    fn test_take_sent_drains() {
        let peer = LocalPeer::new();
        peer.send_broadcast(&Intent::new("a")).unwrap();
        assert_eq!(peer.take_sent().len(), 1);
        assert!(peer.sent_intents().is_empty());
    }
}
