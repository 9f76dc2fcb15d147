//! Single-subscriber scan event manager
//!
//! Couples "a consumer is listening" to "a receiver is registered with the
//! peer". Both live in one slot guarded by a mutex, so they are created and
//! destroyed together.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use datawedge_api::{
    keys, BroadcastPeer, BroadcastReceiver, Intent, IntentFilter, ReceiverToken,
};
use parking_lot::Mutex;

use crate::decoder;
use crate::error::{EventManagerError, Result};
use crate::event::SubscriptionId;
use crate::subscription::ScanSubscription;
use crate::worker::{spawn_delivery_worker, Command};

/// Which broadcasts count as scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Action DataWedge broadcasts scans with
    /// Default: `com.tagify.tagify_app.SCAN`
    pub scan_action: String,

    /// Category attached to scan broadcasts
    /// Default: `android.intent.category.DEFAULT`
    pub scan_category: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            scan_action: keys::DEFAULT_SCAN_ACTION.to_string(),
            scan_category: keys::CATEGORY_DEFAULT.to_string(),
        }
    }
}

impl ReceiverConfig {
    fn filter(&self) -> IntentFilter {
        IntentFilter::new()
            .with_action(self.scan_action.as_str())
            .with_category(self.scan_category.as_str())
    }
}

/// Receiver registered with the peer while a subscription is active
struct ScanReceiver {
    subscription: SubscriptionId,
    scan_action: String,
    worker: mpsc::Sender<Command>,
}

impl BroadcastReceiver for ScanReceiver {
    fn on_receive(&self, intent: &Intent) {
        let Some(event) = decoder::decode(intent, &self.scan_action) else {
            return;
        };

        let command = Command::Deliver {
            id: self.subscription,
            event,
        };
        if self.worker.send(command).is_err() {
            tracing::debug!("Delivery worker gone, dropping scan for {}", self.subscription);
        }
    }
}

struct ActiveSubscription {
    id: SubscriptionId,
    token: ReceiverToken,
}

/// State shared between the manager and its subscription handles
pub(crate) struct Lifecycle {
    peer: Arc<dyn BroadcastPeer>,
    config: ReceiverConfig,
    slot: Mutex<Option<ActiveSubscription>>,
    next_id: AtomicU64,
    worker_tx: mpsc::Sender<Command>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Lifecycle {
    fn subscribe(self: &Arc<Self>) -> Result<ScanSubscription> {
        let mut slot = self.slot.lock();

        if let Some(active) = slot.as_ref() {
            tracing::debug!("Subscribe rejected, {} is still active", active.id);
            return Err(EventManagerError::AlreadySubscribed(active.id));
        }

        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sink, events) = tokio::sync::mpsc::unbounded_channel();

        // Attach first so a broadcast racing the registration is not lost
        self.worker_tx
            .send(Command::Attach { id, sink })
            .map_err(|_| EventManagerError::WorkerDisconnected)?;

        let receiver = Arc::new(ScanReceiver {
            subscription: id,
            scan_action: self.config.scan_action.clone(),
            worker: self.worker_tx.clone(),
        });

        let token = match self.peer.register_receiver(self.config.filter(), receiver) {
            Ok(token) => token,
            Err(e) => {
                let _ = self.worker_tx.send(Command::Detach { id });
                tracing::warn!("Failed to register scan receiver for {}: {}", id, e);
                return Err(EventManagerError::Registration(e));
            }
        };

        *slot = Some(ActiveSubscription { id, token });
        tracing::debug!("Scan receiver registered for {} ({})", id, token);

        Ok(ScanSubscription::new(id, events, Arc::downgrade(self)))
    }

    /// End subscription `id` if it is the active one. Anything else is a no-op.
    pub(crate) fn release(&self, id: SubscriptionId) {
        let mut slot = self.slot.lock();

        match slot.as_ref() {
            Some(active) if active.id == id => {}
            Some(active) => {
                tracing::debug!("Ignoring release of {}, {} is active", id, active.id);
                return;
            }
            None => {
                tracing::debug!("Ignoring release of {}, nothing is active", id);
                return;
            }
        }

        if let Some(active) = slot.take() {
            self.unregister(active);
        }
    }

    fn unregister(&self, active: ActiveSubscription) {
        // The peer may already have dropped the receiver; that is not our failure
        match self.peer.unregister_receiver(active.token) {
            Ok(()) => tracing::debug!("Scan receiver removed for {}", active.id),
            Err(e) => tracing::error!("Failed to remove scan receiver for {}: {}", active.id, e),
        }

        if self.worker_tx.send(Command::Detach { id: active.id }).is_err() {
            tracing::debug!("Delivery worker already stopped while detaching {}", active.id);
        }
    }

    fn teardown(&self) {
        if let Some(active) = self.slot.lock().take() {
            tracing::debug!("Tearing down active {}", active.id);
            self.unregister(active);
        }

        let Some(worker) = self.worker.lock().take() else {
            return;
        };
        let _ = self.worker_tx.send(Command::Shutdown);
        if worker.join().is_err() {
            tracing::error!("Delivery worker panicked");
        }
    }

    fn active(&self) -> Option<SubscriptionId> {
        self.slot.lock().as_ref().map(|active| active.id)
    }
}

/// Owner of the single scan subscription slot
///
/// At most one [`ScanSubscription`] is live at a time. While it is, a scan
/// receiver is registered with the peer and every decoded scan is pushed to
/// it in arrival order; without one, scans are dropped. Dropping the manager
/// unregisters any active receiver and stops the delivery thread.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use datawedge_api::LocalPeer;
/// use datawedge_event_manager::{ReceiverConfig, ScanEventManager};
///
/// let peer = Arc::new(LocalPeer::new());
/// let manager = ScanEventManager::new(peer.clone(), ReceiverConfig::default())?;
///
/// let subscription = manager.subscribe()?;
/// assert_eq!(peer.receiver_count(), 1);
///
/// manager.unsubscribe(&subscription);
/// assert_eq!(peer.receiver_count(), 0);
/// # Ok::<(), datawedge_event_manager::EventManagerError>(())
/// ```
pub struct ScanEventManager {
    inner: Arc<Lifecycle>,
}

impl ScanEventManager {
    /// Create a manager and start its delivery thread
    pub fn new(peer: Arc<dyn BroadcastPeer>, config: ReceiverConfig) -> Result<Self> {
        let (worker_tx, worker_rx) = mpsc::channel();
        let worker = spawn_delivery_worker(worker_rx)?;

        Ok(Self {
            inner: Arc::new(Lifecycle {
                peer,
                config,
                slot: Mutex::new(None),
                next_id: AtomicU64::new(0),
                worker_tx,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    /// Start listening for scans
    ///
    /// Fails with [`EventManagerError::AlreadySubscribed`] while another
    /// subscription is active.
    pub fn subscribe(&self) -> Result<ScanSubscription> {
        self.inner.subscribe()
    }

    /// Stop listening
    ///
    /// Idempotent. A handle from an earlier subscription, or from another
    /// manager, does not affect the current one. Deregistration failures are
    /// logged, never returned.
    pub fn unsubscribe(&self, subscription: &ScanSubscription) {
        if !subscription.issued_by(&self.inner) {
            tracing::debug!(
                "Ignoring unsubscribe of {} from another manager",
                subscription.id()
            );
            return;
        }
        self.inner.release(subscription.id());
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner.active().is_some()
    }

    pub fn active_subscription(&self) -> Option<SubscriptionId> {
        self.inner.active()
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.inner.config
    }

    /// Unregister any active receiver and stop the delivery thread
    ///
    /// Called automatically on drop. Later subscribe calls fail with
    /// [`EventManagerError::WorkerDisconnected`].
    pub fn shutdown(&self) {
        self.inner.teardown();
    }
}

impl Drop for ScanEventManager {
    fn drop(&mut self) {
        tracing::debug!(
            "ScanEventManager dropping, active subscription: {:?}",
            self.inner.active()
        );
        self.inner.teardown();
    }
}

impl fmt::Debug for ScanEventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanEventManager")
            .field("config", &self.inner.config)
            .field("active", &self.inner.active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datawedge_api::{LocalPeer, PeerFaults};

    fn manager() -> (Arc<LocalPeer>, ScanEventManager) {
        let peer = Arc::new(LocalPeer::new());
        let manager = ScanEventManager::new(peer.clone(), ReceiverConfig::default()).unwrap();
        (peer, manager)
    }

    #[test]
    fn test_subscribe_registers_receiver() {
        let (peer, manager) = manager();
        assert!(!manager.is_subscribed());

        let subscription = manager.subscribe().unwrap();
        assert!(manager.is_subscribed());
        assert_eq!(manager.active_subscription(), Some(subscription.id()));
        assert_eq!(peer.receiver_count(), 1);
    }

    #[test]
    fn test_second_subscribe_rejected() {
        let (peer, manager) = manager();
        let first = manager.subscribe().unwrap();

        let second = manager.subscribe();
        assert!(matches!(
            second,
            Err(EventManagerError::AlreadySubscribed(id)) if id == first.id()
        ));
        assert_eq!(peer.receiver_count(), 1);
        assert_eq!(peer.registrations_total(), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let (peer, manager) = manager();
        let subscription = manager.subscribe().unwrap();

        manager.unsubscribe(&subscription);
        manager.unsubscribe(&subscription);
        assert!(!manager.is_subscribed());
        assert_eq!(peer.receiver_count(), 0);
    }

    #[test]
    fn test_stale_handle_leaves_new_subscription_alone() {
        let (peer, manager) = manager();
        let old = manager.subscribe().unwrap();
        manager.unsubscribe(&old);

        let current = manager.subscribe().unwrap();
        drop(old);

        assert_eq!(manager.active_subscription(), Some(current.id()));
        assert_eq!(peer.receiver_count(), 1);
    }

    #[test]
    fn test_failed_registration_leaves_slot_empty() {
        let (peer, manager) = manager();
        peer.set_faults(PeerFaults {
            fail_register: true,
            ..Default::default()
        });

        assert!(matches!(
            manager.subscribe(),
            Err(EventManagerError::Registration(_))
        ));
        assert!(!manager.is_subscribed());

        peer.set_faults(PeerFaults::default());
        assert!(manager.subscribe().is_ok());
    }

    #[test]
    fn test_failed_unregister_is_swallowed() {
        let (peer, manager) = manager();
        let subscription = manager.subscribe().unwrap();
        peer.set_faults(PeerFaults {
            fail_unregister: true,
            ..Default::default()
        });

        manager.unsubscribe(&subscription);
        assert!(!manager.is_subscribed());
    }

    #[test]
    fn test_foreign_handle_leaves_subscription_alone() {
        let (peer_a, manager_a) = manager();
        let (peer_b, manager_b) = manager();
        let sub_a = manager_a.subscribe().unwrap();
        let sub_b = manager_b.subscribe().unwrap();
        assert_eq!(sub_a.id(), sub_b.id());

        manager_b.unsubscribe(&sub_a);
        assert!(manager_b.is_subscribed());
        assert_eq!(peer_b.receiver_count(), 1);

        manager_a.unsubscribe(&sub_a);
        assert!(!manager_a.is_subscribed());
        assert_eq!(peer_a.receiver_count(), 0);
        assert!(manager_b.is_subscribed());
    }

    #[test]
    fn test_teardown_swallows_failed_unregister() {
        let (peer, manager) = manager();
        let mut subscription = manager.subscribe().unwrap();
        peer.set_faults(PeerFaults {
            fail_unregister: true,
            ..Default::default()
        });

        manager.shutdown();
        assert!(!manager.is_subscribed());
        assert!(subscription.blocking_recv().is_none());
    }

    #[test]
    fn test_drop_swallows_failed_unregister() {
        let (peer, manager) = manager();
        let mut subscription = manager.subscribe().unwrap();
        peer.set_faults(PeerFaults {
            fail_unregister: true,
            ..Default::default()
        });

        drop(manager);
        assert!(subscription.blocking_recv().is_none());
    }

    #[test]
    fn test_drop_unregisters_receiver() {
        let (peer, manager) = manager();
        let _subscription = manager.subscribe().unwrap();
        assert_eq!(peer.receiver_count(), 1);

        drop(manager);
        assert_eq!(peer.receiver_count(), 0);
    }

    #[test]
    fn test_subscribe_after_shutdown_fails() {
        let (_peer, manager) = manager();
        manager.shutdown();
        manager.shutdown();

        assert!(matches!(
            manager.subscribe(),
            Err(EventManagerError::WorkerDisconnected)
        ));
    }
}
