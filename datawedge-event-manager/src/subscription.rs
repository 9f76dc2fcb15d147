//! Subscriber side of the scan stream
//!
//! A [`ScanSubscription`] can be consumed asynchronously (`recv().await` or
//! as a [`futures::Stream`]) or from a plain thread (`blocking_recv`,
//! `try_recv`). The stream ends once the subscription is released.

use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event::{ScanEvent, SubscriptionId};
use crate::manager::Lifecycle;

/// Live handle for the active scan subscription
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct ScanSubscription {
    id: SubscriptionId,
    events: UnboundedReceiver<ScanEvent>,
    lifecycle: Weak<Lifecycle>,
}

impl ScanSubscription {
    pub(crate) fn new(
        id: SubscriptionId,
        events: UnboundedReceiver<ScanEvent>,
        lifecycle: Weak<Lifecycle>,
    ) -> Self {
        Self {
            id,
            events,
            lifecycle,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether this handle was issued by `lifecycle`
    pub(crate) fn issued_by(&self, lifecycle: &Arc<Lifecycle>) -> bool {
        Weak::ptr_eq(&self.lifecycle, &Arc::downgrade(lifecycle))
    }

    /// Wait for the next scan
    ///
    /// Returns `None` once the subscription has ended and pending scans are drained.
    pub async fn recv(&mut self) -> Option<ScanEvent> {
        self.events.recv().await
    }

    /// Block until the next scan is available
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_recv(&mut self) -> Option<ScanEvent> {
        self.events.blocking_recv()
    }

    /// Take a scan if one is ready
    pub fn try_recv(&mut self) -> Option<ScanEvent> {
        self.events.try_recv().ok()
    }

    /// Non-blocking iterator over scans that are already queued
    pub fn try_iter(&mut self) -> TryIter<'_> {
        TryIter { inner: self }
    }

    /// Blocking iterator that ends with the subscription
    pub fn blocking_iter(&mut self) -> BlockingIter<'_> {
        BlockingIter { inner: self }
    }

    /// Unsubscribe explicitly. Same as dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Stream for ScanSubscription {
    type Item = ScanEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for ScanSubscription {
    fn drop(&mut self) {
        if let Some(lifecycle) = self.lifecycle.upgrade() {
            lifecycle.release(self.id);
        }
    }
}

/// Non-blocking iterator over queued scans
pub struct TryIter<'a> {
    inner: &'a mut ScanSubscription,
}

impl<'a> Iterator for TryIter<'a> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

/// Blocking iterator over scans
pub struct BlockingIter<'a> {
    inner: &'a mut ScanSubscription,
}

impl<'a> Iterator for BlockingIter<'a> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.blocking_recv()
    }
}
