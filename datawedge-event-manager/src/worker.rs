//! Delivery worker thread
//!
//! Broadcasts arrive on whatever thread the platform uses. The worker is the
//! single thread that hands scan events to the subscriber, so delivery order
//! equals arrival order and the subscriber never runs on a platform thread.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::UnboundedSender;

use crate::event::{ScanEvent, SubscriptionId};

/// Messages sent to the delivery worker
#[derive(Debug)]
pub(crate) enum Command {
    /// Start forwarding events tagged with `id` to `sink`
    Attach {
        id: SubscriptionId,
        sink: UnboundedSender<ScanEvent>,
    },
    /// Stop forwarding for `id` and close its sink
    Detach { id: SubscriptionId },
    /// A decoded scan for subscription `id`
    Deliver { id: SubscriptionId, event: ScanEvent },
    /// Stop the worker
    Shutdown,
}

/// Spawns the delivery worker thread
pub(crate) fn spawn_delivery_worker(
    commands: mpsc::Receiver<Command>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("datawedge-delivery".to_string())
        .spawn(move || run_delivery_loop(commands))
}

fn run_delivery_loop(commands: mpsc::Receiver<Command>) {
    let mut attached: Option<(SubscriptionId, UnboundedSender<ScanEvent>)> = None;

    tracing::info!("Delivery worker started");

    while let Ok(command) = commands.recv() {
        match command {
            Command::Attach { id, sink } => {
                if let Some((previous, _)) = attached.replace((id, sink)) {
                    tracing::warn!("Delivery sink for {} replaced by {}", previous, id);
                }
                tracing::debug!("Worker: attached {}", id);
            }
            Command::Detach { id } => match &attached {
                Some((current, _)) if *current == id => {
                    // Dropping the sender ends the subscriber's stream
                    attached = None;
                    tracing::debug!("Worker: detached {}", id);
                }
                _ => tracing::debug!("Worker: {} was not attached", id),
            },
            Command::Deliver { id, event } => match &attached {
                Some((current, sink)) if *current == id => {
                    if sink.send(event).is_err() {
                        tracing::debug!("Subscriber for {} dropped its receiver", id);
                    }
                }
                _ => tracing::debug!("Dropping scan for inactive {}", id),
            },
            Command::Shutdown => {
                tracing::info!("Worker received shutdown command");
                break;
            }
        }
    }

    tracing::info!("Delivery worker shut down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScanSource;

    fn event(payload: &str) -> ScanEvent {
        ScanEvent::new(ScanSource::Unknown, payload.to_string(), String::new())
    }

    #[test]
    fn test_forwards_only_attached_subscription() {
        let (tx, rx) = mpsc::channel();
        let worker = spawn_delivery_worker(rx).unwrap();
        let (sink, mut events) = tokio::sync::mpsc::unbounded_channel();

        let active = SubscriptionId::new(1);
        let stale = SubscriptionId::new(0);
        tx.send(Command::Attach { id: active, sink }).unwrap();
        tx.send(Command::Deliver { id: stale, event: event("old") }).unwrap();
        tx.send(Command::Deliver { id: active, event: event("new") }).unwrap();
        tx.send(Command::Detach { id: active }).unwrap();
        tx.send(Command::Deliver { id: active, event: event("late") }).unwrap();
        tx.send(Command::Shutdown).unwrap();
        worker.join().unwrap();

        assert_eq!(events.blocking_recv().map(ScanEvent::into_payload), Some("new".to_string()));
        assert_eq!(events.blocking_recv(), None);
    }

    #[test]
    fn test_worker_exits_when_senders_dropped() {
        let (tx, rx) = mpsc::channel::<Command>();
        let worker = spawn_delivery_worker(rx).unwrap();
        drop(tx);
        worker.join().unwrap();
    }

    #[test]
    fn test_command_debug() {
        let cmd = Command::Detach {
            id: SubscriptionId::new(4),
        };
        assert!(format!("{:?}", cmd).contains("Detach"));
    }
}
