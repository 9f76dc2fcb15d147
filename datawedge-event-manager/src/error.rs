use datawedge_api::ApiError;
use thiserror::Error;

use crate::event::SubscriptionId;

/// Errors that can occur in the scan event manager
#[derive(Error, Debug)]
pub enum EventManagerError {
    /// A subscription is already active; only one consumer may listen at a time
    #[error("Already subscribed ({0})")]
    AlreadySubscribed(SubscriptionId),

    /// The peer refused to register the scan receiver
    #[error("Failed to register scan receiver: {0}")]
    Registration(#[source] ApiError),

    /// The delivery worker has stopped (manager shut down)
    #[error("Delivery worker is not running")]
    WorkerDisconnected,

    /// The delivery worker thread could not be started
    #[error("Failed to spawn delivery worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Why the decoder dropped a broadcast
///
/// Never surfaced to callers; rejections are logged and the broadcast is
/// discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeRejected {
    #[error("unexpected action '{actual}' (expected '{expected}')")]
    UnexpectedAction { expected: String, actual: String },

    #[error("scan carried no data")]
    EmptyPayload,
}

/// Result type for Event Manager operations
pub type Result<T> = std::result::Result<T, EventManagerError>;
