use thiserror::Error;

/// High-level API errors for DataWedge operations
///
/// The peer never answers a request within the same call, so every variant
/// here describes something that went wrong on our side of the broadcast
/// channel: building the message, handing it to the platform, or managing a
/// receiver registration.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Outbound broadcast could not be constructed or handed to the peer
    ///
    /// Covers platform send failures as well as bundle construction issues
    /// detected while serializing a request.
    #[error("Failed to send broadcast to DataWedge: {0}")]
    PeerSendFailure(String),

    /// Receiver registration with the peer failed
    #[error("Receiver registration failed: {0}")]
    Registration(String),

    /// Receiver deregistration failed
    ///
    /// Usually means the receiver was already removed, for example because the
    /// peer tore down first.
    #[error("Receiver deregistration failed: {0}")]
    Unregistration(String),

    /// Invalid parameter value
    ///
    /// Returned when a request carries a value DataWedge would reject, such as
    /// an empty profile or package name.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
