//! Scan decoder - converts raw DataWedge broadcasts to typed scan events
//!
//! Decoding is pure: the same intent always yields the same result, and a
//! rejected intent is simply dropped.

use datawedge_api::{keys, Intent};

use crate::error::DecodeRejected;
use crate::event::{ScanEvent, ScanSource};

/// Decode a broadcast into a scan event
///
/// Returns `None` for broadcasts with another action or without scan data.
/// Rejections are logged at debug level.
pub fn decode(intent: &Intent, expected_action: &str) -> Option<ScanEvent> {
    match try_decode(intent, expected_action) {
        Ok(event) => Some(event),
        Err(reason) => {
            tracing::debug!(action = intent.action(), %reason, "Dropping broadcast");
            None
        }
    }
}

/// Decode a broadcast, reporting why it was rejected
pub fn try_decode(intent: &Intent, expected_action: &str) -> Result<ScanEvent, DecodeRejected> {
    if intent.action() != expected_action {
        return Err(DecodeRejected::UnexpectedAction {
            expected: expected_action.to_string(),
            actual: intent.action().to_string(),
        });
    }

    let source = intent.string_extra(keys::EXTRA_SOURCE).unwrap_or("unknown");
    let data = intent.string_extra(keys::EXTRA_DATA_STRING).unwrap_or("");
    let label_type = intent.string_extra(keys::EXTRA_LABEL_TYPE).unwrap_or("");

    tracing::trace!(source, data, label_type, "Scan broadcast received");

    let payload = data.trim();
    if payload.is_empty() {
        return Err(DecodeRejected::EmptyPayload);
    }

    Ok(ScanEvent::new(
        ScanSource::from_raw(Some(source)),
        payload.to_string(),
        label_type.to_string(),
    ))
}
