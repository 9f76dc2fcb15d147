//! Scan event types

use std::fmt;

/// Where a scan came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScanSource {
    /// Source reported by DataWedge (`scanner`, `rfid`, `msr`, ...)
    Known(String),
    /// DataWedge did not say
    Unknown,
}

impl ScanSource {
    /// Map the raw source extra. Absent or literal `"unknown"` reads as [`ScanSource::Unknown`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => ScanSource::Unknown,
            Some(value) if value.eq_ignore_ascii_case("unknown") => ScanSource::Unknown,
            Some(value) => ScanSource::Known(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScanSource::Known(name) => name,
            ScanSource::Unknown => "unknown",
        }
    }
}

/// A decoded scan
///
/// Immutable once built by the decoder. The payload is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    source: ScanSource,
    payload: String,
    label_type: String,
}

impl ScanEvent {
    pub(crate) fn new(source: ScanSource, payload: String, label_type: String) -> Self {
        Self {
            source,
            payload,
            label_type,
        }
    }

    pub fn source(&self) -> &ScanSource {
        &self.source
    }

    /// Trimmed scan data
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Symbology reported by DataWedge, possibly empty
    pub fn label_type(&self) -> &str {
        &self.label_type
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

/// Identifies one subscribe/unsubscribe cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}
