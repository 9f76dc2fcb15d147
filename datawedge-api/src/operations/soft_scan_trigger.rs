//! Soft scan trigger operation

use crate::intent::Extra;
use crate::{keys, DataWedgeOperation, Result};

/// Soft trigger commands the bridge issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Start,
    Stop,
}

impl TriggerAction {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerAction::Start => "START_SCANNING",
            TriggerAction::Stop => "STOP_SCANNING",
        }
    }
}

/// Soft scan trigger operation
pub struct SoftScanTriggerOperation;

/// Request for soft scan trigger operation
#[derive(Debug, Clone, Copy)]
pub struct SoftScanTriggerRequest {
    pub action: TriggerAction,
}

impl DataWedgeOperation for SoftScanTriggerOperation {
    type Request = SoftScanTriggerRequest;

    const API_EXTRA: &'static str = keys::EXTRA_SOFT_SCAN_TRIGGER;

    fn build_value(request: &Self::Request) -> Result<Extra> {
        Ok(Extra::from(request.action.name()))
    }
}
