//! DataWedge API operations
//!
//! One module per API extra the bridge uses.

pub mod set_config;
pub mod soft_scan_trigger;

pub use set_config::{SetConfigOperation, SetConfigRequest};
pub use soft_scan_trigger::{SoftScanTriggerOperation, SoftScanTriggerRequest, TriggerAction};
