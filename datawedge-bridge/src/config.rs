//! Configuration for the scanner bridge
//!
//! Everything the bridge needs to know about its host and the DataWedge
//! profile it pushes. Nothing here is read from the environment.

use datawedge_api::{keys, ProfileConfigurator};
use datawedge_event_manager::ReceiverConfig;

/// Vendor name fragments identifying DataWedge-capable hardware
pub const DEFAULT_VENDOR_ALLOW_LIST: &[&str] = &["zebra", "symbol"];

/// Configuration for the ScannerBridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Package the DataWedge profile is bound to
    /// Default: `com.tagify.tagify_app`
    pub package_name: String,

    /// Vendor identity reported by the host device
    /// Default: empty (not a DataWedge device)
    pub manufacturer: String,

    /// Name of the DataWedge profile
    /// Default: `Tagify_Profile`
    pub profile_name: String,

    /// Action DataWedge broadcasts scans with
    /// Default: `com.tagify.tagify_app.SCAN`
    pub scan_action: String,

    /// Category DataWedge attaches to scans
    /// Default: `android.intent.category.DEFAULT`
    pub scan_category: String,

    /// Ask DataWedge to broadcast the outcome of configuration requests
    /// Default: true
    pub send_result: bool,

    /// Push the profile when the bridge is created
    /// Default: true
    pub configure_on_start: bool,

    /// Lowercase vendor fragments that mark the host as supported
    /// Default: `["zebra", "symbol"]`
    pub vendor_allow_list: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            package_name: keys::DEFAULT_PACKAGE_NAME.to_string(),
            manufacturer: String::new(),
            profile_name: keys::DEFAULT_PROFILE_NAME.to_string(),
            scan_action: keys::DEFAULT_SCAN_ACTION.to_string(),
            scan_category: keys::CATEGORY_DEFAULT.to_string(),
            send_result: true,
            configure_on_start: true,
            vendor_allow_list: DEFAULT_VENDOR_ALLOW_LIST
                .iter()
                .map(|vendor| vendor.to_string())
                .collect(),
        }
    }
}

impl BridgeConfig {
    /// Create a new BridgeConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = profile_name.into();
        self
    }

    pub fn with_scan_action(mut self, scan_action: impl Into<String>) -> Self {
        self.scan_action = scan_action.into();
        self
    }

    pub fn with_send_result(mut self, send_result: bool) -> Self {
        self.send_result = send_result;
        self
    }

    pub fn with_configure_on_start(mut self, configure_on_start: bool) -> Self {
        self.configure_on_start = configure_on_start;
        self
    }

    /// Receiver settings for the event manager
    pub fn receiver_config(&self) -> ReceiverConfig {
        ReceiverConfig {
            scan_action: self.scan_action.clone(),
            scan_category: self.scan_category.clone(),
        }
    }

    /// Profile configurator matching this configuration
    pub fn profile_configurator(&self) -> ProfileConfigurator {
        ProfileConfigurator {
            profile_name: self.profile_name.clone(),
            package_name: self.package_name.clone(),
            scan_action: self.scan_action.clone(),
            scan_category: self.scan_category.clone(),
            send_result: self.send_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.package_name, "com.tagify.tagify_app");
        assert_eq!(config.profile_name, "Tagify_Profile");
        assert!(config.send_result);
        assert!(config.configure_on_start);
        assert_eq!(config.vendor_allow_list, vec!["zebra", "symbol"]);
    }

    #[test]
    fn test_derived_configs_share_scan_action() {
        let config = BridgeConfig::new().with_scan_action("com.example.SCAN");

        assert_eq!(config.receiver_config().scan_action, "com.example.SCAN");
        assert_eq!(config.profile_configurator().scan_action, "com.example.SCAN");
        assert_eq!(
            config.profile_configurator().scan_category,
            config.receiver_config().scan_category
        );
    }
}
