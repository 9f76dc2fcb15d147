//! Profile configurator
//!
//! Builds the fixed profile the bridge needs from DataWedge and pushes it.
//! The profile is created only if missing and every plugin is sent with
//! `RESET_CONFIG=true`, so re-running configuration always converges on the
//! same state.

use crate::client::DataWedgeClient;
use crate::keys;
use crate::profile::{AppBinding, ConfigMode, DeviceProfile, PluginConfig, PluginName};
use crate::Result;

/// `intent_delivery` value selecting broadcast delivery
const INTENT_DELIVERY_BROADCAST: &str = "2";

/// Builds and sends the bridge's DataWedge profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfigurator {
    pub profile_name: String,
    pub package_name: String,
    pub scan_action: String,
    pub scan_category: String,
    pub send_result: bool,
}

impl Default for ProfileConfigurator {
    fn default() -> Self {
        Self {
            profile_name: keys::DEFAULT_PROFILE_NAME.to_string(),
            package_name: keys::DEFAULT_PACKAGE_NAME.to_string(),
            scan_action: keys::DEFAULT_SCAN_ACTION.to_string(),
            scan_category: keys::CATEGORY_DEFAULT.to_string(),
            send_result: true,
        }
    }
}

impl ProfileConfigurator {
    /// Build the profile
    ///
    /// Plugins are emitted in a fixed order: intent output, barcode, RFID.
    pub fn build_profile(&self) -> DeviceProfile {
        let intent_output = PluginConfig::new(PluginName::Intent)
            .with_param("intent_output_enabled", "true")
            .with_param("intent_action", self.scan_action.as_str())
            .with_param("intent_category", self.scan_category.as_str())
            .with_param("intent_delivery", INTENT_DELIVERY_BROADCAST);

        let barcode = PluginConfig::new(PluginName::Barcode)
            .with_param("scanner_input_enabled", "true")
            .with_param("scanner_selection", "auto");

        let rfid = PluginConfig::new(PluginName::Rfid)
            .with_param("rfid_input_enabled", "true")
            .with_param("rfid_beeper_enable", "true")
            .with_param("rfid_led_enable", "true");

        DeviceProfile {
            profile_name: self.profile_name.clone(),
            enabled: true,
            config_mode: ConfigMode::CreateIfNotExist,
            app_binding: AppBinding::all_activities(self.package_name.as_str()),
            plugins: vec![intent_output, barcode, rfid],
        }
    }

    /// Build the profile and send it through `client`
    ///
    /// Returns the profile that was sent. Success means the configuration
    /// broadcast went out; DataWedge applies it asynchronously.
    pub fn configure(&self, client: &DataWedgeClient) -> Result<DeviceProfile> {
        let profile = self.build_profile();
        client.set_config(profile.clone(), self.send_result)?;
        tracing::debug!(profile = %profile.profile_name, "DataWedge profile sent");
        Ok(profile)
    }
}
