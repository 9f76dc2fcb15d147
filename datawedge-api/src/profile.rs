//! Strongly-typed DataWedge profile configuration
//!
//! Profiles are built as plain Rust values and only turned into the nested
//! bundle layout DataWedge understands by [`DeviceProfile::to_bundle`].

use std::collections::BTreeMap;

use crate::error::{ApiError, Result};
use crate::intent::{Bundle, Extra};

/// Input/output plugins configurable through a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginName {
    /// Intent output: how scans are delivered back to the app
    Intent,
    /// Barcode scanner input
    Barcode,
    /// RFID reader input
    Rfid,
}

impl PluginName {
    /// Get the name DataWedge uses for this plugin
    pub fn name(&self) -> &'static str {
        match self {
            PluginName::Intent => "INTENT",
            PluginName::Barcode => "BARCODE",
            PluginName::Rfid => "RFID",
        }
    }
}

/// How DataWedge should treat an incoming profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigMode {
    /// Create the profile unless it exists; re-sending is harmless
    #[default]
    CreateIfNotExist,
}

impl ConfigMode {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigMode::CreateIfNotExist => "CREATE_IF_NOT_EXIST",
        }
    }
}

/// Binds a profile to an application and a set of its activities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBinding {
    pub package_name: String,
    pub activities: Vec<String>,
}

impl AppBinding {
    /// Bind every activity of `package_name`
    pub fn all_activities(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            activities: vec!["*".to_string()],
        }
    }

    fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.insert("PACKAGE_NAME".to_string(), Extra::from(self.package_name.as_str()));
        bundle.insert(
            "ACTIVITY_LIST".to_string(),
            Extra::StringArray(self.activities.clone()),
        );
        bundle
    }
}

/// Configuration for one plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub plugin: PluginName,
    /// Replace the plugin's whole configuration rather than merging into it
    pub reset_config: bool,
    pub params: BTreeMap<String, String>,
}

impl PluginConfig {
    /// Create a plugin config with full-overwrite semantics and no params
    pub fn new(plugin: PluginName) -> Self {
        Self {
            plugin,
            reset_config: true,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn to_bundle(&self) -> Bundle {
        let params: Bundle = self
            .params
            .iter()
            .map(|(key, value)| (key.clone(), Extra::from(value.as_str())))
            .collect();

        let mut bundle = Bundle::new();
        bundle.insert("PLUGIN_NAME".to_string(), Extra::from(self.plugin.name()));
        bundle.insert(
            "RESET_CONFIG".to_string(),
            Extra::from(bool_str(self.reset_config)),
        );
        bundle.insert("PARAM_LIST".to_string(), Extra::Bundle(params));
        bundle
    }
}

/// A named DataWedge profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub profile_name: String,
    pub enabled: bool,
    pub config_mode: ConfigMode,
    pub app_binding: AppBinding,
    /// Emitted in this order
    pub plugins: Vec<PluginConfig>,
}

impl DeviceProfile {
    /// Check the profile for values DataWedge would reject
    pub fn validate(&self) -> Result<()> {
        if self.profile_name.trim().is_empty() {
            return Err(ApiError::InvalidParameter(
                "profile name must not be empty".to_string(),
            ));
        }
        if self.app_binding.package_name.trim().is_empty() {
            return Err(ApiError::InvalidParameter(
                "package name must not be empty".to_string(),
            ));
        }
        if self.app_binding.activities.is_empty() {
            return Err(ApiError::InvalidParameter(format!(
                "profile '{}' binds no activities",
                self.profile_name
            )));
        }
        Ok(())
    }

    pub fn plugin(&self, plugin: PluginName) -> Option<&PluginConfig> {
        self.plugins.iter().find(|config| config.plugin == plugin)
    }

    /// Convert into the nested bundle layout expected by `SET_CONFIG`
    pub fn to_bundle(&self) -> Result<Bundle> {
        self.validate()?;

        let mut bundle = Bundle::new();
        bundle.insert("PROFILE_NAME".to_string(), Extra::from(self.profile_name.as_str()));
        bundle.insert("PROFILE_ENABLED".to_string(), Extra::from(bool_str(self.enabled)));
        bundle.insert("CONFIG_MODE".to_string(), Extra::from(self.config_mode.name()));
        bundle.insert("APP_LIST".to_string(), Extra::Bundle(self.app_binding.to_bundle()));
        bundle.insert(
            "PLUGIN_CONFIG".to_string(),
            Extra::BundleArray(self.plugins.iter().map(PluginConfig::to_bundle).collect()),
        );
        Ok(bundle)
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
