//! Broadcast message model
//!
//! A faithful but minimal model of what travels between the bridge and
//! DataWedge: an action, a set of categories and a map of loosely typed
//! extras. Nested configuration is expressed as [`Bundle`]s.

use std::collections::BTreeMap;

use serde::Serialize;

/// Keyed collection of extras, ordered by key for deterministic emission
pub type Bundle = BTreeMap<String, Extra>;

/// A single extra value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Extra {
    String(String),
    StringArray(Vec<String>),
    Bundle(Bundle),
    BundleArray(Vec<Bundle>),
}

impl Extra {
    /// Get the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Extra::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get the value as a nested bundle, if it is one
    pub fn as_bundle(&self) -> Option<&Bundle> {
        match self {
            Extra::Bundle(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Get the value as an array of bundles, if it is one
    pub fn as_bundle_array(&self) -> Option<&[Bundle]> {
        match self {
            Extra::BundleArray(bundles) => Some(bundles),
            _ => None,
        }
    }
}

impl From<&str> for Extra {
    fn from(value: &str) -> Self {
        Extra::String(value.to_string())
    }
}

impl From<String> for Extra {
    fn from(value: String) -> Self {
        Extra::String(value)
    }
}

impl From<Vec<String>> for Extra {
    fn from(value: Vec<String>) -> Self {
        Extra::StringArray(value)
    }
}

impl From<Bundle> for Extra {
    fn from(value: Bundle) -> Self {
        Extra::Bundle(value)
    }
}

impl From<Vec<Bundle>> for Extra {
    fn from(value: Vec<Bundle>) -> Self {
        Extra::BundleArray(value)
    }
}

/// A broadcast message exchanged with the peer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Intent {
    action: String,
    categories: Vec<String>,
    extras: Bundle,
}

impl Intent {
    /// Create an intent with the given action and no extras
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    /// Add a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Add or replace an extra
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Extra>) -> Self {
        self.put_extra(key, value);
        self
    }

    /// Add or replace an extra in place
    pub fn put_extra(&mut self, key: impl Into<String>, value: impl Into<Extra>) {
        self.extras.insert(key.into(), value.into());
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn extras(&self) -> &Bundle {
        &self.extras
    }

    pub fn extra(&self, key: &str) -> Option<&Extra> {
        self.extras.get(key)
    }

    /// Look up a string extra. Values of any other type read as absent.
    pub fn string_extra(&self, key: &str) -> Option<&str> {
        self.extra(key).and_then(Extra::as_str)
    }
}

/// Selects which broadcasts a receiver is interested in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentFilter {
    actions: Vec<String>,
    categories: Vec<String>,
}

impl IntentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// An intent matches when its action is listed and every one of its
    /// categories is listed too.
    pub fn matches(&self, intent: &Intent) -> bool {
        self.actions.iter().any(|action| action == intent.action())
            && intent
                .categories()
                .iter()
                .all(|category| self.categories.contains(category))
    }
}
