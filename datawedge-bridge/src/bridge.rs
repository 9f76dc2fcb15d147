//! ScannerBridge - main entry point
//!
//! Owns the DataWedge client, the profile configurator and the scan event
//! manager, and exposes them as one command surface plus one event stream.

use std::sync::Arc;

use datawedge_api::{
    BroadcastPeer, DataWedgeClient, DeviceProfile, ProfileConfigurator, TriggerAction,
};
use datawedge_event_manager::{ScanEventManager, ScanSubscription};

use crate::availability::is_supported_vendor;
use crate::command::{Command, CommandOutcome};
use crate::config::BridgeConfig;
use crate::error::Result;

/// Bridge between DataWedge and a single consumer
///
/// Commands may be issued at any time, independent of the subscription.
/// They are fire-and-forget: a successful command means the broadcast was
/// sent, not that the scanner has acted on it.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use datawedge_api::LocalPeer;
/// use datawedge_bridge::{BridgeConfig, ScannerBridge};
///
/// let peer = Arc::new(LocalPeer::new());
/// let bridge = ScannerBridge::new(
///     peer.clone(),
///     BridgeConfig::new().with_manufacturer("Zebra Technologies"),
/// )?;
///
/// assert!(bridge.dispatch("isAvailable")?.as_bool());
/// bridge.dispatch("startScan")?;
///
/// let subscription = bridge.subscribe()?;
/// bridge.unsubscribe(&subscription);
/// # Ok::<(), datawedge_bridge::BridgeError>(())
/// ```
pub struct ScannerBridge {
    config: BridgeConfig,
    client: DataWedgeClient,
    configurator: ProfileConfigurator,
    events: ScanEventManager,
}

impl ScannerBridge {
    /// Create a bridge on top of `peer`
    ///
    /// With `configure_on_start` set, the profile is pushed immediately. A
    /// failure there is logged and does not fail construction; the consumer
    /// can retry with [`ScannerBridge::configure_profile`].
    pub fn new(peer: Arc<dyn BroadcastPeer>, config: BridgeConfig) -> Result<Self> {
        let events = ScanEventManager::new(Arc::clone(&peer), config.receiver_config())?;

        let bridge = Self {
            client: DataWedgeClient::new(peer),
            configurator: config.profile_configurator(),
            events,
            config,
        };

        if bridge.config.configure_on_start {
            if let Err(e) = bridge.configure_profile() {
                tracing::warn!("Initial DataWedge configuration failed: {}", e);
            }
        }

        Ok(bridge)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn event_manager(&self) -> &ScanEventManager {
        &self.events
    }

    /// Start streaming scans to the caller
    pub fn subscribe(&self) -> Result<ScanSubscription> {
        Ok(self.events.subscribe()?)
    }

    /// Stop streaming. Idempotent.
    pub fn unsubscribe(&self, subscription: &ScanSubscription) {
        self.events.unsubscribe(subscription);
    }

    /// Run a command by its consumer-facing name
    ///
    /// Unknown names fail with [`BridgeError::NotImplemented`](crate::BridgeError::NotImplemented).
    pub fn dispatch(&self, method: &str) -> Result<CommandOutcome> {
        let command = match method.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("Rejecting unknown command '{}'", method);
                return Err(e);
            }
        };
        self.execute(command)
    }

    pub fn execute(&self, command: Command) -> Result<CommandOutcome> {
        tracing::debug!("Executing {}", command);
        match command {
            Command::StartScan => self.start_scan().map(|()| CommandOutcome::Sent),
            Command::StopScan => self.stop_scan().map(|()| CommandOutcome::Sent),
            Command::QueryAvailability => Ok(CommandOutcome::Available(self.is_available())),
            Command::ConfigureProfile => self.configure_profile().map(|_| CommandOutcome::Sent),
        }
    }

    /// Send the soft trigger start command
    pub fn start_scan(&self) -> Result<()> {
        self.trigger(TriggerAction::Start)
    }

    /// Send the soft trigger stop command
    pub fn stop_scan(&self) -> Result<()> {
        self.trigger(TriggerAction::Stop)
    }

    /// Whether the host looks like a DataWedge device. No broadcast involved.
    pub fn is_available(&self) -> bool {
        let available =
            is_supported_vendor(&self.config.manufacturer, &self.config.vendor_allow_list);
        tracing::debug!(
            "DataWedge available: {} (manufacturer: {})",
            available,
            self.config.manufacturer
        );
        available
    }

    /// Build and send the DataWedge profile
    ///
    /// Safe to repeat: the profile is created only if missing and each plugin
    /// is fully reset. Returns the profile that was sent.
    pub fn configure_profile(&self) -> Result<DeviceProfile> {
        match self.configurator.configure(&self.client) {
            Ok(profile) => {
                tracing::info!("DataWedge profile '{}' configured", profile.profile_name);
                Ok(profile)
            }
            Err(e) => {
                tracing::error!("Failed to configure DataWedge profile: {}", e);
                Err(e.into())
            }
        }
    }

    /// Unregister any active receiver and stop delivery
    ///
    /// Also happens when the bridge is dropped.
    pub fn shutdown(&self) {
        self.events.shutdown();
    }

    fn trigger(&self, action: TriggerAction) -> Result<()> {
        match self.client.soft_scan_trigger(action) {
            Ok(()) => {
                tracing::info!("DataWedge: {} sent", action.name());
                Ok(())
            }
            Err(e) => {
                tracing::error!("DataWedge: failed to send {}: {}", action.name(), e);
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for ScannerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerBridge")
            .field("config", &self.config)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
