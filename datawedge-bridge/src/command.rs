//! Consumer-facing command set
//!
//! The set is closed: anything not listed here is rejected with
//! [`BridgeError::NotImplemented`](crate::BridgeError::NotImplemented).

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// A command the consumer can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Press the soft trigger
    StartScan,
    /// Release the soft trigger
    StopScan,
    /// Is this host a DataWedge device? Local check, no broadcast.
    QueryAvailability,
    /// Push the bridge's DataWedge profile
    ConfigureProfile,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::StartScan,
        Command::StopScan,
        Command::QueryAvailability,
        Command::ConfigureProfile,
    ];

    /// Name the consumer uses for this command
    pub fn method_name(&self) -> &'static str {
        match self {
            Command::StartScan => "startScan",
            Command::StopScan => "stopScan",
            Command::QueryAvailability => "isAvailable",
            Command::ConfigureProfile => "configureDataWedge",
        }
    }
}

impl FromStr for Command {
    type Err = BridgeError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.method_name() == method)
            .ok_or_else(|| BridgeError::NotImplemented(method.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Successful command result
///
/// `Sent` means the broadcast left the bridge. DataWedge gives no
/// acknowledgement, so it says nothing about the scanner's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Sent,
    Available(bool),
}

impl CommandOutcome {
    /// Boolean reply as a method channel would report it
    pub fn as_bool(&self) -> bool {
        match self {
            CommandOutcome::Sent => true,
            CommandOutcome::Available(available) => *available,
        }
    }
}
