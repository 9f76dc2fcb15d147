use std::fmt;
use std::sync::Arc;

use crate::operations::{
    SetConfigOperation, SetConfigRequest, SoftScanTriggerOperation, SoftScanTriggerRequest,
    TriggerAction,
};
use crate::peer::BroadcastPeer;
use crate::profile::DeviceProfile;
use crate::{DataWedgeOperation, Result};

/// A client for executing DataWedge operations against a broadcast peer
///
/// This client bridges the stateless operation definitions and the peer
/// that actually carries broadcasts. Every call is fire-and-forget: `Ok(())`
/// means the broadcast was handed to the peer, not that DataWedge acted on it.
#[derive(Clone)]
pub struct DataWedgeClient {
    peer: Arc<dyn BroadcastPeer>,
}

impl DataWedgeClient {
    pub fn new(peer: Arc<dyn BroadcastPeer>) -> Self {
        Self { peer }
    }

    /// The peer this client sends through
    pub fn peer(&self) -> &Arc<dyn BroadcastPeer> {
        &self.peer
    }

    /// Execute a DataWedge operation
    ///
    /// Builds the operation's intent and broadcasts it. Construction errors
    /// are returned before anything is sent.
    ///
    /// # Example
    /// ```rust
    /// use std::sync::Arc;
    /// use datawedge_api::{DataWedgeClient, LocalPeer, SoftScanTriggerOperation, TriggerAction};
    /// use datawedge_api::operations::SoftScanTriggerRequest;
    ///
    /// let client = DataWedgeClient::new(Arc::new(LocalPeer::new()));
    /// let request = SoftScanTriggerRequest { action: TriggerAction::Stop };
    /// client.execute::<SoftScanTriggerOperation>(&request)?;
    /// # Ok::<(), datawedge_api::ApiError>(())
    /// ```
    pub fn execute<Op: DataWedgeOperation>(&self, request: &Op::Request) -> Result<()> {
        let intent = Op::build_intent(request)?;
        tracing::trace!(api_extra = Op::API_EXTRA, ?intent, "Broadcasting DataWedge request");
        self.peer.send_broadcast(&intent)
    }

    /// Send a soft scan trigger
    pub fn soft_scan_trigger(&self, action: TriggerAction) -> Result<()> {
        self.execute::<SoftScanTriggerOperation>(&SoftScanTriggerRequest { action })
    }

    /// Push a profile configuration
    pub fn set_config(&self, profile: DeviceProfile, send_result: bool) -> Result<()> {
        self.execute::<SetConfigOperation>(&SetConfigRequest {
            profile,
            send_result,
        })
    }
}

impl fmt::Debug for DataWedgeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataWedgeClient").finish_non_exhaustive()
    }
}
