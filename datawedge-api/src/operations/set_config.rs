//! SetConfig operation: push a profile to DataWedge

use crate::intent::{Extra, Intent};
use crate::profile::DeviceProfile;
use crate::{keys, DataWedgeOperation, Result};

/// SetConfig operation
pub struct SetConfigOperation;

/// Request for SetConfig operation
#[derive(Debug, Clone)]
pub struct SetConfigRequest {
    pub profile: DeviceProfile,
    /// Ask DataWedge to broadcast the outcome of the request
    pub send_result: bool,
}

impl DataWedgeOperation for SetConfigOperation {
    type Request = SetConfigRequest;

    const API_EXTRA: &'static str = keys::EXTRA_SET_CONFIG;

    fn build_value(request: &Self::Request) -> Result<Extra> {
        Ok(Extra::Bundle(request.profile.to_bundle()?))
    }

    fn build_intent(request: &Self::Request) -> Result<Intent> {
        let mut intent = Intent::new(keys::API_ACTION)
            .with_extra(Self::API_EXTRA, Self::build_value(request)?);
        if request.send_result {
            intent.put_extra(keys::EXTRA_SEND_RESULT, "true");
        }
        Ok(intent)
    }
}
