use crate::error::Result;
use crate::intent::{Extra, Intent};
use crate::keys;

/// Base trait for all DataWedge API operations
///
/// Every DataWedge API call is a broadcast with action
/// [`keys::API_ACTION`] and a single extra naming the call. Operations turn a
/// typed request into that extra; there is no response type because DataWedge
/// never replies within the same call.
pub trait DataWedgeOperation {
    /// The request type for this operation
    type Request;

    /// The extra key identifying this API call
    const API_EXTRA: &'static str;

    /// Build the value carried under [`Self::API_EXTRA`]
    ///
    /// # Returns
    /// The extra value, or an error if the request cannot be represented
    fn build_value(request: &Self::Request) -> Result<Extra>;

    /// Build the complete intent to broadcast
    ///
    /// Operations that need more than the single API extra override this.
    fn build_intent(request: &Self::Request) -> Result<Intent> {
        Ok(Intent::new(keys::API_ACTION).with_extra(Self::API_EXTRA, Self::build_value(request)?))
    }
}
