use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

/// Returns a dummy `Signer`, for testing purposes only!
pub fn dummy_account_id() -> Signer {
    "0CDA3F47EF3C4906693B170EF650EB968C5F4B2C".to_string().into()
}
