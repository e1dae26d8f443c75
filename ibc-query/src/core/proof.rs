use alloc::format;
use alloc::vec::Vec;

use ibc_core::host::types::path::Path;
use ibc_core::host::ValidationContext;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;

use crate::core::context::ProvableContext;
use crate::error::QueryError;

/// A proof of `path` at the host's current height, with that height in its
/// wire form.
pub(crate) fn prove_at_host_height<I>(
    ibc_ctx: &I,
    path: impl Into<Path>,
) -> Result<(Vec<u8>, Option<RawHeight>), QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let path = path.into();
    let height = ibc_ctx.host_height()?;
    let proof = ibc_ctx
        .get_proof(height, &path)
        .ok_or_else(|| QueryError::proof_not_found(format!("{path} at height {height}")))?;

    Ok((proof, Some(height.into())))
}
