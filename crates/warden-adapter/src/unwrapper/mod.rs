//! Transaction unwrappers
//!
//! Implementations of [`TransactionUnwrapper`](warden_core::TransactionUnwrapper)
//! that expand a delegated call into the calls it batches.

pub mod multisend;
pub mod packed;

pub use multisend::{encode_multisend_call, multisend_selector, MultisendCallUnwrapper};
pub use packed::PackedBatchUnwrapper;

use warden_core::{CallDescriptor, CallMode, WardenError, WardenResult};

/// Request shape every batching unwrapper accepts: delegated and carrying no value
pub(crate) fn ensure_delegated_batch(request: &CallDescriptor) -> WardenResult<()> {
    if !request.value.is_zero() {
        return Err(WardenError::unsupported_shape(format!(
            "batched delegated call carries value {}",
            request.value
        )));
    }
    if request.mode != CallMode::Delegated {
        return Err(WardenError::unsupported_shape(format!(
            "expected delegated call, got {}",
            request.mode
        )));
    }
    Ok(())
}
