//! Unwrapper for payloads that are a bare packed batch

use super::ensure_delegated_batch;
use crate::codec::PackedBatchCodec;
use tracing::debug;
use warden_core::{CallDescriptor, TransactionUnwrapper, UnwrapperId, WardenResult};

/// Decodes the request payload directly as a packed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedBatchUnwrapper {
    id: UnwrapperId,
}

impl PackedBatchUnwrapper {
    /// Create an unwrapper with the given registry identity
    pub fn new(id: UnwrapperId) -> Self {
        Self { id }
    }
}

impl TransactionUnwrapper for PackedBatchUnwrapper {
    fn id(&self) -> UnwrapperId {
        self.id
    }

    fn unwrap_transaction(&self, request: &CallDescriptor) -> WardenResult<Vec<CallDescriptor>> {
        ensure_delegated_batch(request)?;
        let calls = PackedBatchCodec::decode(&request.payload)?;
        debug!(
            unwrapper = %self.id,
            target = %request.target,
            calls = calls.len(),
            "Unwrapped packed batch"
        );
        Ok(calls)
    }
}
