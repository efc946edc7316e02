//! Transaction conversion
//!
//! Turns one requested call into the ordered actions submitted to the avatar:
//!
//! - a direct call becomes exactly one action;
//! - a delegated call is only accepted when its target has a bound unwrapper,
//!   and each call the unwrapper produces must itself be direct.
//!
//! Unwrapping is one level deep. A delegated entry inside an unwrapped batch
//! fails with `DelegatedCallNotPermitted` instead of being expanded again.
//! Any failure discards the whole conversion.

use crate::registry::UnwrapperRegistry;
use std::sync::Arc;
use tracing::{debug, warn};
use warden_core::{Action, CallDescriptor, CallMode, WardenError, WardenResult};

/// Converts requested calls into avatar actions
#[derive(Debug, Clone)]
pub struct TransactionConverter {
    registry: Arc<UnwrapperRegistry>,
}

impl TransactionConverter {
    /// Create a converter that resolves unwrappers through `registry`
    pub fn new(registry: Arc<UnwrapperRegistry>) -> Self {
        Self { registry }
    }

    /// Registry used to resolve unwrappers
    pub fn registry(&self) -> &Arc<UnwrapperRegistry> {
        &self.registry
    }

    /// Project a direct call onto an action
    ///
    /// Delegated calls never become bare actions.
    pub fn convert(call: &CallDescriptor) -> WardenResult<Action> {
        match call.mode {
            CallMode::Direct => Ok(Action {
                target: call.target,
                value: call.value,
                payload: call.payload.clone(),
            }),
            CallMode::Delegated => Err(WardenError::DelegatedCallNotPermitted),
        }
    }

    /// Convert a top-level request into the actions to execute, in order
    pub fn convert_transaction(&self, request: &CallDescriptor) -> WardenResult<Vec<Action>> {
        match request.mode {
            CallMode::Direct => Ok(vec![Self::convert(request)?]),
            CallMode::Delegated => {
                let Some(unwrapper) = self.registry.lookup(&request.target) else {
                    warn!(target = %request.target, "Delegated call to target without unwrapper");
                    return Err(WardenError::UnwrapperNotAuthorized {
                        target: request.target,
                    });
                };

                let calls = unwrapper.unwrap_transaction(request)?;
                let actions = calls
                    .iter()
                    .map(Self::convert)
                    .collect::<WardenResult<Vec<_>>>()?;

                debug!(
                    target = %request.target,
                    unwrapper = %unwrapper.id(),
                    actions = actions.len(),
                    "Converted delegated batch"
                );
                Ok(actions)
            }
        }
    }
}
