//! Unwrapper registry
//!
//! Maps a call target to the unwrapper authorized to expand delegated calls
//! sent to it. Only the owner may change bindings. Binding a target to the
//! unwrapper it already has is rejected; binding it to a different unwrapper
//! overwrites the previous entry.

use alloy_primitives::Address;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use warden_core::{
    AdapterEvent, EventSink, TransactionUnwrapper, UnwrapperBinding, UnwrapperId, WardenError,
    WardenResult,
};

/// Owner-administered `target → unwrapper` bindings
pub struct UnwrapperRegistry {
    owner: Address,
    bindings: RwLock<HashMap<Address, Arc<dyn TransactionUnwrapper>>>,
    events: Arc<dyn EventSink>,
}

impl UnwrapperRegistry {
    /// Create an empty registry administered by `owner`
    pub fn new(owner: Address, events: Arc<dyn EventSink>) -> Self {
        Self {
            owner,
            bindings: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Administrative identity
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Bind `target` to `unwrapper` on behalf of `caller`
    pub fn bind(
        &self,
        target: Address,
        unwrapper: Arc<dyn TransactionUnwrapper>,
        caller: Address,
    ) -> WardenResult<()> {
        if caller != self.owner {
            warn!(caller = %caller, target = %target, "Rejected unwrapper binding from non-owner");
            return Err(WardenError::not_authorized(caller));
        }

        let unwrapper_id = unwrapper.id();
        {
            let mut bindings = self.bindings.write();
            if bindings
                .get(&target)
                .is_some_and(|current| current.id() == unwrapper_id)
            {
                return Err(WardenError::UnwrapperAlreadyBound {
                    target,
                    unwrapper: unwrapper_id,
                });
            }
            bindings.insert(target, unwrapper);
        }

        info!(target = %target, unwrapper = %unwrapper_id, "Transaction unwrapper set");
        self.events.emit(AdapterEvent::TransactionUnwrapperSet {
            target,
            unwrapper: unwrapper_id,
        });
        Ok(())
    }

    /// Unwrapper authorized for `target`, if any
    pub fn lookup(&self, target: &Address) -> Option<Arc<dyn TransactionUnwrapper>> {
        self.bindings.read().get(target).cloned()
    }

    /// Identity of the unwrapper bound to `target`, if any
    pub fn binding(&self, target: &Address) -> Option<UnwrapperId> {
        self.bindings.read().get(target).map(|unwrapper| unwrapper.id())
    }

    /// Snapshot of all bindings, ordered by target
    pub fn bindings(&self) -> Vec<UnwrapperBinding> {
        let mut bindings: Vec<_> = self
            .bindings
            .read()
            .iter()
            .map(|(target, unwrapper)| UnwrapperBinding {
                target: *target,
                unwrapper: unwrapper.id(),
            })
            .collect();
        bindings.sort_by_key(|binding| binding.target);
        bindings
    }
}

impl fmt::Debug for UnwrapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnwrapperRegistry")
            .field("owner", &self.owner)
            .field("bindings", &self.bindings())
            .finish_non_exhaustive()
    }
}
