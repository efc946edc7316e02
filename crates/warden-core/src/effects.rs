//! Effect interfaces consumed by the adapter
//!
//! These traits are the seams between the conversion pipeline and everything it
//! does not own: the avatar that executes actions, the set of enabled modules,
//! the unwrappers that expand delegated calls, and the event transport.
//!
//! All interfaces are synchronous. A request runs to completion before any of
//! its effects are observable.

use crate::errors::{AvatarError, Result};
use crate::events::AdapterEvent;
use crate::types::{Action, CallDescriptor, UnwrapperId};
use alloy_primitives::{Address, Bytes};

/// Execution authority that runs action batches atomically
pub trait Avatar: Send + Sync {
    /// Identity of the avatar
    fn address(&self) -> Address;

    /// Execute `actions` in order as one atomic unit
    ///
    /// Returns one output buffer per action on success. On failure nothing of
    /// the batch takes effect.
    fn execute(&self, actions: &[Action]) -> std::result::Result<Vec<Bytes>, AvatarError>;
}

/// Membership query for callers allowed to use the adapter
pub trait ModuleMembership: Send + Sync {
    /// Whether `module` is currently enabled
    fn is_module_enabled(&self, module: &Address) -> bool;
}

/// Component that expands one delegated call into further call descriptors
///
/// Implementations are registered per call target in the unwrapper registry.
/// The returned order is the execution order.
pub trait TransactionUnwrapper: Send + Sync {
    /// Identity used for registry bindings
    fn id(&self) -> UnwrapperId;

    /// Expand `request` into its constituent calls
    fn unwrap_transaction(&self, request: &CallDescriptor) -> Result<Vec<CallDescriptor>>;
}

/// Receiver for adapter notifications
pub trait EventSink: Send + Sync {
    /// Publish one event
    fn emit(&self, event: AdapterEvent);
}
