//! Adapter notifications
//!
//! Observable events produced by the adapter. Transport is left to the
//! [`EventSink`](crate::effects::EventSink) implementation.

use crate::types::UnwrapperId;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Event emitted by the adapter after a state change or successful execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AdapterEvent {
    /// A module's transaction was executed by the avatar
    ExecutionFromModuleSuccess {
        /// Module that requested the execution
        module: Address,
    },
    /// The unwrapper bound to a target changed
    TransactionUnwrapperSet {
        /// Call target
        target: Address,
        /// Newly bound unwrapper
        unwrapper: UnwrapperId,
    },
    /// A module was enabled
    EnabledModule {
        /// Module address
        module: Address,
    },
    /// A module was disabled
    DisabledModule {
        /// Module address
        module: Address,
    },
}

impl AdapterEvent {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            AdapterEvent::ExecutionFromModuleSuccess { .. } => "execution_from_module_success",
            AdapterEvent::TransactionUnwrapperSet { .. } => "transaction_unwrapper_set",
            AdapterEvent::EnabledModule { .. } => "enabled_module",
            AdapterEvent::DisabledModule { .. } => "disabled_module",
        }
    }
}
