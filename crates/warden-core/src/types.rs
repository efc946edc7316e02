//! Call descriptors and avatar actions
//!
//! A [`CallDescriptor`] is one requested unit of execution exactly as a module
//! supplied it (or as an unwrapper produced it). An [`Action`] is the
//! avatar-facing projection of a direct descriptor.

use crate::errors::{Result, WardenError};
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an unwrapper implementation
pub type UnwrapperId = Address;

/// Execution semantics of a requested call
///
/// The discriminants are the wire values used by the packed batch encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CallMode {
    /// Isolated external call
    Direct = 0,
    /// Callee logic runs inside the caller's execution context
    Delegated = 1,
}

impl CallMode {
    /// Wire byte for this mode
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CallMode {
    type Error = WardenError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(CallMode::Direct),
            1 => Ok(CallMode::Delegated),
            other => Err(WardenError::malformed(format!("unknown call mode {other}"))),
        }
    }
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMode::Direct => write!(f, "direct"),
            CallMode::Delegated => write!(f, "delegated"),
        }
    }
}

/// One requested unit of execution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallDescriptor {
    /// Call target
    pub target: Address,
    /// Native value forwarded with the call
    pub value: U256,
    /// Call payload
    pub payload: Bytes,
    /// Execution semantics
    pub mode: CallMode,
}

impl CallDescriptor {
    /// Create a descriptor
    pub fn new(target: Address, value: U256, payload: impl Into<Bytes>, mode: CallMode) -> Self {
        Self {
            target,
            value,
            payload: payload.into(),
            mode,
        }
    }

    /// Create a direct-mode descriptor
    pub fn direct(target: Address, value: U256, payload: impl Into<Bytes>) -> Self {
        Self::new(target, value, payload, CallMode::Direct)
    }

    /// Create a delegated-mode descriptor with zero value
    pub fn delegated(target: Address, payload: impl Into<Bytes>) -> Self {
        Self::new(target, U256::ZERO, payload, CallMode::Delegated)
    }

    /// Whether the descriptor requests delegated execution
    pub fn is_delegated(&self) -> bool {
        self.mode == CallMode::Delegated
    }
}

/// Avatar-facing call, valid only for direct semantics
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Call target
    pub target: Address,
    /// Native value forwarded with the call
    pub value: U256,
    /// Call payload
    pub payload: Bytes,
}

impl Action {
    /// Create an action
    pub fn new(target: Address, value: U256, payload: impl Into<Bytes>) -> Self {
        Self {
            target,
            value,
            payload: payload.into(),
        }
    }
}

/// One entry of the unwrapper registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnwrapperBinding {
    /// Call target whose delegated requests may be unwrapped
    pub target: Address,
    /// Unwrapper authorized for the target
    pub unwrapper: UnwrapperId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_call_mode_wire_bytes() {
        assert_eq!(CallMode::Direct.as_byte(), 0);
        assert_eq!(CallMode::Delegated.as_byte(), 1);
        assert_eq!(CallMode::try_from(1u8).ok(), Some(CallMode::Delegated));
        assert_matches!(
            CallMode::try_from(2u8),
            Err(WardenError::MalformedBatch { .. })
        );
    }

    #[test]
    fn test_delegated_constructor_has_zero_value() {
        let call = CallDescriptor::delegated(Address::repeat_byte(0x22), vec![1u8, 2, 3]);
        assert!(call.is_delegated());
        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.payload.as_ref(), &[1, 2, 3]);
    }
}
