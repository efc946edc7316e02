//! Property test strategies for Warden types
//!
//! # Example
//!
//! ```rust
//! use warden_testkit::strategies::arb_call_batch;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn batch_is_bounded(batch in arb_call_batch(4)) {
//!         prop_assert!(batch.len() <= 4);
//!     }
//! }
//! ```

use alloy_primitives::{Address, Bytes, U256};
use proptest::prelude::*;
use warden_core::{CallDescriptor, CallMode};

// Re-export proptest for convenience
pub use proptest;

/// Strategy for arbitrary 20-byte addresses
pub fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

/// Strategy for arbitrary 256-bit values
pub fn arb_value() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(U256::from_be_bytes)
}

/// Strategy for payloads up to 96 bytes
pub fn arb_payload() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..96).prop_map(Bytes::from)
}

/// Strategy for either call mode
pub fn arb_call_mode() -> impl Strategy<Value = CallMode> {
    prop_oneof![Just(CallMode::Direct), Just(CallMode::Delegated)]
}

/// Strategy for call descriptors of either mode
pub fn arb_call_descriptor() -> impl Strategy<Value = CallDescriptor> {
    (arb_address(), arb_value(), arb_payload(), arb_call_mode())
        .prop_map(|(target, value, payload, mode)| CallDescriptor::new(target, value, payload, mode))
}

/// Strategy for direct-mode call descriptors
pub fn arb_direct_call() -> impl Strategy<Value = CallDescriptor> {
    (arb_address(), arb_value(), arb_payload())
        .prop_map(|(target, value, payload)| CallDescriptor::direct(target, value, payload))
}

/// Strategy for batches of up to `max_len` descriptors of either mode
pub fn arb_call_batch(max_len: usize) -> impl Strategy<Value = Vec<CallDescriptor>> {
    prop::collection::vec(arb_call_descriptor(), 0..=max_len)
}
