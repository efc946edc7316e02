//! Unwrapper for `multiSend(bytes)` calldata
//!
//! Batching contracts receive the packed batch as the single `bytes` argument
//! of `multiSend(bytes)`, so the request payload is ABI calldata:
//!
//! ```text
//! [4 bytes selector][32 bytes offset = 0x20][32 bytes length L][L bytes packed batch][zero padding to 32]
//! ```
//!
//! The envelope is validated in full before the packed batch is decoded.

use super::ensure_delegated_batch;
use crate::codec::PackedBatchCodec;
use alloy_primitives::{keccak256, Bytes, U256};
use tracing::debug;
use warden_core::{
    CallDescriptor, TransactionUnwrapper, UnwrapperId, WardenError, WardenResult,
};

const SELECTOR_LEN: usize = 4;
const WORD_LEN: usize = 32;
const HEADER_LEN: usize = SELECTOR_LEN + WORD_LEN + WORD_LEN;

/// Function selector of `multiSend(bytes)`
pub fn multisend_selector() -> [u8; SELECTOR_LEN] {
    let digest = keccak256("multiSend(bytes)");
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&digest[..SELECTOR_LEN]);
    selector
}

fn ceil32(len: usize) -> Option<usize> {
    len.checked_add(WORD_LEN - 1).map(|n| n / WORD_LEN * WORD_LEN)
}

/// Validate the calldata envelope and return the packed batch it carries
fn packed_body(data: &[u8]) -> WardenResult<&[u8]> {
    if data.len() < HEADER_LEN {
        return Err(WardenError::malformed(format!(
            "multiSend header needs {HEADER_LEN} bytes, got {}",
            data.len()
        )));
    }
    if data[..SELECTOR_LEN] != multisend_selector() {
        return Err(WardenError::malformed(format!(
            "unexpected selector 0x{}",
            alloy_primitives::hex::encode(&data[..SELECTOR_LEN])
        )));
    }

    let offset = U256::from_be_slice(&data[SELECTOR_LEN..SELECTOR_LEN + WORD_LEN]);
    if offset != U256::from(WORD_LEN) {
        return Err(WardenError::malformed(format!(
            "unexpected bytes offset {offset}"
        )));
    }

    let length = U256::from_be_slice(&data[SELECTOR_LEN + WORD_LEN..HEADER_LEN]);
    let body_len = usize::try_from(length).ok();
    let expected_len = body_len
        .and_then(|len| len.checked_add(2 * WORD_LEN))
        .and_then(ceil32)
        .and_then(|padded| padded.checked_add(SELECTOR_LEN));

    match (body_len, expected_len) {
        (Some(body_len), Some(expected)) if expected == data.len() => {
            Ok(&data[HEADER_LEN..HEADER_LEN + body_len])
        }
        _ => Err(WardenError::malformed(format!(
            "calldata length {} does not match declared batch length {length}",
            data.len()
        ))),
    }
}

/// Encode `calls` as `multiSend(bytes)` calldata
pub fn encode_multisend_call(calls: &[CallDescriptor]) -> Bytes {
    let packed = PackedBatchCodec::encode(calls);
    let padded = ceil32(packed.len()).unwrap_or(packed.len());

    let mut out = Vec::with_capacity(HEADER_LEN + padded);
    out.extend_from_slice(&multisend_selector());
    out.extend_from_slice(&U256::from(WORD_LEN).to_be_bytes::<WORD_LEN>());
    out.extend_from_slice(&U256::from(packed.len()).to_be_bytes::<WORD_LEN>());
    out.extend_from_slice(&packed);
    out.resize(HEADER_LEN + padded, 0);
    out.into()
}

/// Unwraps delegated calls to a `multiSend(bytes)` batching contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisendCallUnwrapper {
    id: UnwrapperId,
}

impl MultisendCallUnwrapper {
    /// Create an unwrapper with the given registry identity
    pub fn new(id: UnwrapperId) -> Self {
        Self { id }
    }
}

impl TransactionUnwrapper for MultisendCallUnwrapper {
    fn id(&self) -> UnwrapperId {
        self.id
    }

    fn unwrap_transaction(&self, request: &CallDescriptor) -> WardenResult<Vec<CallDescriptor>> {
        ensure_delegated_batch(request)?;
        let calls = PackedBatchCodec::decode(packed_body(&request.payload)?)?;
        debug!(
            unwrapper = %self.id,
            target = %request.target,
            calls = calls.len(),
            "Unwrapped multiSend calldata"
        );
        Ok(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use warden_core::CallMode;

    fn sample_calls() -> Vec<CallDescriptor> {
        let call = CallDescriptor::direct(
            Address::repeat_byte(0x11),
            U256::ZERO,
            vec![0x13u8, 0x37, 0xc0, 0xd3],
        );
        vec![call.clone(), call]
    }

    #[test]
    fn test_selector_matches_abi() {
        assert_eq!(multisend_selector(), [0x8d, 0x80, 0xff, 0x0a]);
    }

    #[test]
    fn test_calldata_is_word_aligned() {
        let calldata = encode_multisend_call(&sample_calls());
        assert_eq!((calldata.len() - SELECTOR_LEN) % WORD_LEN, 0);
        assert_eq!(calldata[35], 0x20);
    }

    #[test]
    fn test_unwraps_two_calls() {
        let unwrapper = MultisendCallUnwrapper::new(Address::repeat_byte(0xee));
        let request = CallDescriptor::delegated(
            Address::repeat_byte(0x99),
            encode_multisend_call(&sample_calls()),
        );
        assert_eq!(unwrapper.unwrap_transaction(&request).unwrap(), sample_calls());
    }

    #[test]
    fn test_rejects_wrong_selector() {
        let mut calldata = encode_multisend_call(&sample_calls()).to_vec();
        calldata[0] ^= 0xff;
        assert!(matches!(
            packed_body(&calldata),
            Err(WardenError::MalformedBatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_offset() {
        let mut calldata = encode_multisend_call(&sample_calls()).to_vec();
        calldata[35] = 0x40;
        assert!(matches!(
            packed_body(&calldata),
            Err(WardenError::MalformedBatch { .. })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut calldata = encode_multisend_call(&sample_calls()).to_vec();
        calldata.extend_from_slice(&[0u8; WORD_LEN]);
        assert!(matches!(
            packed_body(&calldata),
            Err(WardenError::MalformedBatch { .. })
        ));
    }

    #[test]
    fn test_rejects_body_cut_at_record_boundary() {
        let unwrapper = MultisendCallUnwrapper::new(Address::repeat_byte(0xee));
        let calldata = encode_multisend_call(&sample_calls());
        let boundary = HEADER_LEN + crate::codec::RECORD_HEADER_LEN + 4;

        let cut = calldata[..boundary].to_vec();
        let mut realigned = cut.clone();
        realigned.resize(SELECTOR_LEN + ceil32(boundary - SELECTOR_LEN).unwrap(), 0);

        for payload in [cut, realigned] {
            let request = CallDescriptor::delegated(Address::repeat_byte(0x99), payload);
            assert!(matches!(
                unwrapper.unwrap_transaction(&request),
                Err(WardenError::MalformedBatch { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bare_packed_batch() {
        let unwrapper = MultisendCallUnwrapper::new(Address::repeat_byte(0xee));
        let request = CallDescriptor::new(
            Address::repeat_byte(0x99),
            U256::ZERO,
            PackedBatchCodec::encode(&sample_calls()),
            CallMode::Delegated,
        );
        assert!(matches!(
            unwrapper.unwrap_transaction(&request),
            Err(WardenError::MalformedBatch { .. })
        ));
    }
}
