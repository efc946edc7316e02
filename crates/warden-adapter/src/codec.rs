//! Packed batch codec
//!
//! A packed batch is a concatenation of call records with no padding,
//! delimiters or type markers:
//!
//! ```text
//! [1 byte mode][20 bytes target][32 bytes value][32 bytes length N][N bytes payload]
//! ```
//!
//! Integers are big-endian. Records repeat until the input is exhausted, and
//! the input length must equal the sum of the record lengths exactly.

use alloy_primitives::{Address, Bytes, U256};
use warden_core::{CallDescriptor, CallMode, WardenError, WardenResult};

const MODE_LEN: usize = 1;
const TARGET_LEN: usize = 20;
const WORD_LEN: usize = 32;

/// Fixed part of every record: mode, target, value and payload length
pub const RECORD_HEADER_LEN: usize = MODE_LEN + TARGET_LEN + WORD_LEN + WORD_LEN;

/// Encoder and decoder for the packed batch format
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedBatchCodec;

impl PackedBatchCodec {
    /// Decode `bytes` into call descriptors in encoding order
    ///
    /// Fails with `MalformedBatch` when a record header or payload runs past
    /// the end of the input, or when a mode byte is unknown.
    pub fn decode(bytes: &[u8]) -> WardenResult<Vec<CallDescriptor>> {
        let mut calls = Vec::new();
        let mut cursor = 0usize;

        while cursor < bytes.len() {
            let remaining = bytes.len() - cursor;
            if remaining < RECORD_HEADER_LEN {
                return Err(WardenError::malformed(format!(
                    "record {} at offset {cursor}: header needs {RECORD_HEADER_LEN} bytes, {remaining} remain",
                    calls.len()
                )));
            }

            let header = &bytes[cursor..cursor + RECORD_HEADER_LEN];
            let mode = CallMode::try_from(header[0]).map_err(|_| {
                WardenError::malformed(format!(
                    "record {} at offset {cursor}: unknown call mode {}",
                    calls.len(),
                    header[0]
                ))
            })?;
            let (target, rest) = header[MODE_LEN..].split_at(TARGET_LEN);
            let (value, length) = rest.split_at(WORD_LEN);

            let target = Address::from_slice(target);
            let value = U256::from_be_slice(value);
            let length = U256::from_be_slice(length);

            let body_start = cursor + RECORD_HEADER_LEN;
            let available = bytes.len() - body_start;
            let payload_len = usize::try_from(length)
                .ok()
                .filter(|len| *len <= available)
                .ok_or_else(|| {
                    WardenError::malformed(format!(
                        "record {} at offset {cursor}: payload declares {length} bytes, {available} remain",
                        calls.len()
                    ))
                })?;

            let payload = Bytes::copy_from_slice(&bytes[body_start..body_start + payload_len]);
            calls.push(CallDescriptor {
                target,
                value,
                payload,
                mode,
            });
            cursor = body_start + payload_len;
        }

        Ok(calls)
    }

    /// Encode call descriptors into the packed layout
    pub fn encode(calls: &[CallDescriptor]) -> Bytes {
        let capacity = calls
            .iter()
            .map(|call| RECORD_HEADER_LEN + call.payload.len())
            .sum();
        let mut out = Vec::with_capacity(capacity);

        for call in calls {
            out.push(call.mode.as_byte());
            out.extend_from_slice(call.target.as_slice());
            out.extend_from_slice(&call.value.to_be_bytes::<WORD_LEN>());
            out.extend_from_slice(&U256::from(call.payload.len()).to_be_bytes::<WORD_LEN>());
            out.extend_from_slice(&call.payload);
        }

        out.into()
    }
}
