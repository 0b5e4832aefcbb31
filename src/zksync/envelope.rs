//! Shared message envelope
//!
//! Fee and validity fields appended, in a fixed order, after each message
//! variant's own fields.

use crate::eip712::{EncodedValue, StructField};
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// Fee paid by the initiator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub fee_token: Address,
    pub amount: U256,
}

impl Fee {
    pub fn new(fee_token: Address, amount: U256) -> Self {
        Self { fee_token, amount }
    }
}

/// Timestamps bounding when a message may be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub valid_from: u64,
    pub valid_until: u64,
}

impl TimeRange {
    pub fn new(valid_from: u64, valid_until: u64) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }
}

impl Default for TimeRange {
    /// Valid from genesis until the largest 32-bit timestamp
    fn default() -> Self {
        Self::new(0, u32::MAX as u64)
    }
}

/// Initiator, fee, nonce and validity window of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub initiator_address: Address,
    pub fee: Fee,
    pub nonce: u32,
    pub time_range: TimeRange,
}

impl Envelope {
    pub fn new(initiator_address: Address, fee: Fee, nonce: u32, time_range: TimeRange) -> Self {
        Self {
            initiator_address,
            fee,
            nonce,
            time_range,
        }
    }
}

/// Declared envelope fields, in canonical order
pub fn envelope_fields() -> Vec<StructField> {
    vec![
        StructField::new("initiatorAddress", "address"),
        StructField::new("feeToken", "address"),
        StructField::new("fee", "uint256"),
        StructField::new("nonce", "uint32"),
        StructField::new("validFrom", "uint64"),
        StructField::new("validUntil", "uint64"),
    ]
}

/// Envelope values, in the same order as `envelope_fields`
pub fn envelope_values(envelope: &Envelope) -> Vec<EncodedValue> {
    vec![
        EncodedValue::Address(envelope.initiator_address),
        EncodedValue::Address(envelope.fee.fee_token),
        EncodedValue::Uint(envelope.fee.amount),
        EncodedValue::Uint(U256::from(envelope.nonce)),
        EncodedValue::Uint(U256::from(envelope.time_range.valid_from)),
        EncodedValue::Uint(U256::from(envelope.time_range.valid_until)),
    ]
}

/// Append the envelope tail to a variant's own fields
pub fn append_envelope_values(
    fields: &mut Vec<(StructField, EncodedValue)>,
    envelope: &Envelope,
) {
    fields.extend(envelope_fields().into_iter().zip(envelope_values(envelope)));
}
