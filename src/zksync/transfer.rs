//! Transfer message
//!
//! Same field layout as `Withdraw`, but the funds stay on L2.

use super::envelope::{append_envelope_values, Envelope};
use crate::eip712::{EncodedValue, StructField, Structable};
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub to: Address,
    pub token: Address,
    pub amount: U256,
    #[serde(flatten)]
    pub envelope: Envelope,
}

impl Transfer {
    pub fn new(to: Address, token: Address, amount: U256, envelope: Envelope) -> Self {
        Self {
            to,
            token,
            amount,
            envelope,
        }
    }
}

impl Structable for Transfer {
    fn type_name(&self) -> &'static str {
        "Transfer"
    }

    fn typed_fields(&self) -> Vec<(StructField, EncodedValue)> {
        let mut fields = vec![
            (StructField::new("to", "address"), EncodedValue::Address(self.to)),
            (StructField::new("token", "address"), EncodedValue::Address(self.token)),
            (StructField::new("amount", "uint256"), EncodedValue::Uint(self.amount)),
        ];
        append_envelope_values(&mut fields, &self.envelope);
        fields
    }
}
