//! Execute message
//!
//! Calls `contract_address` with `calldata` on behalf of the initiator.

use super::envelope::{append_envelope_values, Envelope};
use crate::eip712::{EncodedValue, StructField, Structable};
use crate::serde_bytes;
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execute {
    pub contract_address: Address,
    #[serde(with = "serde_bytes::hex_bytes")]
    pub calldata: Vec<u8>,
    #[serde(flatten)]
    pub envelope: Envelope,
}

impl Execute {
    pub fn new(contract_address: Address, calldata: Vec<u8>, envelope: Envelope) -> Self {
        Self {
            contract_address,
            calldata,
            envelope,
        }
    }
}

impl Structable for Execute {
    fn type_name(&self) -> &'static str {
        "Execute"
    }

    fn typed_fields(&self) -> Vec<(StructField, EncodedValue)> {
        let mut fields = vec![
            (
                StructField::new("contractAddress", "address"),
                EncodedValue::Address(self.contract_address),
            ),
            (
                StructField::new("calldata", "bytes"),
                EncodedValue::Bytes(self.calldata.clone()),
            ),
        ];
        append_envelope_values(&mut fields, &self.envelope);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::hash_struct;
    use crate::utils::crypto::keccak256;
    use crate::zksync::envelope::{Fee, TimeRange};
    use ethers_core::types::U256;

    fn execute(calldata: Vec<u8>) -> Execute {
        Execute::new(
            Address::repeat_byte(0xcc),
            calldata,
            Envelope::new(
                Address::repeat_byte(0x7e),
                Fee::new(Address::zero(), U256::from(1_000u64)),
                3,
                TimeRange::new(100, 200),
            ),
        )
    }

    #[test]
    fn test_type_string() {
        assert_eq!(
            execute(vec![]).struct_type().unwrap().describe(),
            "Execute(address contractAddress,bytes calldata,address initiatorAddress,address feeToken,uint256 fee,uint32 nonce,uint64 validFrom,uint64 validUntil)"
        );
    }

    #[test]
    fn test_calldata_is_hashed_into_struct() {
        let calldata = vec![0x7c, 0xf5, 0xda, 0xb0];
        let message = execute(calldata.clone()).into_eip712_struct().unwrap();
        assert_eq!(message.values()[1], EncodedValue::Bytes(calldata.clone()));

        let other = execute(vec![0x7c, 0xf5, 0xda, 0xb1]).into_eip712_struct().unwrap();
        assert_ne!(hash_struct(&message).unwrap(), hash_struct(&other).unwrap());
        assert_eq!(
            crate::eip712::encode_word(&message.values()[1]).unwrap(),
            keccak256(&calldata)
        );
    }
}
