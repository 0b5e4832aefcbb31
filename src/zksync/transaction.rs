//! zkSync EIP-712 Transaction
//!
//! The canonical `Transaction` struct a zkSync account signs. Addresses are
//! declared as `uint256` and encoded as the left-padded 20-byte value.

use super::meta::Eip712Meta;
use crate::eip712::{
    typed_data_to_signed_bytes, EncodedValue, Eip712Domain, Eip712Error, Eip712Result,
    StructField, Structable,
};
use crate::serde_bytes;
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// zkSync EIP-712 transaction type
pub const EIP_712_TX_TYPE: u8 = 0x71;

/// Partially filled request, as a caller or an RPC estimate hands it over
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(
        default,
        with = "serde_bytes::hex_bytes_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<u8>>,
}

impl TransactionRequest {
    pub fn new(from: Address) -> Self {
        Self {
            from,
            ..Default::default()
        }
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    /// Plain value transfer with no calldata
    pub fn ether_transfer(from: Address, to: Address, value: U256) -> Self {
        Self::new(from).to(to).value(value).data(Vec::new())
    }
}

/// Gas limit and fee caps chosen for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFees {
    pub gas_limit: U256,
    pub max_fee_per_erg: U256,
    pub max_priority_fee_per_erg: U256,
}

/// A zkSync transaction ready to be hashed for signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction712 {
    pub chain_id: u64,
    pub nonce: U256,
    pub gas_limit: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub max_priority_fee_per_erg: U256,
    pub max_fee_per_erg: U256,
    pub from: Address,
    pub meta: Eip712Meta,
}

impl Transaction712 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: u64,
        nonce: U256,
        gas_limit: U256,
        to: Option<Address>,
        value: U256,
        data: Vec<u8>,
        max_priority_fee_per_erg: U256,
        max_fee_per_erg: U256,
        from: Address,
        meta: Eip712Meta,
    ) -> Self {
        Self {
            chain_id,
            nonce,
            gas_limit,
            to,
            value,
            data,
            max_priority_fee_per_erg,
            max_fee_per_erg,
            from,
            meta,
        }
    }

    /// Build from a request; missing value and data default to zero and empty
    pub fn from_request(
        chain_id: u64,
        nonce: U256,
        request: &TransactionRequest,
        fees: TransactionFees,
        meta: Eip712Meta,
    ) -> Self {
        Self::new(
            chain_id,
            nonce,
            fees.gas_limit,
            request.to,
            request.value.unwrap_or_default(),
            request.data.clone().unwrap_or_default(),
            fees.max_priority_fee_per_erg,
            fees.max_fee_per_erg,
            request.from,
            meta,
        )
    }

    pub fn tx_type(&self) -> u8 {
        EIP_712_TX_TYPE
    }

    /// Fail unless `domain` is bound to this transaction's chain
    pub fn check_domain(&self, domain: &Eip712Domain) -> Eip712Result<()> {
        let chain_id = U256::from(self.chain_id);
        if domain.chain_id != chain_id {
            return Err(Eip712Error::ChainIdMismatch {
                domain: domain.chain_id,
                message: chain_id,
            });
        }
        Ok(())
    }

    /// Digest to sign, after checking the domain's chain id
    pub fn signing_digest(&self, domain: &Eip712Domain) -> Eip712Result<[u8; 32]> {
        self.check_domain(domain)?;
        typed_data_to_signed_bytes(domain, self)
    }
}

/// Address as the uint256 word zkSync declares it with
fn address_to_uint(address: Address) -> U256 {
    U256::from_big_endian(address.as_bytes())
}

impl Structable for Transaction712 {
    fn type_name(&self) -> &'static str {
        "Transaction"
    }

    fn typed_fields(&self) -> Vec<(StructField, EncodedValue)> {
        let paymaster = self.meta.paymaster_or_default();
        let uint = |name: &str, value: U256| (StructField::new(name, "uint256"), EncodedValue::Uint(value));

        vec![
            uint("txType", U256::from(EIP_712_TX_TYPE)),
            uint("from", address_to_uint(self.from)),
            uint("to", address_to_uint(self.to.unwrap_or_default())),
            uint("gasLimit", self.gas_limit),
            uint("gasPerPubdataByteLimit", self.meta.gas_per_pubdata),
            uint("maxFeePerErg", self.max_fee_per_erg),
            uint("maxPriorityFeePerErg", self.max_priority_fee_per_erg),
            uint("paymaster", address_to_uint(paymaster.paymaster)),
            uint("nonce", self.nonce),
            uint("value", self.value),
            (
                StructField::new("data", "bytes"),
                EncodedValue::Bytes(self.data.clone()),
            ),
            (
                StructField::new("factoryDeps", "bytes32[]"),
                EncodedValue::BytesArray(self.meta.factory_deps.clone()),
            ),
            (
                StructField::new("paymasterInput", "bytes"),
                EncodedValue::Bytes(paymaster.paymaster_input),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::{encode_type, hash_struct};
    use crate::utils::network_config::ZkSyncNetwork;
    use crate::zksync::meta::PaymasterParams;

    fn sample() -> Transaction712 {
        Transaction712::new(
            42,
            U256::from(42u64),
            U256::from(54321u64),
            Some(Address::repeat_byte(0xcc)),
            U256::zero(),
            vec![0x01, 0x02],
            U256::zero(),
            U256::zero(),
            Address::repeat_byte(0x12),
            Eip712Meta::new(U256::zero()),
        )
    }

    #[test]
    fn test_type_string() {
        let struct_type = sample().struct_type().unwrap();
        assert_eq!(
            encode_type(&struct_type, &[]).unwrap(),
            "Transaction(uint256 txType,uint256 from,uint256 to,uint256 gasLimit,uint256 gasPerPubdataByteLimit,uint256 maxFeePerErg,uint256 maxPriorityFeePerErg,uint256 paymaster,uint256 nonce,uint256 value,bytes data,bytes32[] factoryDeps,bytes paymasterInput)"
        );
    }

    #[test]
    fn test_address_fields_are_left_padded_words() {
        let values = sample().eip712types();
        assert_eq!(values[0], ("txType".to_string(), EncodedValue::Uint(U256::from(0x71u64))));

        let mut expected = [0u8; 32];
        expected[12..].copy_from_slice(&[0x12; 20]);
        assert_eq!(values[1].1, EncodedValue::Uint(U256::from_big_endian(&expected)));
    }

    #[test]
    fn test_missing_to_encodes_as_zero() {
        let mut tx = sample();
        tx.to = None;
        let with_zero = Transaction712 {
            to: Some(Address::zero()),
            ..tx.clone()
        };
        assert_eq!(
            hash_struct(&tx.into_eip712_struct().unwrap()).unwrap(),
            hash_struct(&with_zero.into_eip712_struct().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_custom_signature_is_not_hashed() {
        let tx = sample();
        let mut signed = tx.clone();
        signed.meta = signed.meta.with_custom_signature(vec![0xaa; 65]);
        assert_eq!(
            hash_struct(&tx.into_eip712_struct().unwrap()).unwrap(),
            hash_struct(&signed.into_eip712_struct().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_paymaster_and_factory_deps_are_hashed() {
        let tx = sample();
        let base = hash_struct(&tx.into_eip712_struct().unwrap()).unwrap();

        let mut with_paymaster = tx.clone();
        with_paymaster.meta = with_paymaster
            .meta
            .with_paymaster(PaymasterParams::new(Address::repeat_byte(0x77), vec![1, 2, 3]));
        assert_ne!(base, hash_struct(&with_paymaster.into_eip712_struct().unwrap()).unwrap());

        let mut with_deps = tx;
        with_deps.meta = with_deps.meta.with_factory_deps(vec![[0x01; 32]]);
        assert_ne!(base, hash_struct(&with_deps.into_eip712_struct().unwrap()).unwrap());
    }

    #[test]
    fn test_signing_digest_checks_chain_id() {
        let tx = sample();
        let localhost = Eip712Domain::default_domain(ZkSyncNetwork::Localhost);
        let mainnet = Eip712Domain::default_domain(ZkSyncNetwork::Mainnet);

        assert_eq!(
            tx.signing_digest(&localhost).unwrap(),
            typed_data_to_signed_bytes(&localhost, &tx).unwrap()
        );
        assert_eq!(
            tx.signing_digest(&mainnet).unwrap_err(),
            Eip712Error::ChainIdMismatch {
                domain: U256::from(324u64),
                message: U256::from(42u64),
            }
        );
    }

    #[test]
    fn test_from_request_defaults() {
        let request = TransactionRequest::new(Address::repeat_byte(0x12));
        let fees = TransactionFees {
            gas_limit: U256::from(100u64),
            ..Default::default()
        };
        let tx = Transaction712::from_request(324, U256::one(), &request, fees, Eip712Meta::default());

        assert_eq!(tx.to, None);
        assert_eq!(tx.value, U256::zero());
        assert!(tx.data.is_empty());
        assert_eq!(tx.gas_limit, U256::from(100u64));
        assert_eq!(tx.tx_type(), EIP_712_TX_TYPE);
    }

    #[test]
    fn test_request_json() {
        let request = TransactionRequest::ether_transfer(
            Address::repeat_byte(0x12),
            Address::repeat_byte(0xcc),
            U256::from(5u64),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["data"], "0x");

        let parsed: TransactionRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, request);
    }
}
