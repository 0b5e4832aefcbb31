//! zkSync transaction metadata
//!
//! Extra fields a zkSync EIP-712 transaction carries next to the usual
//! request: pubdata gas limit, factory dependencies and paymaster data.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// Gas per pubdata byte used when the caller does not pick one
pub const DEFAULT_GAS_PER_PUBDATA_LIMIT: u64 = 160_000;

/// Paymaster sponsoring a transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterParams {
    pub paymaster: Address,
    #[serde(with = "crate::serde_bytes::hex_bytes")]
    pub paymaster_input: Vec<u8>,
}

impl PaymasterParams {
    pub fn new(paymaster: Address, paymaster_input: Vec<u8>) -> Self {
        Self {
            paymaster,
            paymaster_input,
        }
    }
}

/// zkSync-specific transaction fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Meta {
    pub gas_per_pubdata: U256,

    /// Opaque signature for custom accounts; never part of the digest
    #[serde(
        default,
        with = "crate::serde_bytes::hex_bytes_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_signature: Option<Vec<u8>>,

    /// Bytecode hashes of contracts deployed alongside the transaction
    #[serde(default, with = "crate::serde_bytes::hex32_vec")]
    pub factory_deps: Vec<[u8; 32]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_params: Option<PaymasterParams>,
}

impl Eip712Meta {
    pub fn new(gas_per_pubdata: U256) -> Self {
        Self {
            gas_per_pubdata,
            custom_signature: None,
            factory_deps: Vec::new(),
            paymaster_params: None,
        }
    }

    pub fn with_custom_signature(mut self, signature: Vec<u8>) -> Self {
        self.custom_signature = Some(signature);
        self
    }

    pub fn with_factory_deps(mut self, factory_deps: Vec<[u8; 32]>) -> Self {
        self.factory_deps = factory_deps;
        self
    }

    pub fn with_paymaster(mut self, params: PaymasterParams) -> Self {
        self.paymaster_params = Some(params);
        self
    }

    /// Paymaster params, or the zero address with empty input when unset
    pub fn paymaster_or_default(&self) -> PaymasterParams {
        self.paymaster_params.clone().unwrap_or_default()
    }
}

impl Default for Eip712Meta {
    fn default() -> Self {
        Self::new(U256::from(DEFAULT_GAS_PER_PUBDATA_LIMIT))
    }
}
