//! zkSync EIP-712 Core Library
//!
//! Typed structured-data hashing for zkSync transactions and account messages.
//!
//! # Architecture
//!
//! This crate provides:
//! - **eip712**: Struct types, canonical type strings, struct hashing, domain
//!   separator and the final signing digest
//! - **zksync**: `Transaction712` and the `Withdraw` / `Transfer` / `Execute`
//!   messages with their shared fee and validity envelope
//! - **utils**: keccak helpers, the redacting logger and network presets
//!
//! The crate never signs. It produces the 32-byte digest an external signer
//! consumes.
//!
//! # Example
//!
//! ```rust,ignore
//! use zksync_eip712::{typed_data_to_signed_bytes, Eip712Domain, ZkSyncNetwork};
//!
//! let domain = Eip712Domain::default_domain(ZkSyncNetwork::Mainnet);
//! let digest = typed_data_to_signed_bytes(&domain, &transaction)?;
//! println!("Digest: 0x{}", hex::encode(digest));
//! ```

pub mod eip712;
pub mod serde_bytes;
pub mod utils;
pub mod zksync;

// Re-export key types for convenience
pub use eip712::{
    domain_separator, encode_type, encode_value, get_pre_image, hash_struct, type_hash,
    typed_data_digest, typed_data_to_signed_bytes, EncodedValue, Eip712Domain, Eip712Error,
    Eip712PreImage, Eip712Result, StructField, StructType, Structable, TypedStruct,
};
pub use utils::crypto::keccak256;
pub use utils::network_config::{DomainConfig, ZkSyncNetwork};
pub use zksync::{
    Eip712Meta, Envelope, Execute, Fee, PaymasterParams, TimeRange, Transaction712,
    TransactionFees, TransactionRequest, Transfer, Withdraw, EIP_712_TX_TYPE,
};
