//! EIP-712 Typed Data Hashing
//!
//! Implementation of EIP-712 struct hashing for signable messages.
//! Produces the digest an external signer signs; never signs itself.
//!
//! # Reference
//! - <https://eips.ethereum.org/EIPS/eip-712>
//!
//! # Example
//! ```rust,ignore
//! use zksync_eip712::eip712::{typed_data_to_signed_bytes, Eip712Domain};
//! use zksync_eip712::utils::network_config::ZkSyncNetwork;
//!
//! let domain = Eip712Domain::default_domain(ZkSyncNetwork::Localhost);
//! let digest = typed_data_to_signed_bytes(&domain, &withdraw)?;
//! ```

pub mod types;
pub mod encoder;
pub mod cache;
pub mod hasher;
pub mod structable;

pub use types::*;
pub use encoder::*;
pub use cache::*;
pub use hasher::*;
pub use structable::*;
