//! zkSync Signable Messages
//!
//! The `Transaction712` struct plus the account messages (`Withdraw`,
//! `Transfer`, `Execute`) that share the fee and validity envelope.
//!
//! # Example
//! ```rust,ignore
//! use zksync_eip712::eip712::{typed_data_to_signed_bytes, Eip712Domain};
//! use zksync_eip712::zksync::{Envelope, Fee, TimeRange, Withdraw};
//!
//! let envelope = Envelope::new(initiator, Fee::new(fee_token, fee), nonce, TimeRange::default());
//! let withdraw = Withdraw::new(to, token, amount, envelope);
//! let digest = typed_data_to_signed_bytes(&domain, &withdraw)?;
//! ```

pub mod envelope;
pub mod meta;
pub mod transaction;
pub mod withdraw;
pub mod transfer;
pub mod execute;

pub use envelope::*;
pub use meta::*;
pub use transaction::*;
pub use withdraw::Withdraw;
pub use transfer::Transfer;
pub use execute::Execute;
