//! EIP-712 Hashing
//!
//! Implements domain separator, struct hashing and the final signing digest.

use super::encoder::encode_value;
use super::structable::Structable;
use super::types::*;
use crate::log_debug;
use crate::utils::crypto::{keccak256, to_hex_prefixed};

/// Magic prefix for EIP-712 encoding
const EIP712_PREFIX: &[u8] = b"\x19\x01";

/// Calculate the domain separator hash
///
/// domainSeparator = hashStruct(eip712Domain)
pub fn domain_separator(domain: &Eip712Domain) -> Eip712Result<[u8; 32]> {
    hash_struct(&domain.into_eip712_struct()?)
}

/// Hash a struct according to EIP-712
///
/// hashStruct(s) = keccak256(typeHash || encodeData(s))
pub fn hash_struct(value: &TypedStruct) -> Eip712Result<[u8; 32]> {
    encode_value(value)
}

/// Calculate the final EIP-712 hash for signing
///
/// hash = keccak256("\x19\x01" || domainSeparator || hashStruct(message))
pub fn typed_data_digest(domain: &Eip712Domain, message: &TypedStruct) -> Eip712Result<[u8; 32]> {
    Ok(get_pre_image(domain, message)?.final_hash)
}

/// Digest for anything that can describe itself as a typed struct
pub fn typed_data_to_signed_bytes<S: Structable + ?Sized>(
    domain: &Eip712Domain,
    message: &S,
) -> Eip712Result<[u8; 32]> {
    typed_data_digest(domain, &message.into_eip712_struct()?)
}

/// Pre-image components (for external signing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712PreImage {
    pub domain_separator: [u8; 32],
    pub struct_hash: [u8; 32],
    pub final_hash: [u8; 32],
}

impl Eip712PreImage {
    /// The 66 bytes that get hashed into `final_hash`
    pub fn signing_input(&self) -> [u8; 66] {
        let mut data = [0u8; 66];
        data[..2].copy_from_slice(EIP712_PREFIX);
        data[2..34].copy_from_slice(&self.domain_separator);
        data[34..].copy_from_slice(&self.struct_hash);
        data
    }
}

/// Calculate the pre-image components for EIP-712
pub fn get_pre_image(domain: &Eip712Domain, message: &TypedStruct) -> Eip712Result<Eip712PreImage> {
    let domain_separator = domain_separator(domain)?;
    let struct_hash = hash_struct(message)?;

    let mut pre_image = Eip712PreImage {
        domain_separator,
        struct_hash,
        final_hash: [0u8; 32],
    };
    pre_image.final_hash = keccak256(&pre_image.signing_input());

    log_debug!(
        "eip712",
        "computed typed data digest",
        primary_type = message.name(),
        domain_separator = to_hex_prefixed(&pre_image.domain_separator),
        struct_hash = to_hex_prefixed(&pre_image.struct_hash),
        digest = to_hex_prefixed(&pre_image.final_hash),
    );

    Ok(pre_image)
}
