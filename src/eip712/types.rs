//! EIP-712 Type Definitions
//!
//! Struct types, field values and the errors raised while hashing them.

use crate::utils::network_config::ZkSyncNetwork;
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the domain struct type
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// A field in a struct type definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StructField {
    /// The name of the field
    pub name: String,
    /// The declared Solidity type (e.g., "address", "uint256", "bytes32[]")
    #[serde(rename = "type")]
    pub type_name: String,
}

impl StructField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A named struct type with an ordered, fixed list of fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    name: String,
    fields: Vec<StructField>,
}

impl StructType {
    /// Create a struct type, rejecting bad identifiers and duplicate field names
    pub fn new(name: impl Into<String>, fields: Vec<StructField>) -> Result<Self, Eip712Error> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(Eip712Error::InvalidStructType(format!(
                "invalid struct name: {:?}",
                name
            )));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !is_identifier(&field.name) {
                return Err(Eip712Error::InvalidStructType(format!(
                    "{}: invalid field name {:?}",
                    name, field.name
                )));
            }
            if field.type_name.is_empty() {
                return Err(Eip712Error::InvalidStructType(format!(
                    "{}.{}: empty type",
                    name, field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Eip712Error::InvalidStructType(format!(
                    "{}: duplicate field {}",
                    name, field.name
                )));
            }
        }

        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    /// Format this type alone: "Name(type1 name1,type2 name2,...)"
    pub fn describe(&self) -> String {
        let field_strs: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.type_name, f.name))
            .collect();

        format!("{}({})", self.name, field_strs.join(","))
    }

    /// Names of the struct types this type's fields refer to, in field order
    pub fn referenced_type_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter_map(|f| match FieldKind::parse(&f.type_name) {
                FieldKind::Struct(name) => Some(name),
                _ => None,
            })
    }
}

/// Parsed form of a declared field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind<'a> {
    Address,
    /// uintN, with N in bits
    Uint(usize),
    /// bytesN, with N in bytes
    FixedBytes(usize),
    Bytes,
    String,
    Bytes32Array,
    /// Anything else is taken to be the name of a struct type
    Struct(&'a str),
}

impl<'a> FieldKind<'a> {
    pub fn parse(type_name: &'a str) -> Self {
        match type_name {
            "address" => return FieldKind::Address,
            "bytes" => return FieldKind::Bytes,
            "string" => return FieldKind::String,
            "bytes32[]" => return FieldKind::Bytes32Array,
            _ => {}
        }

        if let Some(bits) = type_name.strip_prefix("uint") {
            if let Some(n) = parse_width(bits) {
                if n > 0 && n <= 256 && n % 8 == 0 {
                    return FieldKind::Uint(n);
                }
            }
        }

        if let Some(size) = type_name.strip_prefix("bytes") {
            if let Some(n) = parse_width(size) {
                if n > 0 && n <= 32 {
                    return FieldKind::FixedBytes(n);
                }
            }
        }

        FieldKind::Struct(type_name)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, FieldKind::Struct(_))
    }
}

/// Strict decimal width: no sign, no leading zeros
fn parse_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A concrete value for one struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedValue {
    Address(Address),
    /// Unsigned integer of at most 256 bits
    Uint(U256),
    /// Fixed-size bytes, at most 32
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    /// Sequence of 32-byte elements (bytes32[])
    BytesArray(Vec<[u8; 32]>),
    Nested(TypedStruct),
}

impl EncodedValue {
    /// Short name of the value kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            EncodedValue::Address(_) => "address",
            EncodedValue::Uint(_) => "uint",
            EncodedValue::FixedBytes(_) => "fixed bytes",
            EncodedValue::Bytes(_) => "bytes",
            EncodedValue::String(_) => "string",
            EncodedValue::BytesArray(_) => "bytes32 array",
            EncodedValue::Nested(_) => "struct",
        }
    }

    /// Check this value against the declared type of `field`
    pub fn check_against(&self, field: &StructField) -> Result<(), Eip712Error> {
        let kind = FieldKind::parse(&field.type_name);
        let mismatch = |reason: String| Eip712Error::InvalidFieldValue {
            field: field.name.clone(),
            type_name: field.type_name.clone(),
            reason,
        };

        match (kind, self) {
            (FieldKind::Address, EncodedValue::Address(_)) => Ok(()),
            (FieldKind::Uint(bits), EncodedValue::Uint(value)) => {
                if value.bits() > bits {
                    Err(mismatch(format!("{} does not fit in {} bits", value, bits)))
                } else {
                    Ok(())
                }
            }
            (FieldKind::FixedBytes(size), EncodedValue::FixedBytes(bytes)) => {
                if bytes.len() != size {
                    Err(mismatch(format!("expected {} bytes, got {}", size, bytes.len())))
                } else {
                    Ok(())
                }
            }
            (FieldKind::Bytes, EncodedValue::Bytes(_)) => Ok(()),
            (FieldKind::String, EncodedValue::String(_)) => Ok(()),
            (FieldKind::Bytes32Array, EncodedValue::BytesArray(_)) => Ok(()),
            (FieldKind::Struct(name), EncodedValue::Nested(nested)) => {
                if nested.name() == name {
                    Ok(())
                } else {
                    Err(mismatch(format!("got struct {}", nested.name())))
                }
            }
            (FieldKind::Struct(name), _) => Err(Eip712Error::UnknownSolidityType(name.to_string())),
            (_, value) => Err(mismatch(format!("got {} value", value.kind_name()))),
        }
    }
}

impl From<Address> for EncodedValue {
    fn from(value: Address) -> Self {
        EncodedValue::Address(value)
    }
}

impl From<U256> for EncodedValue {
    fn from(value: U256) -> Self {
        EncodedValue::Uint(value)
    }
}

impl From<TypedStruct> for EncodedValue {
    fn from(value: TypedStruct) -> Self {
        EncodedValue::Nested(value)
    }
}

/// A struct type together with one value per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedStruct {
    struct_type: StructType,
    values: Vec<EncodedValue>,
}

impl TypedStruct {
    /// Pair a struct type with its values, checking count and kinds
    pub fn new(struct_type: StructType, values: Vec<EncodedValue>) -> Result<Self, Eip712Error> {
        if values.len() != struct_type.fields().len() {
            return Err(Eip712Error::FieldCountMismatch {
                type_name: struct_type.name().to_string(),
                expected: struct_type.fields().len(),
                actual: values.len(),
            });
        }

        for (field, value) in struct_type.fields().iter().zip(&values) {
            value.check_against(field)?;
        }

        Ok(Self { struct_type, values })
    }

    pub fn name(&self) -> &str {
        self.struct_type.name()
    }

    pub fn struct_type(&self) -> &StructType {
        &self.struct_type
    }

    pub fn values(&self) -> &[EncodedValue] {
        &self.values
    }

    /// Fields paired with their values, in declaration order
    pub fn fields_with_values(&self) -> impl Iterator<Item = (&StructField, &EncodedValue)> {
        self.struct_type.fields().iter().zip(&self.values)
    }

    /// Every struct type reachable through nested values, this one first.
    ///
    /// Fails if two different definitions share a name.
    pub fn referenced_types(&self) -> Result<Vec<StructType>, Eip712Error> {
        let mut found: Vec<StructType> = Vec::new();
        let mut to_visit = vec![self];

        while let Some(current) = to_visit.pop() {
            match found.iter().find(|t| t.name() == current.name()) {
                Some(existing) if existing == current.struct_type() => continue,
                Some(_) => {
                    return Err(Eip712Error::InvalidStructType(format!(
                        "conflicting definitions for {}",
                        current.name()
                    )))
                }
                None => found.push(current.struct_type.clone()),
            }

            for value in &current.values {
                if let EncodedValue::Nested(nested) = value {
                    to_visit.push(nested);
                }
            }
        }

        Ok(found)
    }
}

/// The EIP-712 domain separator data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// The human-readable name of the signing domain
    pub name: String,

    /// The current major version of the signing domain
    pub version: String,

    /// The EIP-155 chain ID
    pub chain_id: U256,

    /// The address of the contract that will verify the signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<Address>,
}

impl Eip712Domain {
    /// Domain name used by zkSync
    pub const NAME: &'static str = "zkSync";
    /// Domain version used by zkSync
    pub const VERSION: &'static str = "2";

    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: U256,
        verifying_contract: Option<Address>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// The zkSync domain for a network, without a verifying contract
    pub fn default_domain(network: ZkSyncNetwork) -> Self {
        Self::new(Self::NAME, Self::VERSION, U256::from(network.chain_id()), None)
    }

    /// Domain fields; `verifyingContract` only when one is set
    pub fn fields(&self) -> Vec<StructField> {
        let mut fields = vec![
            StructField::new("name", "string"),
            StructField::new("version", "string"),
            StructField::new("chainId", "uint256"),
        ];
        if self.verifying_contract.is_some() {
            fields.push(StructField::new("verifyingContract", "address"));
        }
        fields
    }
}

/// Errors that can occur during EIP-712 operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Eip712Error {
    #[error("Cyclic type reference: {0}")]
    CyclicTypeReference(String),

    #[error("Field count mismatch for {type_name}: expected {expected}, got {actual}")]
    FieldCountMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown solidity type: {0}")]
    UnknownSolidityType(String),

    #[error("Invalid value for {field} ({type_name}): {reason}")]
    InvalidFieldValue {
        field: String,
        type_name: String,
        reason: String,
    },

    #[error("Invalid struct type: {0}")]
    InvalidStructType(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Chain id mismatch: domain has {domain}, message has {message}")]
    ChainIdMismatch { domain: U256, message: U256 },
}

pub type Eip712Result<T> = Result<T, Eip712Error>;

/// Solidity identifier: [A-Za-z_$][A-Za-z0-9_$]*
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
