//! EIP-712 Type Encoding
//!
//! Canonical type strings and the recursive value encoder.

use super::cache::type_hash_cache;
use super::types::*;
use crate::utils::crypto::keccak256;
use std::collections::{BTreeSet, HashMap};

/// Encode the canonical type string for `root`.
///
/// Format: `Root(type1 name1,...)` followed by every struct type reachable
/// from it, sorted by name, with no separator. `all_types` may contain
/// unrelated types; only reachable ones are emitted.
pub fn encode_type(root: &StructType, all_types: &[StructType]) -> Eip712Result<String> {
    let registry = build_registry(root, all_types)?;
    let dependencies = find_type_dependencies(root, &registry)?;

    let mut result = root.describe();
    for dep in dependencies {
        // find_type_dependencies only returns registered names
        if let Some(dep_type) = registry.get(dep) {
            result.push_str(&dep_type.describe());
        }
    }

    Ok(result)
}

/// Map type names to definitions, with `root` taking part in conflict checks
fn build_registry<'a>(
    root: &'a StructType,
    all_types: &'a [StructType],
) -> Eip712Result<HashMap<&'a str, &'a StructType>> {
    let mut registry = HashMap::new();
    registry.insert(root.name(), root);

    for struct_type in all_types {
        match registry.get(struct_type.name()) {
            Some(existing) if *existing != struct_type => {
                return Err(Eip712Error::InvalidStructType(format!(
                    "conflicting definitions for {}",
                    struct_type.name()
                )));
            }
            Some(_) => {}
            None => {
                registry.insert(struct_type.name(), struct_type);
            }
        }
    }

    Ok(registry)
}

/// Find every struct type reachable from `root`, excluding `root` itself.
///
/// Names come back sorted by code point. Fails on cycles and on declared
/// types that are neither primitive nor registered.
pub fn find_type_dependencies<'a>(
    root: &'a StructType,
    registry: &HashMap<&'a str, &'a StructType>,
) -> Eip712Result<BTreeSet<&'a str>> {
    let mut visited = BTreeSet::new();
    let mut path = Vec::new();
    visit(root, registry, &mut path, &mut visited)?;

    visited.remove(root.name());
    Ok(visited)
}

fn visit<'a>(
    current: &'a StructType,
    registry: &HashMap<&'a str, &'a StructType>,
    path: &mut Vec<&'a str>,
    visited: &mut BTreeSet<&'a str>,
) -> Eip712Result<()> {
    if visited.contains(current.name()) {
        return Ok(());
    }
    if path.contains(&current.name()) {
        path.push(current.name());
        return Err(Eip712Error::CyclicTypeReference(path.join(" -> ")));
    }

    path.push(current.name());
    for field in current.fields() {
        if let FieldKind::Struct(dep) = FieldKind::parse(&field.type_name) {
            let dep_type = *registry
                .get(dep)
                .ok_or_else(|| Eip712Error::UnknownSolidityType(dep.to_string()))?;
            visit(dep_type, registry, path, visited)?;
        }
    }
    path.pop();

    visited.insert(current.name());
    Ok(())
}

/// Calculate the type hash for a struct type
/// typeHash = keccak256(encodeType(typeOf(s)))
pub fn type_hash(root: &StructType, all_types: &[StructType]) -> Eip712Result<[u8; 32]> {
    let encoded = encode_type(root, all_types)?;
    Ok(keccak256(encoded.as_bytes()))
}

/// Encode a typed struct into its 32-byte struct hash.
///
/// keccak256(typeHash || word(value1) || ... || word(valueN)); this is the
/// same operation as `hash_struct`.
pub fn encode_value(value: &TypedStruct) -> Eip712Result<[u8; 32]> {
    let types = value.referenced_types()?;
    let (_, type_hash) = type_hash_cache().get_or_compute(value.struct_type(), &types)?;

    let mut encoded = Vec::with_capacity(32 * (value.values().len() + 1));
    encoded.extend_from_slice(&type_hash);

    for field_value in value.values() {
        encoded.extend_from_slice(&encode_word(field_value)?);
    }

    Ok(keccak256(&encoded))
}

/// Encode a single field value into one 32-byte word
pub fn encode_word(value: &EncodedValue) -> Eip712Result<[u8; 32]> {
    let mut word = [0u8; 32];

    match value {
        // address - 20 bytes, left-padded to 32
        EncodedValue::Address(addr) => word[12..].copy_from_slice(addr.as_bytes()),
        EncodedValue::Uint(n) => n.to_big_endian(&mut word),
        // bytesN - right-padded
        EncodedValue::FixedBytes(bytes) => {
            if bytes.len() > 32 {
                return Err(Eip712Error::InvalidFieldValue {
                    field: String::new(),
                    type_name: format!("bytes{}", bytes.len()),
                    reason: "fixed bytes longer than 32".to_string(),
                });
            }
            word[..bytes.len()].copy_from_slice(bytes);
        }
        EncodedValue::Bytes(bytes) => word = keccak256(bytes),
        EncodedValue::String(s) => word = keccak256(s.as_bytes()),
        // elements are already 32-byte words, hashed once as a whole
        EncodedValue::BytesArray(items) => word = keccak256(&items.concat()),
        EncodedValue::Nested(nested) => word = encode_value(nested)?,
    }

    Ok(word)
}
