//! Type Hash Cache
//!
//! Memoizes `encode_type` and its keccak256. Entries are keyed by the full
//! content of the root type and the candidate dependency types, so two
//! structs that share a name but not a field list never collide.
//!
//! The cache holds at most `max_entries` types. Once full it is emptied
//! before the next insert, so callers that build many ad-hoc types pay
//! recomputation instead of unbounded memory.

use super::encoder::encode_type;
use super::types::{Eip712Result, StructType};
use crate::log_warn;
use crate::utils::crypto::keccak256;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TypeKey {
    root: StructType,
    /// Sorted by name
    dependencies: Vec<StructType>,
}

impl TypeKey {
    fn new(root: &StructType, all_types: &[StructType]) -> Self {
        let mut dependencies: Vec<StructType> = all_types
            .iter()
            .filter(|t| *t != root)
            .cloned()
            .collect();
        dependencies.sort_by(|a, b| a.name().cmp(b.name()));
        dependencies.dedup();
        Self {
            root: root.clone(),
            dependencies,
        }
    }
}

/// Canonical type string and its hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedType {
    pub type_string: String,
    pub type_hash: [u8; 32],
}

/// Entry limit of the process-wide cache
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Thread-safe type hash cache
pub struct TypeHashCache {
    entries: RwLock<HashMap<TypeKey, CachedType>>,
    max_entries: usize,
}

impl TypeHashCache {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Look up or compute the type string and type hash for `root`.
    ///
    /// Errors are never cached. A poisoned lock degrades to recomputation.
    pub fn get_or_compute(
        &self,
        root: &StructType,
        all_types: &[StructType],
    ) -> Eip712Result<(String, [u8; 32])> {
        let key = TypeKey::new(root, all_types);

        if let Ok(entries) = self.entries.read() {
            if let Some(cached) = entries.get(&key) {
                return Ok((cached.type_string.clone(), cached.type_hash));
            }
        }

        let type_string = encode_type(root, all_types)?;
        let type_hash = keccak256(type_string.as_bytes());

        match self.entries.write() {
            Ok(mut entries) => {
                if entries.len() >= self.max_entries {
                    entries.clear();
                }
                entries.insert(
                    key,
                    CachedType {
                        type_string: type_string.clone(),
                        type_hash,
                    },
                );
            }
            Err(_) => {
                log_warn!("eip712::cache", "type hash cache lock poisoned", root = root.name());
            }
        }

        Ok((type_string, type_hash))
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl Default for TypeHashCache {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Process-wide cache used by the encoder
    static ref TYPE_HASH_CACHE: TypeHashCache = TypeHashCache::new();
}

/// The shared cache
pub fn type_hash_cache() -> &'static TypeHashCache {
    &TYPE_HASH_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::types::{Eip712Error, StructField};

    #[test]
    fn test_cache_basic() {
        let cache = TypeHashCache::new();
        let person = StructType::new("Person", vec![StructField::new("name", "string")]).unwrap();

        let first = cache.get_or_compute(&person, &[]).unwrap();
        assert_eq!(first.0, "Person(string name)");
        assert_eq!(first.1, keccak256(b"Person(string name)"));
        assert_eq!(cache.len(), 1);

        let second = cache.get_or_compute(&person, &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_same_name_different_fields() {
        let cache = TypeHashCache::new();
        let short = StructType::new(
            "EIP712Domain",
            vec![StructField::new("name", "string")],
        )
        .unwrap();
        let long = StructType::new(
            "EIP712Domain",
            vec![
                StructField::new("name", "string"),
                StructField::new("verifyingContract", "address"),
            ],
        )
        .unwrap();

        let a = cache.get_or_compute(&short, &[]).unwrap();
        let b = cache.get_or_compute(&long, &[]).unwrap();
        assert_ne!(a.1, b.1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_size_is_bounded() {
        let cache = TypeHashCache::with_max_entries(2);
        let types: Vec<StructType> = (0..5)
            .map(|i| StructType::new(format!("T{}", i), vec![StructField::new("x", "uint256")]).unwrap())
            .collect();

        for t in &types {
            let (type_string, _) = cache.get_or_compute(t, &[]).unwrap();
            assert_eq!(type_string, t.describe());
            assert!(cache.len() <= 2);
        }

        // evicted entries are recomputed identically
        let again = cache.get_or_compute(&types[0], &[]).unwrap();
        assert_eq!(again.1, keccak256(types[0].describe().as_bytes()));
        assert!(cache.len() <= cache.max_entries());
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = TypeHashCache::new();
        let broken = StructType::new("Broken", vec![StructField::new("x", "Missing")]).unwrap();

        assert_eq!(
            cache.get_or_compute(&broken, &[]).unwrap_err(),
            Eip712Error::UnknownSolidityType("Missing".to_string())
        );
        assert!(cache.is_empty());
    }
}
