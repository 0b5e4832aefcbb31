//! Serde helpers for byte fields
//!
//! Byte strings and bytes32 lists as 0x-prefixed hex, the way zkSync
//! request objects carry them.

use serde::{Deserialize, Deserializer, Serializer};

fn decode_prefixed<E: serde::de::Error>(s: &str) -> Result<Vec<u8>, E> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| E::custom("expected 0x-prefixed hex"))?;
    hex::decode(digits).map_err(E::custom)
}

/// Serialize/deserialize Vec<u8> as 0x-prefixed hex string
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_prefixed(&s)
    }
}

/// Serialize/deserialize Option<Vec<u8>> as 0x-prefixed hex string
pub mod hex_bytes_option {
    use super::*;

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(b) => serializer.serialize_some(&format!("0x{}", hex::encode(b))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        opt.map(|s| decode_prefixed(&s)).transpose()
    }
}

/// Serialize/deserialize Vec<[u8; 32]> as a list of 0x-prefixed hex strings
pub mod hex32_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(items: &[[u8; 32]], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&format!("0x{}", hex::encode(item)))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<[u8; 32]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| {
                decode_prefixed::<D::Error>(s)?
                    .try_into()
                    .map_err(|_| <D::Error as serde::de::Error>::custom("expected 32 bytes"))
            })
            .collect()
    }
}
