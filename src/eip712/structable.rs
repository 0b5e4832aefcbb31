//! Structable Messages
//!
//! The capability every signable message shape implements: declare its
//! fields with values, and turn itself into a `TypedStruct`.

use super::types::*;

pub trait Structable {
    /// Struct type name used in the canonical type string
    fn type_name(&self) -> &'static str;

    /// Declared fields paired with their values, in declaration order
    fn typed_fields(&self) -> Vec<(StructField, EncodedValue)>;

    /// Field names and values in declaration order
    fn eip712types(&self) -> Vec<(String, EncodedValue)> {
        self.typed_fields()
            .into_iter()
            .map(|(field, value)| (field.name, value))
            .collect()
    }

    /// Declared fields without values
    fn eip712fields(&self) -> Vec<StructField> {
        self.typed_fields().into_iter().map(|(field, _)| field).collect()
    }

    fn struct_type(&self) -> Eip712Result<StructType> {
        StructType::new(self.type_name(), self.eip712fields())
    }

    fn into_eip712_struct(&self) -> Eip712Result<TypedStruct> {
        let (fields, values): (Vec<_>, Vec<_>) = self.typed_fields().into_iter().unzip();
        TypedStruct::new(StructType::new(self.type_name(), fields)?, values)
    }
}

impl Structable for Eip712Domain {
    fn type_name(&self) -> &'static str {
        EIP712_DOMAIN_TYPE
    }

    fn typed_fields(&self) -> Vec<(StructField, EncodedValue)> {
        let mut values = vec![
            EncodedValue::String(self.name.clone()),
            EncodedValue::String(self.version.clone()),
            EncodedValue::Uint(self.chain_id),
        ];
        if let Some(contract) = self.verifying_contract {
            values.push(EncodedValue::Address(contract));
        }
        self.fields().into_iter().zip(values).collect()
    }
}
