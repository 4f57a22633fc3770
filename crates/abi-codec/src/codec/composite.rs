// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven encoder and decoder for composite values.
//!
//! Both walk a [`TypeKind`] tree, looking member types up in the registry
//! by id. `allow_extensions` says whether trailing extension fields of the
//! struct being visited may be left out: it starts true at the top level,
//! is handed only to the last field of a struct, passes through optionals
//! and variants, and is never given to array elements.

use crate::codec::buffer::{ReadCursor, WriteBuffer};
use crate::codec::builtin::{decode_builtin, encode_builtin};
use crate::config::CodecConfig;
use crate::error::{AbiError, Result};
use crate::types::{StructDescriptor, TypeId, TypeKind, TypeRegistry, VariantDescriptor};
use serde_json::{Map, Value};

fn recursion_limit() -> AbiError {
    AbiError::Schema("recursion limit reached".into())
}

/// JSON to binary.
pub struct Encoder<'s> {
    registry: &'s TypeRegistry,
    config: &'s CodecConfig,
    out: WriteBuffer,
    depth: usize,
}

impl<'s> Encoder<'s> {
    pub fn new(registry: &'s TypeRegistry, config: &'s CodecConfig) -> Self {
        Self {
            registry,
            config,
            out: WriteBuffer::new(),
            depth: 0,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out.into_bytes()
    }

    fn encode_id(&mut self, id: TypeId, value: &Value, allow_extensions: bool) -> Result<()> {
        let registry = self.registry;
        let desc = registry.get(id);
        self.encode_value(&desc.name, &desc.kind, value, allow_extensions)
    }

    /// Encode `value` as `kind`; `name` is only used in error messages.
    pub fn encode_value(
        &mut self,
        name: &str,
        kind: &TypeKind,
        value: &Value,
        allow_extensions: bool,
    ) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(recursion_limit());
        }
        let result = match kind {
            TypeKind::Builtin(b) => encode_builtin(*b, value, &mut self.out),
            TypeKind::Optional(inner) => {
                if value.is_null() {
                    self.out.write_u8(0);
                    Ok(())
                } else {
                    self.out.write_u8(1);
                    self.encode_id(*inner, value, allow_extensions)
                }
            }
            TypeKind::Array(inner) => {
                if let Value::Array(items) = value {
                    let len = u32::try_from(items.len()).map_err(|_| {
                        AbiError::OutOfRange(format!("array of {} elements", items.len()))
                    })?;
                    self.out.write_varuint32(len);
                    for item in items {
                        self.encode_id(*inner, item, false)?;
                    }
                    Ok(())
                } else {
                    Err(AbiError::mismatch("array", value))
                }
            }
            TypeKind::Variant(v) => self.encode_variant(name, v, value, allow_extensions),
            TypeKind::Struct(s) => self.encode_struct(name, s, value, allow_extensions),
            TypeKind::Unresolved => Err(AbiError::Schema(format!("unresolved type: {}", name))),
        };
        self.depth -= 1;
        result
    }

    fn encode_variant(
        &mut self,
        name: &str,
        variant: &VariantDescriptor,
        value: &Value,
        allow_extensions: bool,
    ) -> Result<()> {
        let (tag, inner) = match value.as_array().map(Vec::as_slice) {
            Some([Value::String(tag), inner]) => (tag, inner),
            _ => return Err(AbiError::mismatch("[type, value] pair", value)),
        };
        let (index, member) = variant.member(tag).ok_or_else(|| {
            AbiError::Schema(format!("type {} is not valid for variant {}", tag, name))
        })?;
        self.out.write_varuint32(index as u32);
        self.encode_id(member.type_id, inner, allow_extensions)
    }

    fn encode_struct(
        &mut self,
        name: &str,
        desc: &StructDescriptor,
        value: &Value,
        allow_extensions: bool,
    ) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| AbiError::mismatch("object", value))?;
        let fields = &desc.all_fields;
        let mut omitted: Option<&str> = None;
        for (i, field) in fields.iter().enumerate() {
            let is_last = i + 1 == fields.len();
            match object.get(&field.name) {
                Some(field_value) => {
                    // A later field can't be written once an earlier one was left out.
                    if let Some(skipped) = omitted {
                        return Err(AbiError::MissingField(format!("{}.{}", name, skipped)));
                    }
                    self.encode_id(field.type_id, field_value, allow_extensions && is_last)?;
                }
                None if field.is_extension && allow_extensions => {
                    omitted.get_or_insert(field.name.as_str());
                }
                None => {
                    return Err(AbiError::MissingField(format!("{}.{}", name, field.name)));
                }
            }
        }
        Ok(())
    }
}

/// Binary to JSON.
pub struct Decoder<'s, 'b> {
    registry: &'s TypeRegistry,
    config: &'s CodecConfig,
    cursor: ReadCursor<'b>,
    depth: usize,
}

impl<'s, 'b> Decoder<'s, 'b> {
    pub fn new(registry: &'s TypeRegistry, config: &'s CodecConfig, bytes: &'b [u8]) -> Self {
        Self {
            registry,
            config,
            cursor: ReadCursor::new(bytes),
            depth: 0,
        }
    }

    /// Fail unless every input byte was consumed.
    pub fn finish(self) -> Result<()> {
        if self.cursor.at_end() {
            Ok(())
        } else {
            Err(AbiError::MalformedInput(format!(
                "extra data: {} trailing bytes",
                self.cursor.remaining()
            )))
        }
    }

    fn decode_id(&mut self, id: TypeId, allow_extensions: bool) -> Result<Value> {
        let registry = self.registry;
        let desc = registry.get(id);
        self.decode_value(&desc.name, &desc.kind, allow_extensions)
    }

    /// Decode one value of `kind`; `name` is only used in error messages.
    pub fn decode_value(
        &mut self,
        name: &str,
        kind: &TypeKind,
        allow_extensions: bool,
    ) -> Result<Value> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(recursion_limit());
        }
        let result = match kind {
            TypeKind::Builtin(b) => decode_builtin(*b, &mut self.cursor),
            TypeKind::Optional(inner) => match self.cursor.read_u8()? {
                0 => Ok(Value::Null),
                1 => self.decode_id(*inner, allow_extensions),
                other => Err(AbiError::MalformedInput(format!(
                    "invalid optional flag {:#04x}",
                    other
                ))),
            },
            TypeKind::Array(inner) => {
                let len = self.cursor.read_varuint32()? as usize;
                if len > self.config.max_array_len {
                    return Err(AbiError::MalformedInput(format!(
                        "array of {} elements exceeds limit {}",
                        len, self.config.max_array_len
                    )));
                }
                let mut items = Vec::with_capacity(len.min(self.cursor.remaining()));
                for _ in 0..len {
                    items.push(self.decode_id(*inner, false)?);
                }
                Ok(Value::Array(items))
            }
            TypeKind::Variant(v) => {
                let tag = self.cursor.read_varuint32()?;
                let member = v.members.get(tag as usize).ok_or_else(|| {
                    AbiError::Schema(format!("variant tag {} out of range for {}", tag, name))
                })?;
                let inner = self.decode_id(member.type_id, allow_extensions)?;
                Ok(Value::Array(vec![Value::String(member.name.clone()), inner]))
            }
            TypeKind::Struct(s) => self.decode_struct(name, s, allow_extensions),
            TypeKind::Unresolved => Err(AbiError::Schema(format!("unresolved type: {}", name))),
        };
        self.depth -= 1;
        result
    }

    fn decode_struct(
        &mut self,
        name: &str,
        desc: &StructDescriptor,
        allow_extensions: bool,
    ) -> Result<Value> {
        let fields = &desc.all_fields;
        let mut object = Map::new();
        for (i, field) in fields.iter().enumerate() {
            if self.cursor.at_end() && field.is_extension && allow_extensions {
                if let Some(required) = fields[i..].iter().find(|f| !f.is_extension) {
                    return Err(AbiError::MalformedInput(format!(
                        "input ends before field {}.{}",
                        name, required.name
                    )));
                }
                break;
            }
            let is_last = i + 1 == fields.len();
            let value = self.decode_id(field.type_id, allow_extensions && is_last)?;
            object.insert(field.name.clone(), value);
        }
        Ok(Value::Object(object))
    }
}
