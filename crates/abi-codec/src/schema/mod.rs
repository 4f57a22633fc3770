// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema documents and loaded schemas.
//!
//! An [`AbiDef`] is the document as written (JSON, or its own binary form).
//! A [`Schema`] is the document after loading: every declared type resolved
//! into an immutable [`TypeRegistry`], ready to drive encode/decode.

mod loader;
mod meta;

pub use meta::abi_json_to_bin;

use crate::codec::buffer::ReadCursor;
use crate::codec::name::{name_to_string, string_to_name};
use crate::codec::{Decoder, Encoder};
use crate::config::CodecConfig;
use crate::error::{AbiError, Result};
use crate::types::TypeRegistry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Every supported version starts with this.
pub const VERSION_PREFIX: &str = "eosio::abi/1.";

/// Alias declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructDef {
    pub name: String,
    pub base: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub ricardian_contract: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDef {
    pub name: String,
    pub index_type: String,
    pub key_names: Vec<String>,
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClausePair {
    pub id: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessage {
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub error_code: u64,
    pub error_msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbiExtension {
    pub id: u16,
    /// Hex.
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantDef {
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionResultDef {
    pub name: String,
    pub result_type: String,
}

/// A schema document. Absent sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbiDef {
    pub version: String,
    pub types: Vec<TypeDef>,
    pub structs: Vec<StructDef>,
    pub actions: Vec<ActionDef>,
    pub tables: Vec<TableDef>,
    pub ricardian_clauses: Vec<ClausePair>,
    pub error_messages: Vec<ErrorMessage>,
    pub abi_extensions: Vec<AbiExtension>,
    pub variants: Vec<VariantDef>,
    pub action_results: Vec<ActionResultDef>,
}

/// `uint64` fields come back from the binary form as decimal strings.
fn u64_from_number_or_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    match Raw::deserialize(d)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn check_version(version: &str) -> Result<()> {
    if version.starts_with(VERSION_PREFIX) {
        Ok(())
    } else {
        Err(AbiError::Schema(format!("unsupported abi version: {:?}", version)))
    }
}

/// A loaded schema: resolved types plus action/table lookups.
///
/// Immutable once built; share it behind an `Arc` for concurrent use.
#[derive(Debug, Clone)]
pub struct Schema {
    abi: AbiDef,
    registry: TypeRegistry,
    config: CodecConfig,
    actions: HashMap<u64, String>,
    tables: HashMap<u64, String>,
    action_results: HashMap<u64, String>,
}

/// Key `(name, type)` entries by their packed name.
fn index_by_name<'a>(
    what: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<HashMap<u64, String>> {
    entries
        .map(|(name, type_name)| {
            let key = string_to_name(name)
                .map_err(|_| AbiError::Schema(format!("invalid {} name: {}", what, name)))?;
            Ok((key, type_name.to_string()))
        })
        .collect()
}

fn lookup_by_name<'m>(map: &'m HashMap<u64, String>, what: &str, name: &str) -> Result<&'m str> {
    let key = string_to_name(name)?;
    map.get(&key)
        .map(String::as_str)
        .ok_or_else(|| AbiError::Schema(format!("unknown {}: {}", what, name_to_string(key))))
}

impl Schema {
    /// Load a document with default limits.
    pub fn load(abi: AbiDef) -> Result<Self> {
        Self::load_with_config(abi, CodecConfig::default())
    }

    /// Load a document. Fails on an unsupported version before anything else.
    pub fn load_with_config(abi: AbiDef, config: CodecConfig) -> Result<Self> {
        check_version(&abi.version)?;
        let registry = loader::build_registry(&abi, &config)?;

        let actions = index_by_name(
            "action",
            abi.actions.iter().map(|a| (a.name.as_str(), a.type_name.as_str())),
        )?;
        let tables = index_by_name(
            "table",
            abi.tables.iter().map(|t| (t.name.as_str(), t.type_name.as_str())),
        )?;
        let action_results = index_by_name(
            "action result",
            abi.action_results
                .iter()
                .map(|r| (r.name.as_str(), r.result_type.as_str())),
        )?;

        log::debug!(
            "[schema] loaded {} ({} types registered, {} actions, {} tables)",
            abi.version,
            registry.len(),
            abi.actions.len(),
            abi.tables.len()
        );

        Ok(Self {
            abi,
            registry,
            config,
            actions,
            tables,
            action_results,
        })
    }

    /// Load from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json_str_with_config(text, CodecConfig::default())
    }

    pub fn from_json_str_with_config(text: &str, config: CodecConfig) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value_with_config(value, config)
    }

    /// Load from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_config(value, CodecConfig::default())
    }

    pub fn from_value_with_config(value: Value, config: CodecConfig) -> Result<Self> {
        if !value.is_object() {
            return Err(AbiError::mismatch("schema object", &value));
        }
        let abi: AbiDef = serde_json::from_value(value)?;
        Self::load_with_config(abi, config)
    }

    /// Load from the binary form of the document.
    pub fn from_bin(bytes: &[u8]) -> Result<Self> {
        Self::from_bin_with_config(bytes, CodecConfig::default())
    }

    pub fn from_bin_with_config(bytes: &[u8], config: CodecConfig) -> Result<Self> {
        // Version is the leading string; reject unknown versions before
        // trusting the rest of the layout.
        let version = ReadCursor::new(bytes).read_sized()?;
        check_version(&String::from_utf8_lossy(version))?;

        let value = Self::abi_def()?.decode("abi_def", bytes)?;
        let abi: AbiDef = serde_json::from_value(value)?;
        Self::load_with_config(abi, config)
    }

    /// Load from hex text of the binary form.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| AbiError::InvalidLiteral(format!("schema hex: {}", e)))?;
        Self::from_bin(&bytes)
    }

    /// The schema that describes schema documents themselves.
    pub fn abi_def() -> Result<&'static Schema> {
        meta::abi_def_schema()
    }

    /// Encode a JSON value as `type_name`.
    pub fn encode(&self, type_name: &str, value: &Value) -> Result<Vec<u8>> {
        let kind = self.registry.resolve(type_name)?;
        let mut encoder = Encoder::new(&self.registry, &self.config);
        encoder.encode_value(type_name, &kind, value, true)?;
        Ok(encoder.into_bytes())
    }

    /// Decode `bytes` as `type_name`. Every byte must be consumed.
    pub fn decode(&self, type_name: &str, bytes: &[u8]) -> Result<Value> {
        let kind = self.registry.resolve(type_name)?;
        let mut decoder = Decoder::new(&self.registry, &self.config, bytes);
        let value = decoder.decode_value(type_name, &kind, true)?;
        decoder.finish()?;
        Ok(value)
    }

    /// [`encode`](Self::encode) with uppercase hex output.
    pub fn encode_hex(&self, type_name: &str, value: &Value) -> Result<String> {
        self.encode(type_name, value).map(hex::encode_upper)
    }

    /// [`decode`](Self::decode) from hex text.
    pub fn decode_hex(&self, type_name: &str, text: &str) -> Result<Value> {
        let bytes = hex::decode(text).map_err(|e| match e {
            hex::FromHexError::OddLength => {
                AbiError::InvalidLiteral("odd number of hex digits".into())
            }
            _ => AbiError::InvalidLiteral(format!("expected hex string: {}", e)),
        })?;
        self.decode(type_name, &bytes)
    }

    /// Type of an action's data. `action` is matched by its packed name.
    pub fn type_for_action(&self, action: &str) -> Result<&str> {
        lookup_by_name(&self.actions, "action", action)
    }

    /// Row type of a table.
    pub fn type_for_table(&self, table: &str) -> Result<&str> {
        lookup_by_name(&self.tables, "table", table)
    }

    /// Return type of an action.
    pub fn action_result_type(&self, action: &str) -> Result<&str> {
        lookup_by_name(&self.action_results, "action result", action)
    }

    pub fn version(&self) -> &str {
        &self.abi.version
    }

    pub fn abi(&self) -> &AbiDef {
        &self.abi
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}
