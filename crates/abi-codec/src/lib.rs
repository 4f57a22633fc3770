// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # abi-codec - schema-driven binary codec for contract data
//!
//! Converts between a canonical JSON representation and a compact,
//! deterministic little-endian wire format. The shape of the data is not
//! known at build time: it comes from a schema document (an "ABI") loaded
//! at runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use abi_codec::{Schema, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let schema = Schema::from_json_str(r#"{
//!         "version": "eosio::abi/1.1",
//!         "structs": [{
//!             "name": "transfer", "base": "",
//!             "fields": [
//!                 { "name": "from", "type": "name" },
//!                 { "name": "to", "type": "name" },
//!                 { "name": "quantity", "type": "asset" },
//!                 { "name": "memo", "type": "string" }
//!             ]
//!         }]
//!     }"#)?;
//!
//!     let value = json!({
//!         "from": "alice", "to": "bob",
//!         "quantity": "1.0000 SYS", "memo": ""
//!     });
//!     let bytes = schema.encode("transfer", &value)?;
//!     assert_eq!(schema.decode("transfer", &bytes)?, value);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! schema document --> Schema (loader) --> TypeRegistry (immutable)
//!                                              |
//!            JSON <--> Encoder / Decoder <-----+
//!                           |
//!                composite (struct, variant, T[], T?)
//!                           |
//!         builtin (ints, floats, name, time, asset, keys, ...)
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Schema`] | Loaded schema; entry point for encode/decode |
//! | [`AbiDef`] | Schema document as written |
//! | [`TypeRegistry`] | Resolved type descriptors |
//! | [`SchemaCache`] | Contract name to shared [`Schema`] |
//! | [`CodecConfig`] | Depth and size limits |
//! | [`AbiError`] | Every failure, with an [`ErrorKind`] category |

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod schema;
pub mod types;

pub use cache::SchemaCache;
pub use codec::name::{name_to_string, string_to_name};
pub use config::{CodecConfig, ConfigError};
pub use error::{AbiError, ErrorKind, Result};
pub use schema::{abi_json_to_bin, AbiDef, Schema};
pub use types::{BuiltinKind, TypeDescriptor, TypeId, TypeKind, TypeRegistry};

use serde_json::Value;

/// Load a JSON schema document.
pub fn load_schema(document: &str) -> Result<Schema> {
    Schema::from_json_str(document)
}

/// Encode `value` as `type_name` under `schema`.
pub fn encode(schema: &Schema, type_name: &str, value: &Value) -> Result<Vec<u8>> {
    schema.encode(type_name, value)
}

/// Decode `bytes` as `type_name` under `schema`.
pub fn decode(schema: &Schema, type_name: &str, bytes: &[u8]) -> Result<Value> {
    schema.decode(type_name, bytes)
}

/// [`encode`] with uppercase hex output.
pub fn encode_hex(schema: &Schema, type_name: &str, value: &Value) -> Result<String> {
    schema.encode_hex(type_name, value)
}

/// [`decode`] from hex text.
pub fn decode_hex(schema: &Schema, type_name: &str, text: &str) -> Result<Value> {
    schema.decode_hex(type_name, text)
}
