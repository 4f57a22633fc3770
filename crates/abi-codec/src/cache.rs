// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Contract account to loaded schema.
//!
//! Readers clone the `Arc` under a read lock and release it before encoding,
//! so a slow conversion never blocks a schema update.

use crate::codec::name::{name_to_string, string_to_name};
use crate::error::{AbiError, Result};
use crate::schema::Schema;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe map of contract name to [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: RwLock<HashMap<u64, Arc<Schema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `schema` for `contract`, replacing any previous one.
    pub fn insert(&self, contract: &str, schema: Schema) -> Result<Arc<Schema>> {
        let key = string_to_name(contract)?;
        let schema = Arc::new(schema);
        let previous = self.schemas.write().insert(key, Arc::clone(&schema));
        if previous.is_some() {
            log::warn!("[cache] replaced schema for {}", name_to_string(key));
        } else {
            log::debug!("[cache] loaded schema for {}", name_to_string(key));
        }
        Ok(schema)
    }

    /// Load JSON schema text and publish it.
    pub fn insert_json(&self, contract: &str, text: &str) -> Result<Arc<Schema>> {
        self.insert(contract, Schema::from_json_str(text)?)
    }

    /// Load a binary schema and publish it.
    pub fn insert_bin(&self, contract: &str, bytes: &[u8]) -> Result<Arc<Schema>> {
        self.insert(contract, Schema::from_bin(bytes)?)
    }

    /// Load a hex-encoded binary schema and publish it.
    pub fn insert_hex(&self, contract: &str, text: &str) -> Result<Arc<Schema>> {
        self.insert(contract, Schema::from_hex(text)?)
    }

    pub fn get(&self, contract: &str) -> Result<Arc<Schema>> {
        let key = string_to_name(contract)?;
        let schema = self.schemas.read().get(&key).cloned();
        match schema {
            Some(schema) => {
                log::trace!("[cache] hit {}", contract);
                Ok(schema)
            }
            None => Err(AbiError::Schema(format!(
                "contract is not loaded: {}",
                contract
            ))),
        }
    }

    pub fn remove(&self, contract: &str) -> Result<Option<Arc<Schema>>> {
        let key = string_to_name(contract)?;
        Ok(self.schemas.write().remove(&key))
    }

    pub fn contains(&self, contract: &str) -> bool {
        string_to_name(contract)
            .map(|key| self.schemas.read().contains_key(&key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    pub fn encode(&self, contract: &str, type_name: &str, value: &Value) -> Result<Vec<u8>> {
        self.get(contract)?.encode(type_name, value)
    }

    pub fn decode(&self, contract: &str, type_name: &str, bytes: &[u8]) -> Result<Value> {
        self.get(contract)?.decode(type_name, bytes)
    }

    pub fn encode_hex(&self, contract: &str, type_name: &str, value: &Value) -> Result<String> {
        self.get(contract)?.encode_hex(type_name, value)
    }

    pub fn decode_hex(&self, contract: &str, type_name: &str, text: &str) -> Result<Value> {
        self.get(contract)?.decode_hex(type_name, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::thread;

    const ABI: &str = r#"{
        "version": "eosio::abi/1.1",
        "structs": [{ "name": "ping", "base": "", "fields": [{ "name": "n", "type": "uint32" }] }],
        "actions": [{ "name": "ping", "type": "ping", "ricardian_contract": "" }]
    }"#;

    #[test]
    fn test_not_loaded() {
        let cache = SchemaCache::new();
        let err = cache.encode("eosio", "uint8", &json!(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("contract is not loaded"));
        assert!(!cache.contains("eosio"));
    }

    #[test]
    fn test_insert_and_use() {
        let cache = SchemaCache::new();
        cache.insert_json("pinger", ABI).unwrap();
        assert!(cache.contains("pinger"));
        let hex = cache.encode_hex("pinger", "ping", &json!({ "n": 1 })).unwrap();
        assert_eq!(hex, "01000000");
        assert_eq!(
            cache.decode_hex("pinger", "ping", &hex).unwrap(),
            json!({ "n": 1 })
        );
        assert_eq!(cache.get("pinger").unwrap().type_for_action("ping").unwrap(), "ping");
    }

    #[test]
    fn test_invalid_contract_name() {
        let cache = SchemaCache::new();
        assert!(cache.insert_json("Not A Name", ABI).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_replace_and_remove() {
        let cache = SchemaCache::new();
        let first = cache.insert_json("pinger", ABI).unwrap();
        cache.insert_json("pinger", ABI).unwrap();
        assert_eq!(cache.len(), 1);
        // Holders of the old schema keep it alive.
        assert_eq!(first.version(), "eosio::abi/1.1");
        assert!(cache.remove("pinger").unwrap().is_some());
        assert!(cache.get("pinger").is_err());
    }

    #[test]
    fn test_concurrent_readers() {
        let cache = Arc::new(SchemaCache::new());
        cache.insert_json("pinger", ABI).unwrap();
        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let bytes = cache.encode("pinger", "ping", &json!({ "n": i })).unwrap();
                    cache.decode("pinger", "ping", &bytes).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), json!({ "n": i }));
        }
    }
}
