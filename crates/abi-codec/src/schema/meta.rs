// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The schema of schema documents.

use crate::error::{AbiError, Result};
use crate::schema::{check_version, AbiDef, Schema};
use serde_json::{json, Value};
use std::sync::OnceLock;

static ABI_DEF: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();

fn abi_def_document() -> Value {
    json!({
        "version": "eosio::abi/1.1",
        "structs": [
            { "name": "type_def", "base": "", "fields": [
                { "name": "new_type_name", "type": "string" },
                { "name": "type", "type": "string" }
            ]},
            { "name": "field_def", "base": "", "fields": [
                { "name": "name", "type": "string" },
                { "name": "type", "type": "string" }
            ]},
            { "name": "struct_def", "base": "", "fields": [
                { "name": "name", "type": "string" },
                { "name": "base", "type": "string" },
                { "name": "fields", "type": "field_def[]" }
            ]},
            { "name": "action_def", "base": "", "fields": [
                { "name": "name", "type": "name" },
                { "name": "type", "type": "string" },
                { "name": "ricardian_contract", "type": "string" }
            ]},
            { "name": "table_def", "base": "", "fields": [
                { "name": "name", "type": "name" },
                { "name": "index_type", "type": "string" },
                { "name": "key_names", "type": "string[]" },
                { "name": "key_types", "type": "string[]" },
                { "name": "type", "type": "string" }
            ]},
            { "name": "clause_pair", "base": "", "fields": [
                { "name": "id", "type": "string" },
                { "name": "body", "type": "string" }
            ]},
            { "name": "error_message", "base": "", "fields": [
                { "name": "error_code", "type": "uint64" },
                { "name": "error_msg", "type": "string" }
            ]},
            { "name": "abi_extension", "base": "", "fields": [
                { "name": "id", "type": "uint16" },
                { "name": "data", "type": "bytes" }
            ]},
            { "name": "variant_def", "base": "", "fields": [
                { "name": "name", "type": "string" },
                { "name": "types", "type": "string[]" }
            ]},
            { "name": "action_result_def", "base": "", "fields": [
                { "name": "name", "type": "name" },
                { "name": "result_type", "type": "string" }
            ]},
            { "name": "abi_def", "base": "", "fields": [
                { "name": "version", "type": "string" },
                { "name": "types", "type": "type_def[]" },
                { "name": "structs", "type": "struct_def[]" },
                { "name": "actions", "type": "action_def[]" },
                { "name": "tables", "type": "table_def[]" },
                { "name": "ricardian_clauses", "type": "clause_pair[]" },
                { "name": "error_messages", "type": "error_message[]" },
                { "name": "abi_extensions", "type": "abi_extension[]" },
                { "name": "variants", "type": "variant_def[]$" },
                { "name": "action_results", "type": "action_result_def[]$" }
            ]}
        ]
    })
}

/// Built on first use and shared.
pub(crate) fn abi_def_schema() -> Result<&'static Schema> {
    ABI_DEF
        .get_or_init(|| {
            log::debug!("[schema] building abi_def meta-schema");
            Schema::from_value(abi_def_document()).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| AbiError::Schema(format!("abi_def meta-schema: {}", e)))
}

/// Binary form of a JSON schema document. Absent sections are written empty.
pub fn abi_json_to_bin(document: &Value) -> Result<Vec<u8>> {
    if !document.is_object() {
        return Err(AbiError::mismatch("schema object", document));
    }
    let abi: AbiDef = serde_json::from_value(document.clone())?;
    check_version(&abi.version)?;
    let value = serde_json::to_value(&abi)?;
    abi_def_schema()?.encode("abi_def", &value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_schema_loads() {
        let meta = abi_def_schema().unwrap();
        assert!(meta.registry().lookup("abi_def").is_some());
        assert!(meta.registry().lookup("struct_def[]").is_some());
    }

    #[test]
    fn test_minimal_document_binary() {
        let bin = abi_json_to_bin(&json!({ "version": "eosio::abi/1.0" })).unwrap();
        let mut expected = vec![14u8];
        expected.extend_from_slice(b"eosio::abi/1.0");
        // Seven empty sections, then the two extension sections.
        expected.extend_from_slice(&[0; 9]);
        assert_eq!(bin, expected);
    }

    #[test]
    fn test_bad_version_rejected() {
        assert!(abi_json_to_bin(&json!({ "version": "eosio::abi/2.0" })).is_err());
        assert!(abi_json_to_bin(&json!("eosio::abi/1.0")).is_err());
    }
}
