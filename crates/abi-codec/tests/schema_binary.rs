// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Schema documents in binary form, and the shared schema cache.

use abi_codec::{abi_json_to_bin, CodecConfig, ErrorKind, Schema, SchemaCache};
use serde_json::{json, Value};
use std::io::Write;

fn test_abi() -> Value {
    json!({
        "version": "eosio::abi/1.1",
        "types": [{ "new_type_name": "account_name", "type": "name" }],
        "structs": [
            { "name": "s1", "base": "", "fields": [{ "name": "x1", "type": "int8" }] },
            { "name": "s2", "base": "", "fields": [
                { "name": "y1", "type": "int8$" },
                { "name": "y2", "type": "int8$" }
            ]},
            { "name": "hi", "base": "", "fields": [{ "name": "user", "type": "account_name" }] }
        ],
        "actions": [{ "name": "hi", "type": "hi", "ricardian_contract": "" }],
        "tables": [{
            "name": "greetings", "index_type": "i64",
            "key_names": ["id"], "key_types": ["uint64"], "type": "s1"
        }],
        "error_messages": [{ "error_code": "18446744073709551615", "error_msg": "max" }],
        "abi_extensions": [{ "id": 1, "data": "CAFE" }],
        "variants": [{ "name": "v1", "types": ["int8", "s1", "s2"] }],
        "action_results": [{ "name": "hi", "result_type": "uint32" }]
    })
}

#[test]
fn test_binary_document_roundtrip() {
    // 1. JSON document to binary
    let bin = abi_json_to_bin(&test_abi()).unwrap();
    assert_eq!(bin[0] as usize, "eosio::abi/1.1".len());

    // 2. Binary back to a schema
    let schema = Schema::from_bin(&bin).unwrap();
    assert_eq!(schema.version(), "eosio::abi/1.1");
    assert_eq!(schema.abi().error_messages[0].error_code, u64::MAX);
    assert_eq!(schema.abi().abi_extensions[0].data, "CAFE");

    // 3. Lookups survive the trip
    assert_eq!(schema.type_for_action("hi").unwrap(), "hi");
    assert_eq!(schema.type_for_table("greetings").unwrap(), "s1");
    assert_eq!(schema.action_result_type("hi").unwrap(), "uint32");

    // 4. Both schemas produce identical bytes
    let from_json = Schema::from_value(test_abi()).unwrap();
    let value = json!(["s2", { "y1": 1 }]);
    assert_eq!(
        schema.encode("v1", &value).unwrap(),
        from_json.encode("v1", &value).unwrap()
    );
    assert_eq!(schema.encode_hex("hi", &json!({ "user": "eosio" })).unwrap(), "0000000000EA3055");
}

#[test]
fn test_schema_of_schemas() {
    let bin = abi_json_to_bin(&test_abi()).unwrap();
    let meta = Schema::abi_def().unwrap();
    let document = meta.decode("abi_def", &bin).unwrap();
    assert_eq!(document["version"], "eosio::abi/1.1");
    assert_eq!(document["structs"][1]["fields"][0]["type"], "int8$");
    assert_eq!(document["actions"][0]["name"], "hi");
    assert_eq!(meta.encode("abi_def", &document).unwrap(), bin);
}

#[test]
fn test_binary_document_errors() {
    // Version string only: sections are missing.
    let mut bin = vec![14u8];
    bin.extend_from_slice(b"eosio::abi/1.0");
    assert_eq!(Schema::from_bin(&bin).unwrap_err().kind(), ErrorKind::MalformedInput);

    let mut bad = vec![14u8];
    bad.extend_from_slice(b"eosio::abi/7.0");
    bad.extend_from_slice(&[0; 9]);
    assert_eq!(Schema::from_bin(&bad).unwrap_err().kind(), ErrorKind::Schema);

    assert!(Schema::from_hex("zz").is_err());
    assert_eq!(Schema::from_bin(&[]).unwrap_err().kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_limits_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_array_len = 1").unwrap();
    let config = CodecConfig::from_file(file.path()).unwrap();

    let schema = Schema::from_value_with_config(test_abi(), config).unwrap();
    assert_eq!(schema.decode_hex("int8[]", "0105").unwrap(), json!([5]));
    assert_eq!(
        schema.decode_hex("int8[]", "020506").unwrap_err().kind(),
        ErrorKind::MalformedInput
    );
}

#[test]
fn test_cache_with_binary_schema() {
    let cache = SchemaCache::new();
    let hex = hex::encode(abi_json_to_bin(&test_abi()).unwrap());
    cache.insert_hex("hello", &hex).unwrap();

    let action_type = cache.get("hello").unwrap().type_for_action("hi").unwrap().to_string();
    let bytes = cache.encode("hello", &action_type, &json!({ "user": "alice" })).unwrap();
    assert_eq!(
        cache.decode("hello", &action_type, &bytes).unwrap(),
        json!({ "user": "alice" })
    );
    assert!(cache.get("world").is_err());
}
