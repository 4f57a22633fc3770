// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire encoding of builtin types.

use crate::codec::asset;
use crate::codec::buffer::{ReadCursor, WriteBuffer};
use crate::codec::keys::{self, KeyData, KeyType};
use crate::codec::name::{name_to_string, string_to_name};
use crate::codec::primitive::{self as prim, expect_str};
use crate::codec::time;
use crate::error::{AbiError, Result};
use crate::types::BuiltinKind;
use serde_json::Value;

fn key_type_of(kind: BuiltinKind) -> Option<KeyType> {
    match kind {
        BuiltinKind::PublicKey => Some(KeyType::PublicKey),
        BuiltinKind::PrivateKey => Some(KeyType::PrivateKey),
        BuiltinKind::Signature => Some(KeyType::Signature),
        _ => None,
    }
}

/// Encode `value` as builtin `kind`.
pub fn encode_builtin(kind: BuiltinKind, value: &Value, out: &mut WriteBuffer) -> Result<()> {
    let ty = kind.name();
    match kind {
        BuiltinKind::Bool => out.write_u8(u8::from(prim::boolean(value)?)),
        BuiltinKind::Int8 => {
            let v = prim::signed(value, i8::MIN.into(), i8::MAX.into(), ty)? as i8;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Uint8 => {
            let v = prim::unsigned(value, u8::MAX.into(), ty)? as u8;
            out.write_u8(v);
        }
        BuiltinKind::Int16 => {
            let v = prim::signed(value, i16::MIN.into(), i16::MAX.into(), ty)? as i16;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Uint16 => {
            let v = prim::unsigned(value, u16::MAX.into(), ty)? as u16;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Int32 => {
            let v = prim::signed(value, i32::MIN.into(), i32::MAX.into(), ty)? as i32;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Uint32 => {
            let v = prim::unsigned(value, u32::MAX.into(), ty)? as u32;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Int64 => {
            let v = prim::signed(value, i64::MIN.into(), i64::MAX.into(), ty)? as i64;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Uint64 => {
            let v = prim::unsigned(value, u64::MAX.into(), ty)? as u64;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Int128 => {
            let v = prim::signed(value, i128::MIN, i128::MAX, ty)?;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Uint128 => {
            let v = prim::unsigned(value, u128::MAX, ty)?;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::VarUint32 => {
            let v = prim::unsigned(value, u32::MAX.into(), ty)? as u32;
            out.write_varuint32(v);
        }
        BuiltinKind::VarInt32 => {
            let v = prim::signed(value, i32::MIN.into(), i32::MAX.into(), ty)? as i32;
            out.write_varint32(v);
        }
        BuiltinKind::Float32 => out.write_bytes(&(prim::float(value)? as f32).to_le_bytes()),
        BuiltinKind::Float64 => out.write_bytes(&prim::float(value)?.to_le_bytes()),
        BuiltinKind::Float128 => {
            out.write_bytes(&prim::hex_fixed::<16>(expect_str(value, "hex string")?)?)
        }
        BuiltinKind::TimePoint => {
            let us = time::parse_time_point(expect_str(value, "time string")?)?;
            out.write_bytes(&us.to_le_bytes());
        }
        BuiltinKind::TimePointSec => {
            let secs = time::parse_time_point_sec(expect_str(value, "time string")?)?;
            out.write_bytes(&secs.to_le_bytes());
        }
        BuiltinKind::BlockTimestamp => {
            let slot = time::parse_block_timestamp(expect_str(value, "time string")?)?;
            out.write_bytes(&slot.to_le_bytes());
        }
        BuiltinKind::Name => {
            let v = string_to_name(expect_str(value, "string containing name")?)?;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Bytes => {
            let bytes = prim::hex_bytes(expect_str(value, "hex string")?)?;
            out.write_sized(&bytes)?;
        }
        BuiltinKind::String => out.write_sized(expect_str(value, "string")?.as_bytes())?,
        BuiltinKind::Checksum160 => {
            out.write_bytes(&prim::hex_fixed::<20>(expect_str(value, "hex string")?)?)
        }
        BuiltinKind::Checksum256 => {
            out.write_bytes(&prim::hex_fixed::<32>(expect_str(value, "hex string")?)?)
        }
        BuiltinKind::Checksum512 => {
            out.write_bytes(&prim::hex_fixed::<64>(expect_str(value, "hex string")?)?)
        }
        BuiltinKind::PublicKey | BuiltinKind::PrivateKey | BuiltinKind::Signature => {
            let key_type = key_type_of(kind).ok_or_else(|| AbiError::Schema(ty.into()))?;
            let text = value
                .as_str()
                .ok_or_else(|| AbiError::mismatch(key_type.label(), value))?;
            let key = keys::parse_key(key_type, text)?;
            out.write_varuint32(key.curve as u32);
            out.write_bytes(&key.payload);
        }
        BuiltinKind::Symbol => {
            let v = asset::parse_symbol(expect_str(value, "string containing symbol")?)?;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::SymbolCode => {
            let v = asset::parse_symbol_code(expect_str(value, "string containing symbol_code")?)?;
            out.write_bytes(&v.to_le_bytes());
        }
        BuiltinKind::Asset => {
            let (amount, symbol) =
                asset::parse_asset(expect_str(value, "string containing asset")?)?;
            out.write_bytes(&amount.to_le_bytes());
            out.write_bytes(&symbol.to_le_bytes());
        }
    }
    Ok(())
}

macro_rules! read_le {
    ($cursor:expr, $ty:ty) => {
        <$ty>::from_le_bytes($cursor.read_array()?)
    };
}

fn hex_upper(bytes: &[u8]) -> Value {
    Value::String(hex::encode_upper(bytes))
}

/// Decode one builtin `kind` from the cursor.
pub fn decode_builtin(kind: BuiltinKind, cursor: &mut ReadCursor<'_>) -> Result<Value> {
    let value = match kind {
        BuiltinKind::Bool => match cursor.read_u8()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            other => {
                return Err(AbiError::MalformedInput(format!(
                    "invalid bool byte {:#04x}",
                    other
                )))
            }
        },
        BuiltinKind::Int8 => read_le!(cursor, i8).into(),
        BuiltinKind::Uint8 => read_le!(cursor, u8).into(),
        BuiltinKind::Int16 => read_le!(cursor, i16).into(),
        BuiltinKind::Uint16 => read_le!(cursor, u16).into(),
        BuiltinKind::Int32 => read_le!(cursor, i32).into(),
        BuiltinKind::Uint32 => read_le!(cursor, u32).into(),
        BuiltinKind::Int64 => Value::String(read_le!(cursor, i64).to_string()),
        BuiltinKind::Uint64 => Value::String(read_le!(cursor, u64).to_string()),
        BuiltinKind::Int128 => Value::String(read_le!(cursor, i128).to_string()),
        BuiltinKind::Uint128 => Value::String(read_le!(cursor, u128).to_string()),
        BuiltinKind::VarUint32 => cursor.read_varuint32()?.into(),
        BuiltinKind::VarInt32 => cursor.read_varint32()?.into(),
        BuiltinKind::Float32 => prim::float32_to_json(read_le!(cursor, f32)),
        BuiltinKind::Float64 => prim::float_to_json(read_le!(cursor, f64)),
        BuiltinKind::Float128 => hex_upper(cursor.read_bytes(16)?),
        BuiltinKind::TimePoint => Value::String(time::format_time_point(read_le!(cursor, i64))?),
        BuiltinKind::TimePointSec => {
            Value::String(time::format_time_point_sec(read_le!(cursor, u32))?)
        }
        BuiltinKind::BlockTimestamp => {
            Value::String(time::format_block_timestamp(read_le!(cursor, u32))?)
        }
        BuiltinKind::Name => Value::String(name_to_string(read_le!(cursor, u64))),
        BuiltinKind::Bytes => hex_upper(cursor.read_sized()?),
        BuiltinKind::String => {
            let raw = cursor.read_sized()?;
            let text = std::str::from_utf8(raw)
                .map_err(|e| AbiError::MalformedInput(format!("invalid UTF-8 in string: {}", e)))?;
            Value::String(text.to_string())
        }
        BuiltinKind::Checksum160 => hex_upper(cursor.read_bytes(20)?),
        BuiltinKind::Checksum256 => hex_upper(cursor.read_bytes(32)?),
        BuiltinKind::Checksum512 => hex_upper(cursor.read_bytes(64)?),
        BuiltinKind::PublicKey | BuiltinKind::PrivateKey | BuiltinKind::Signature => {
            let key_type =
                key_type_of(kind).ok_or_else(|| AbiError::Schema(kind.name().into()))?;
            let curve = keys::curve_for_tag(key_type, cursor.read_varuint32()?)?;
            let payload = keys::read_payload(key_type, curve, cursor)?.to_vec();
            Value::String(keys::format_key(key_type, &KeyData { curve, payload }))
        }
        BuiltinKind::Symbol => Value::String(asset::format_symbol(read_le!(cursor, u64))),
        BuiltinKind::SymbolCode => {
            Value::String(asset::format_symbol_code(read_le!(cursor, u64)))
        }
        BuiltinKind::Asset => {
            let amount = read_le!(cursor, i64);
            let symbol = read_le!(cursor, u64);
            Value::String(asset::format_asset(amount, symbol))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_hex(kind: BuiltinKind, value: Value) -> String {
        let mut out = WriteBuffer::new();
        encode_builtin(kind, &value, &mut out).unwrap();
        hex::encode_upper(out.into_bytes())
    }

    fn from_hex(kind: BuiltinKind, hex: &str) -> Value {
        let bytes = hex::decode(hex).unwrap();
        let mut cursor = ReadCursor::new(&bytes);
        let value = decode_builtin(kind, &mut cursor).unwrap();
        assert!(cursor.at_end());
        value
    }

    #[test]
    fn test_integer_layout() {
        assert_eq!(to_hex(BuiltinKind::Int8, json!(127)), "7F");
        assert_eq!(to_hex(BuiltinKind::Int8, json!("-128")), "80");
        assert_eq!(to_hex(BuiltinKind::Uint16, json!(65535)), "FFFF");
        assert_eq!(to_hex(BuiltinKind::Int32, json!(-2)), "FEFFFFFF");
        assert_eq!(to_hex(BuiltinKind::Int64, json!(1)), "0100000000000000");
        assert_eq!(from_hex(BuiltinKind::Int64, "FFFFFFFFFFFFFFFF"), json!("-1"));
        assert_eq!(from_hex(BuiltinKind::Uint32, "FFFFFFFF"), json!(4294967295u32));
        assert_eq!(
            from_hex(BuiltinKind::Uint128, &"FF".repeat(16)),
            json!("340282366920938463463374607431768211455")
        );
    }

    #[test]
    fn test_bool() {
        assert_eq!(to_hex(BuiltinKind::Bool, json!(true)), "01");
        assert_eq!(from_hex(BuiltinKind::Bool, "00"), json!(false));
        let mut out = WriteBuffer::new();
        assert!(encode_builtin(BuiltinKind::Bool, &json!("trues"), &mut out).is_err());
        assert!(encode_builtin(BuiltinKind::Bool, &Value::Null, &mut out).is_err());
        assert!(decode_builtin(BuiltinKind::Bool, &mut ReadCursor::new(&[])).is_err());
    }

    #[test]
    fn test_float128_is_opaque_hex() {
        let hex = "12345678ABCDEF12345678ABCDEF1234";
        assert_eq!(to_hex(BuiltinKind::Float128, json!(hex)), hex);
        assert_eq!(from_hex(BuiltinKind::Float128, hex), json!(hex));
    }

    #[test]
    fn test_string_and_bytes() {
        assert_eq!(to_hex(BuiltinKind::String, json!("z")), "017A");
        assert_eq!(to_hex(BuiltinKind::Bytes, json!("aabb")), "02AABB");
        assert_eq!(from_hex(BuiltinKind::Bytes, "02AABB"), json!("AABB"));
        let err = decode_builtin(BuiltinKind::String, &mut ReadCursor::new(&[1])).unwrap_err();
        assert_eq!(err.to_string(), "malformed input: read past end of buffer");
    }

    #[test]
    fn test_asset_layout() {
        assert_eq!(
            to_hex(BuiltinKind::Asset, json!("0.0001 SYS")),
            "01000000000000000453595300000000"
        );
        assert_eq!(
            from_hex(BuiltinKind::Asset, "01000000000000000453595300000000"),
            json!("0.0001 SYS")
        );
    }

    #[test]
    fn test_key_not_a_string() {
        let mut out = WriteBuffer::new();
        let err = encode_builtin(BuiltinKind::PublicKey, &json!(true), &mut out).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::TypeMismatch);
        let err = encode_builtin(BuiltinKind::PublicKey, &json!("foo"), &mut out).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidLiteral);
    }

    #[test]
    fn test_public_key_wire() {
        let hex = to_hex(
            BuiltinKind::PublicKey,
            json!("PUB_K1_11111111111111111111111111111111149Mr2R"),
        );
        assert_eq!(hex, format!("00{}", "00".repeat(33)));
        assert_eq!(
            from_hex(BuiltinKind::PublicKey, &hex),
            json!("PUB_K1_11111111111111111111111111111111149Mr2R")
        );
    }
}
