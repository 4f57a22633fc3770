// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON conversions for numbers, booleans and hex blocks.

use crate::error::{AbiError, Result};
use serde_json::{Number, Value};

/// Largest magnitude a float-typed JSON number holds exactly (2^53).
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Sign and magnitude of an integer literal, before range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLiteral {
    pub negative: bool,
    pub magnitude: u128,
}

fn out_of_range(what: &dyn std::fmt::Display, ty: &str) -> AbiError {
    AbiError::OutOfRange(format!("{} does not fit {}", what, ty))
}

fn parse_decimal(s: &str) -> Result<IntLiteral> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(AbiError::InvalidLiteral(format!("invalid number: {:?}", s)));
    }
    let mut magnitude: u128 = 0;
    for c in digits.bytes() {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u128::from(c - b'0')))
            .ok_or_else(|| AbiError::OutOfRange(format!("{} exceeds 128 bits", s)))?;
    }
    Ok(IntLiteral {
        negative,
        magnitude,
    })
}

/// Accept a JSON number or a decimal string.
pub fn int_literal(value: &Value) -> Result<IntLiteral> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(IntLiteral {
                    negative: false,
                    magnitude: u128::from(v),
                })
            } else if let Some(v) = n.as_i64() {
                Ok(IntLiteral {
                    negative: v < 0,
                    magnitude: u128::from(v.unsigned_abs()),
                })
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if !f.is_finite() || f.fract() != 0.0 {
                    return Err(AbiError::InvalidLiteral(format!("expected integer, got {}", n)));
                }
                // Beyond 2^53 the number was already rounded by the JSON parser.
                if f.abs() > MAX_EXACT_FLOAT_INT {
                    return Err(AbiError::OutOfRange(format!(
                        "{} is not exact as a JSON number; use a decimal string",
                        n
                    )));
                }
                Ok(IntLiteral {
                    negative: f < 0.0,
                    magnitude: f.abs() as u128,
                })
            }
        }
        Value::String(s) => parse_decimal(s),
        other => Err(AbiError::InvalidLiteral(format!(
            "expected number, got {}",
            crate::error::json_kind(other)
        ))),
    }
}

/// Signed value within `[min, max]`.
pub fn signed(value: &Value, min: i128, max: i128, ty: &str) -> Result<i128> {
    let lit = int_literal(value)?;
    let v = if lit.negative {
        if lit.magnitude > i128::MIN.unsigned_abs() {
            return Err(out_of_range(value, ty));
        }
        (lit.magnitude as i128).wrapping_neg()
    } else {
        i128::try_from(lit.magnitude).map_err(|_| out_of_range(value, ty))?
    };
    if v < min || v > max {
        return Err(out_of_range(value, ty));
    }
    Ok(v)
}

/// Unsigned value within `[0, max]`. `-0` is accepted.
pub fn unsigned(value: &Value, max: u128, ty: &str) -> Result<u128> {
    let lit = int_literal(value)?;
    if (lit.negative && lit.magnitude != 0) || lit.magnitude > max {
        return Err(out_of_range(value, ty));
    }
    Ok(lit.magnitude)
}

/// Floats accept numbers and numeric strings, including `NaN`/`Infinity`.
pub fn float(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AbiError::InvalidLiteral(format!("invalid float: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AbiError::InvalidLiteral(format!("invalid float: {:?}", s))),
        other => Err(AbiError::InvalidLiteral(format!(
            "expected number, got {}",
            crate::error::json_kind(other)
        ))),
    }
}

/// Finite values become numbers; the rest become `"NaN"`, `"Infinity"`, `"-Infinity"`.
pub fn float_to_json(f: f64) -> Value {
    match Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String("NaN".into()),
        None if f > 0.0 => Value::String("Infinity".into()),
        None => Value::String("-Infinity".into()),
    }
}

/// Shortest decimal that reads back as the same `f32`.
pub fn float32_to_json(f: f32) -> Value {
    if !f.is_finite() {
        return float_to_json(f64::from(f));
    }
    let shortest: f64 = f.to_string().parse().unwrap_or(f64::from(f));
    float_to_json(shortest)
}

pub fn boolean(value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| AbiError::InvalidLiteral("expected true or false".into()))
}

pub fn expect_str<'v>(value: &'v Value, what: &str) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| AbiError::mismatch(what, value))
}

/// Variable-length hex (`bytes`).
pub fn hex_bytes(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| match e {
        hex::FromHexError::OddLength => {
            AbiError::InvalidLiteral("odd number of hex digits".into())
        }
        _ => AbiError::InvalidLiteral(format!("expected hex string: {:?}", s)),
    })
}

/// Fixed-length hex block of exactly `N` bytes.
pub fn hex_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    if !s.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(AbiError::InvalidLiteral(format!("expected hex string: {:?}", s)));
    }
    if s.len() != N * 2 {
        return Err(AbiError::SizeMismatch {
            expected: N * 2,
            actual: s.len(),
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out)
        .map_err(|_| AbiError::InvalidLiteral(format!("expected hex string: {:?}", s)))?;
    Ok(out)
}
