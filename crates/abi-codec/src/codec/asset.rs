// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Token symbols and fixed-point asset amounts.

use crate::error::{AbiError, Result};

/// Longest symbol code that fits above the precision byte.
pub const MAX_SYMBOL_CODE_LEN: usize = 7;

/// Largest precision whose scale fits an `i64`.
pub const MAX_PRECISION: u8 = 18;

/// Pack 1-7 uppercase letters, first letter in the low byte.
pub fn parse_symbol_code(s: &str) -> Result<u64> {
    if s.is_empty() || s.len() > MAX_SYMBOL_CODE_LEN {
        return Err(AbiError::InvalidLiteral(format!("invalid symbol code: {:?}", s)));
    }
    let mut value = 0u64;
    for (i, c) in s.bytes().enumerate() {
        if !c.is_ascii_uppercase() {
            return Err(AbiError::InvalidLiteral(format!("invalid symbol code: {:?}", s)));
        }
        value |= u64::from(c) << (8 * i);
    }
    Ok(value)
}

/// Unpack bytes until the first zero.
pub fn format_symbol_code(mut value: u64) -> String {
    let mut out = String::new();
    while value & 0xff != 0 {
        out.push(char::from((value & 0xff) as u8));
        value >>= 8;
    }
    out
}

/// `"<precision>,<CODE>"` into `(code << 8) | precision`.
pub fn parse_symbol(s: &str) -> Result<u64> {
    let (precision, code) = s
        .split_once(',')
        .ok_or_else(|| AbiError::InvalidLiteral(format!("invalid symbol: {:?}", s)))?;
    let precision: u8 = precision
        .parse()
        .map_err(|_| AbiError::InvalidLiteral(format!("invalid symbol precision: {:?}", s)))?;
    if precision > MAX_PRECISION {
        return Err(AbiError::OutOfRange(format!(
            "symbol precision {} exceeds {}",
            precision, MAX_PRECISION
        )));
    }
    Ok((parse_symbol_code(code)? << 8) | u64::from(precision))
}

pub fn format_symbol(value: u64) -> String {
    format!("{},{}", value & 0xff, format_symbol_code(value >> 8))
}

/// Parsed `"<decimal> <CODE>"`: the amount scaled by `10^precision` and the
/// packed symbol. The digit count after the point sets the precision.
pub fn parse_asset(s: &str) -> Result<(i64, u64)> {
    let invalid = || AbiError::InvalidLiteral(format!("invalid asset: {:?}", s));
    let (number, code) = s.split_once(' ').ok_or_else(invalid)?;
    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > usize::from(MAX_PRECISION) {
        return Err(AbiError::OutOfRange(format!("asset precision of {:?}", s)));
    }

    let overflow = || AbiError::OutOfRange(format!("asset amount {:?}", s));
    let mut amount: i64 = 0;
    for c in whole.bytes().chain(fraction.bytes()) {
        let digit = i64::from(c - b'0');
        amount = amount
            .checked_mul(10)
            .and_then(|a| if negative { a.checked_sub(digit) } else { a.checked_add(digit) })
            .ok_or_else(overflow)?;
    }

    let precision = fraction.len() as u64;
    Ok((amount, (parse_symbol_code(code)? << 8) | precision))
}

pub fn format_asset(amount: i64, symbol: u64) -> String {
    let precision = (symbol & 0xff) as usize;
    let mut digits = amount.unsigned_abs().to_string();
    if digits.len() <= precision {
        digits.insert_str(0, &"0".repeat(precision + 1 - digits.len()));
    }
    if precision > 0 {
        digits.insert(digits.len() - precision, '.');
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} {}", sign, digits, format_symbol_code(symbol >> 8))
}
