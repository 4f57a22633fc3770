// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base-32 account/action names packed into a `u64`.
//!
//! Up to 13 characters from `.12345abcdefghijklmnopqrstuvwxyz`. The first
//! 12 take 5 bits each from the top of the word; the 13th only has the low
//! 4 bits left, so it is limited to `.` through `j`.

use crate::error::{AbiError, Result};

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

const MAX_LEN: usize = 13;

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Pack a name literal into its 64-bit form.
pub fn string_to_name(s: &str) -> Result<u64> {
    if s.len() > MAX_LEN {
        return Err(AbiError::InvalidLiteral(format!(
            "name is longer than {} characters: {}",
            MAX_LEN, s
        )));
    }
    let mut value = 0u64;
    for (i, c) in s.bytes().enumerate() {
        let symbol = char_to_symbol(c).ok_or_else(|| {
            AbiError::InvalidLiteral(format!("invalid character in name: {}", s))
        })?;
        if i < MAX_LEN - 1 {
            value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            value |= symbol & 0x0f;
        }
    }
    Ok(value)
}

/// Unpack a 64-bit name, trimming trailing `.` padding.
pub fn name_to_string(value: u64) -> String {
    let mut out = [b'.'; MAX_LEN];
    let mut tmp = value;
    for i in 0..MAX_LEN {
        let mask = if i == 0 { 0x0f } else { 0x1f };
        out[MAX_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
        tmp >>= if i == 0 { 4 } else { 5 };
    }
    let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
    // CHARMAP is ASCII.
    out[..len].iter().map(|&c| char::from(c)).collect()
}
