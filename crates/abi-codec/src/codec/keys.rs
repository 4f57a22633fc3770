// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Public keys, private keys and signatures.
//!
//! On the wire each is a varuint32 curve tag followed by a curve-specific
//! payload. The text form is `<KIND>_<CURVE>_` followed by base58 of the
//! payload and a 4-byte ripemd160 checksum over `payload || CURVE`.
//!
//! Only the format is validated. Nothing here checks that a key is a valid
//! curve point or that a signature verifies.

use crate::codec::buffer::ReadCursor;
use crate::error::{AbiError, Result};
use ripemd::{Digest, Ripemd160};
use sha2::Sha256;

const CHECKSUM_LEN: usize = 4;
const WIF_VERSION: u8 = 0x80;
const LEGACY_PUBLIC_PREFIX: &str = "EOS";

/// Which of the three key-like builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    PublicKey,
    PrivateKey,
    Signature,
}

/// Curve tag, as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    K1 = 0,
    R1 = 1,
    WA = 2,
}

impl Curve {
    const ALL: [Curve; 3] = [Curve::K1, Curve::R1, Curve::WA];

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Curve::K1 => "K1",
            Curve::R1 => "R1",
            Curve::WA => "WA",
        }
    }
}

impl KeyType {
    fn tag(self) -> &'static str {
        match self {
            KeyType::PublicKey => "PUB",
            KeyType::PrivateKey => "PVT",
            KeyType::Signature => "SIG",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyType::PublicKey => "public key",
            KeyType::PrivateKey => "private key",
            KeyType::Signature => "signature",
        }
    }

    fn supports(self, curve: Curve) -> bool {
        !(self == KeyType::PrivateKey && curve == Curve::WA)
    }

    fn unrecognized(self) -> AbiError {
        AbiError::InvalidLiteral(format!("unrecognized {} format", self.label()))
    }
}

/// Curve tag plus the raw payload that follows it on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyData {
    pub curve: Curve,
    pub payload: Vec<u8>,
}

fn checksum(payload: &[u8], suffix: &str) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(payload);
    hasher.update(suffix.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn decode_checked(key_type: KeyType, body: &str, suffix: &str) -> Result<Vec<u8>> {
    let mut bytes = bs58::decode(body)
        .into_vec()
        .map_err(|_| key_type.unrecognized())?;
    if bytes.len() <= CHECKSUM_LEN {
        return Err(key_type.unrecognized());
    }
    let payload_len = bytes.len() - CHECKSUM_LEN;
    if checksum(&bytes[..payload_len], suffix) != bytes[payload_len..] {
        return Err(key_type.unrecognized());
    }
    bytes.truncate(payload_len);
    Ok(bytes)
}

/// Legacy WIF: `0x80 || key || checksum`, the checksum being the first
/// four bytes of a double sha256. Always a K1 key.
fn decode_wif(s: &str) -> Result<Vec<u8>> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|_| KeyType::PrivateKey.unrecognized())?;
    if bytes.len() != 1 + 32 + CHECKSUM_LEN || bytes[0] != WIF_VERSION {
        return Err(KeyType::PrivateKey.unrecognized());
    }
    let (versioned, check) = bytes.split_at(1 + 32);
    let digest = Sha256::digest(Sha256::digest(versioned));
    if digest[..CHECKSUM_LEN] != *check {
        return Err(KeyType::PrivateKey.unrecognized());
    }
    Ok(bytes[1..33].to_vec())
}

/// Consume one payload for `curve` and return the bytes it spans.
pub fn read_payload<'a>(
    key_type: KeyType,
    curve: Curve,
    cursor: &mut ReadCursor<'a>,
) -> Result<&'a [u8]> {
    let start = cursor.position();
    match key_type {
        KeyType::PublicKey => {
            cursor.read_bytes(33)?;
            if curve == Curve::WA {
                cursor.read_u8()?; // user presence
                cursor.read_sized()?; // rpid
            }
        }
        KeyType::PrivateKey => {
            cursor.read_bytes(32)?;
        }
        KeyType::Signature => {
            cursor.read_bytes(65)?;
            if curve == Curve::WA {
                cursor.read_sized()?; // authenticator data
                cursor.read_sized()?; // client JSON
            }
        }
    }
    Ok(cursor.since(start))
}

/// Parse the text form of a key or signature.
pub fn parse_key(key_type: KeyType, s: &str) -> Result<KeyData> {
    let (curve, payload) = if let Some((curve, body)) = Curve::ALL.iter().find_map(|&curve| {
        let prefix = format!("{}_{}_", key_type.tag(), curve.suffix());
        s.strip_prefix(prefix.as_str()).map(|body| (curve, body))
    }) {
        if !key_type.supports(curve) {
            return Err(key_type.unrecognized());
        }
        (curve, decode_checked(key_type, body, curve.suffix())?)
    } else if key_type == KeyType::PublicKey && s.starts_with(LEGACY_PUBLIC_PREFIX) {
        let body = &s[LEGACY_PUBLIC_PREFIX.len()..];
        (Curve::K1, decode_checked(key_type, body, "")?)
    } else if key_type == KeyType::PrivateKey && !s.starts_with("PVT_") {
        (Curve::K1, decode_wif(s)?)
    } else {
        return Err(key_type.unrecognized());
    };

    let mut cursor = ReadCursor::new(&payload);
    read_payload(key_type, curve, &mut cursor).map_err(|_| key_type.unrecognized())?;
    if !cursor.at_end() {
        return Err(key_type.unrecognized());
    }
    Ok(KeyData { curve, payload })
}

/// Canonical text form (legacy inputs come back with the `_K1_` prefix).
pub fn format_key(key_type: KeyType, key: &KeyData) -> String {
    let suffix = key.curve.suffix();
    let mut whole = Vec::with_capacity(key.payload.len() + CHECKSUM_LEN);
    whole.extend_from_slice(&key.payload);
    whole.extend_from_slice(&checksum(&key.payload, suffix));
    format!(
        "{}_{}_{}",
        key_type.tag(),
        suffix,
        bs58::encode(whole).into_string()
    )
}

/// Resolve a wire tag for `key_type`.
pub fn curve_for_tag(key_type: KeyType, tag: u32) -> Result<Curve> {
    Curve::from_tag(tag)
        .filter(|&curve| key_type.supports(curve))
        .ok_or_else(|| {
            AbiError::MalformedInput(format!("unknown {} type {}", key_type.label(), tag))
        })
}
