// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Growable output buffer and bounded read cursor.
//!
//! The wire format is little-endian with no padding, so unlike CDR there
//! is no alignment bookkeeping: the writer only appends and the reader
//! only advances.

use crate::error::{AbiError, Result};

/// Append-only output buffer.
#[derive(Debug, Default)]
pub struct WriteBuffer {
    buffer: Vec<u8>,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buffer.push(v);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Unsigned LEB128, minimal length.
    pub fn write_varuint32(&mut self, mut v: u32) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buffer.push(byte);
                return;
            }
            self.buffer.push(byte | 0x80);
        }
    }

    /// Zigzag-mapped signed LEB128.
    pub fn write_varint32(&mut self, v: i32) {
        self.write_varuint32(((v << 1) ^ (v >> 31)) as u32);
    }

    /// varuint32 length prefix followed by the raw bytes.
    pub fn write_sized(&mut self, bytes: &[u8]) -> Result<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| {
            AbiError::OutOfRange(format!("length {} exceeds varuint32", bytes.len()))
        })?;
        self.write_varuint32(len);
        self.write_bytes(bytes);
        Ok(())
    }
}

/// Read cursor over a borrowed byte slice.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes consumed since `start` (an earlier [`position`](Self::position)).
    pub fn since(&self, start: usize) -> &'a [u8] {
        &self.buffer[start.min(self.offset)..self.offset]
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(AbiError::read_past_end());
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_varuint32(&mut self) -> Result<u32> {
        let mut result: u64 = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            result |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= 35 {
                return Err(AbiError::MalformedInput("varuint32 is too long".into()));
            }
        }
        u32::try_from(result)
            .map_err(|_| AbiError::MalformedInput("varuint32 overflows 32 bits".into()))
    }

    pub fn read_varint32(&mut self) -> Result<i32> {
        let v = self.read_varuint32()?;
        Ok(((v >> 1) as i32) ^ -((v & 1) as i32))
    }

    /// varuint32 length prefix followed by that many bytes.
    pub fn read_sized(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varuint32()? as usize;
        self.read_bytes(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varuint(v: u32) -> Vec<u8> {
        let mut buf = WriteBuffer::new();
        buf.write_varuint32(v);
        buf.into_bytes()
    }

    #[test]
    fn test_varuint32_layout() {
        assert_eq!(varuint(0), [0x00]);
        assert_eq!(varuint(127), [0x7f]);
        assert_eq!(varuint(128), [0x80, 0x01]);
        assert_eq!(varuint(16384), [0x80, 0x80, 0x01]);
        assert_eq!(varuint(u32::MAX), [0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_varint32_zigzag() {
        let cases = [(0, 0x00u8), (-1, 0x01), (1, 0x02), (-2, 0x03), (2, 0x04)];
        for (v, byte) in cases {
            let mut buf = WriteBuffer::new();
            buf.write_varint32(v);
            let bytes = buf.into_bytes();
            assert_eq!(bytes, [byte]);
            assert_eq!(ReadCursor::new(&bytes).read_varint32().unwrap(), v);
        }

        let mut buf = WriteBuffer::new();
        buf.write_varint32(i32::MIN);
        let bytes = buf.into_bytes();
        assert_eq!(bytes, [0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_eq!(ReadCursor::new(&bytes).read_varint32().unwrap(), i32::MIN);
    }

    #[test]
    fn test_varuint32_overflow_rejected() {
        let bytes = [0xff, 0xff, 0xff, 0xff, 0x1f];
        let err = ReadCursor::new(&bytes).read_varuint32().unwrap_err();
        assert!(err.to_string().contains("overflows"));

        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(ReadCursor::new(&bytes).read_varuint32().is_err());
    }

    #[test]
    fn test_read_past_end() {
        let bytes = [0x01];
        let mut cursor = ReadCursor::new(&bytes);
        assert!(cursor.read_bytes(2).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert!(cursor.at_end());
        let err = cursor.read_u8().unwrap_err();
        assert_eq!(err.to_string(), "malformed input: read past end of buffer");
    }

    #[test]
    fn test_sized() {
        let mut buf = WriteBuffer::new();
        buf.write_sized(b"abc").unwrap();
        let bytes = buf.into_bytes();
        assert_eq!(bytes, [3, b'a', b'b', b'c']);

        let mut cursor = ReadCursor::new(&bytes);
        assert_eq!(cursor.read_sized().unwrap(), b"abc");
        assert!(cursor.at_end());

        // Length prefix larger than the payload.
        assert!(ReadCursor::new(&[5, 1, 2]).read_sized().is_err());
    }
}
