//! Bounded, forward-only reader over a module binary.
//!
//! Every decoding routine pulls bytes through a [`ByteCursor`]. The cursor
//! never mutates the underlying buffer and never reads past its end: an
//! out-of-bounds read fails with `UNEXPECTED_EOF` and, for multi-byte
//! reads, consumes nothing. Single-threaded use only; a decode session owns
//! its cursor exclusively.

use crate::prelude::*;

/// A positioned view over an immutable byte buffer.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current position from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Pre-allocation hint for a count-prefixed sequence.
    ///
    /// Declared counts come straight off the wire and must not drive
    /// allocation on their own: every sequence entry occupies at least one
    /// byte, so the bytes left in the buffer bound how many entries can
    /// actually follow.
    #[must_use]
    pub fn capacity_hint(&self, count: u32) -> usize {
        (count as usize).min(self.remaining())
    }

    fn eof(&self, wanted: usize) -> Error {
        Error::new(
            ErrorCategory::Parse,
            codes::UNEXPECTED_EOF,
            format!(
                "unexpected end of input at offset {} ({} bytes wanted, {} left)",
                self.pos,
                wanted,
                self.remaining()
            ),
        )
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or_else(|| self.eof(1))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read exactly `n` bytes.
    ///
    /// All-or-nothing: on failure the cursor does not move.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.eof(n));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 4-byte little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a LEB128 unsigned 32-bit integer.
    ///
    /// Returns the value and the number of bytes consumed, which callers
    /// reconciling declared byte lengths need.
    pub fn read_var_u32(&mut self) -> Result<(u32, usize)> {
        let (value, consumed) = binary::read_leb128_u32(self.bytes, self.pos)?;
        self.pos += consumed;
        Ok((value, consumed))
    }

    /// Read a LEB128 unsigned 64-bit integer.
    pub fn read_var_u64(&mut self) -> Result<(u64, usize)> {
        let (value, consumed) = binary::read_leb128_u64(self.bytes, self.pos)?;
        self.pos += consumed;
        Ok((value, consumed))
    }

    /// Read a LEB128 signed 32-bit integer.
    pub fn read_var_i32(&mut self) -> Result<(i32, usize)> {
        let (value, consumed) = binary::read_leb128_i32(self.bytes, self.pos)?;
        self.pos += consumed;
        Ok((value, consumed))
    }

    /// Read a LEB128 signed 64-bit integer.
    pub fn read_var_i64(&mut self) -> Result<(i64, usize)> {
        let (value, consumed) = binary::read_leb128_i64(self.bytes, self.pos)?;
        self.pos += consumed;
        Ok((value, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_byte_advances() {
        let mut cursor = ByteCursor::new(&[0xAA, 0xBB]);
        assert_eq!(cursor.read_byte().unwrap(), 0xAA);
        assert_eq!(cursor.read_byte().unwrap(), 0xBB);
        assert_eq!(cursor.remaining(), 0);
        let err = cursor.read_byte().unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_EOF);
    }

    #[test]
    fn read_bytes_is_all_or_nothing() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        let err = cursor.read_bytes(4).unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_EOF);
        // Nothing consumed on failure.
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_bytes(3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn read_u32_le_decodes_little_endian() {
        let mut cursor = ByteCursor::new(&[0x00, 0x61, 0x73, 0x6D]);
        assert_eq!(cursor.read_u32_le().unwrap(), binary::MAGIC_NUMBER);
    }

    #[test]
    fn var_u32_reports_bytes_consumed() {
        let mut cursor = ByteCursor::new(&[0x80, 0x01, 0x7F]);
        assert_eq!(cursor.read_var_u32().unwrap(), (128, 2));
        assert_eq!(cursor.read_var_u32().unwrap(), (127, 1));
    }

    #[test]
    fn capacity_hint_is_bounded_by_remaining_bytes() {
        let mut cursor = ByteCursor::new(&[1, 2, 3, 4]);
        cursor.read_byte().unwrap();
        assert_eq!(cursor.capacity_hint(2), 2);
        assert_eq!(cursor.capacity_hint(u32::MAX), 3);
        cursor.read_bytes(3).unwrap();
        assert_eq!(cursor.capacity_hint(1), 0);
    }

    #[test]
    fn var_u64_reports_bytes_consumed() {
        let mut cursor = ByteCursor::new(&[0x80, 0x01, 0x7F]);
        assert_eq!(cursor.read_var_u64().unwrap(), (128, 2));
        assert_eq!(cursor.read_var_u64().unwrap(), (127, 1));
    }

    #[test]
    fn truncated_var_u64_is_unexpected_eof() {
        let mut cursor = ByteCursor::new(&[0xFF]);
        let err = cursor.read_var_u64().unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_EOF);
    }

    #[test]
    fn truncated_var_u32_is_unexpected_eof() {
        let mut cursor = ByteCursor::new(&[0xFF]);
        let err = cursor.read_var_u32().unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_EOF);
    }

    #[test]
    fn var_i32_sign_extends() {
        let mut cursor = ByteCursor::new(&[0x7F]);
        assert_eq!(cursor.read_var_i32().unwrap(), (-1, 1));
    }

    #[test]
    fn var_i64_sign_extends() {
        let mut cursor = ByteCursor::new(&[0x7F]);
        assert_eq!(cursor.read_var_i64().unwrap(), (-1, 1));
    }
}
