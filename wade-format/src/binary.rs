//! WebAssembly binary format constants and integer codecs.
//!
//! Every count, index and length in the binary format is a LEB128 variable
//! length integer: 7 value bits per byte, continuation flag in the high bit,
//! least significant group first. The readers here return the decoded value
//! together with the number of bytes consumed, because callers that account
//! for declared byte lengths (code entries, custom sections) need both.

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use wade_error::{codes, Error, ErrorCategory, Result};

/// Magic bytes for WebAssembly modules: \0asm
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// WebAssembly binary format version
pub const WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// The magic bytes read as a little-endian u32
pub const MAGIC_NUMBER: u32 = 0x6D73_6100;

/// The version bytes read as a little-endian u32
pub const VERSION_NUMBER: u32 = 1;

/// WebAssembly section IDs
pub const CUSTOM_SECTION_ID: u8 = 0x00;
/// Type section id
pub const TYPE_SECTION_ID: u8 = 0x01;
/// Import section id
pub const IMPORT_SECTION_ID: u8 = 0x02;
/// Function section id
pub const FUNCTION_SECTION_ID: u8 = 0x03;
/// Table section id
pub const TABLE_SECTION_ID: u8 = 0x04;
/// Memory section id
pub const MEMORY_SECTION_ID: u8 = 0x05;
/// Global section id
pub const GLOBAL_SECTION_ID: u8 = 0x06;
/// Export section id
pub const EXPORT_SECTION_ID: u8 = 0x07;
/// Start section id
pub const START_SECTION_ID: u8 = 0x08;
/// Element section id
pub const ELEMENT_SECTION_ID: u8 = 0x09;
/// Code section id
pub const CODE_SECTION_ID: u8 = 0x0A;
/// Data section id
pub const DATA_SECTION_ID: u8 = 0x0B;

/// Import description tags
pub const IMPORT_TAG_FUNC: u8 = 0x00;
/// Table import tag
pub const IMPORT_TAG_TABLE: u8 = 0x01;
/// Memory import tag
pub const IMPORT_TAG_MEMORY: u8 = 0x02;
/// Global import tag
pub const IMPORT_TAG_GLOBAL: u8 = 0x03;

/// Export description tags
pub const EXPORT_TAG_FUNC: u8 = 0x00;
/// Table export tag
pub const EXPORT_TAG_TABLE: u8 = 0x01;
/// Memory export tag
pub const EXPORT_TAG_MEMORY: u8 = 0x02;
/// Global export tag
pub const EXPORT_TAG_GLOBAL: u8 = 0x03;

/// Function type tag byte
pub const FUNC_TYPE_TAG: u8 = 0x60;

/// Table element type tag byte (funcref)
pub const TABLE_TYPE_TAG: u8 = 0x70;

/// Limits flag: minimum only
pub const LIMITS_FLAG_MIN: u8 = 0x00;
/// Limits flag: minimum and maximum
pub const LIMITS_FLAG_MIN_MAX: u8 = 0x01;

/// Global mutability flag: immutable
pub const MUTABILITY_CONST: u8 = 0x00;
/// Global mutability flag: mutable
pub const MUTABILITY_VAR: u8 = 0x01;

/// The `end` opcode terminating an expression
pub const END_OPCODE: u8 = 0x0B;

fn truncated() -> Error {
    Error::new(
        ErrorCategory::Parse,
        codes::UNEXPECTED_EOF,
        "truncated LEB128 integer",
    )
}

/// Read a LEB128 unsigned 32-bit integer from a byte slice.
///
/// Returns the value and the number of bytes consumed.
pub fn read_leb128_u32(bytes: &[u8], pos: usize) -> Result<(u32, usize)> {
    let mut result = 0u32;
    let mut shift = 0u32;
    let mut offset = 0usize;

    loop {
        if pos + offset >= bytes.len() {
            return Err(truncated());
        }

        let byte = bytes[pos + offset];
        offset += 1;

        result |= u32::from(byte & 0x7F) << shift;

        if byte & 0x80 == 0 {
            break;
        }

        shift += 7;
        if shift >= 32 {
            return Err(Error::parse_error("LEB128 integer too large for u32"));
        }
    }

    Ok((result, offset))
}

/// Read a LEB128 unsigned 64-bit integer from a byte slice.
pub fn read_leb128_u64(bytes: &[u8], pos: usize) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut offset = 0usize;

    loop {
        if pos + offset >= bytes.len() {
            return Err(truncated());
        }

        let byte = bytes[pos + offset];
        offset += 1;

        result |= u64::from(byte & 0x7F) << shift;

        if byte & 0x80 == 0 {
            break;
        }

        shift += 7;
        if shift >= 64 {
            return Err(Error::parse_error("LEB128 integer too large for u64"));
        }
    }

    Ok((result, offset))
}

/// Read a LEB128 signed 32-bit integer from a byte slice.
///
/// Two's-complement sign extension is applied when the final byte has the
/// sign bit (0x40) set.
pub fn read_leb128_i32(bytes: &[u8], pos: usize) -> Result<(i32, usize)> {
    let mut result = 0i32;
    let mut shift = 0u32;
    let mut offset = 0usize;
    let mut byte;

    loop {
        if pos + offset >= bytes.len() {
            return Err(truncated());
        }

        byte = bytes[pos + offset];
        offset += 1;

        result |= i32::from(byte & 0x7F) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            break;
        }

        if shift >= 32 {
            return Err(Error::parse_error("LEB128 integer too large for i32"));
        }
    }

    if shift < 32 && (byte & 0x40) != 0 {
        result |= !0 << shift;
    }

    Ok((result, offset))
}

/// Read a LEB128 signed 64-bit integer from a byte slice.
pub fn read_leb128_i64(bytes: &[u8], pos: usize) -> Result<(i64, usize)> {
    let mut result = 0i64;
    let mut shift = 0u32;
    let mut offset = 0usize;
    let mut byte;

    loop {
        if pos + offset >= bytes.len() {
            return Err(truncated());
        }

        byte = bytes[pos + offset];
        offset += 1;

        result |= i64::from(byte & 0x7F) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            break;
        }

        if shift >= 64 {
            return Err(Error::parse_error("LEB128 integer too large for i64"));
        }
    }

    if shift < 64 && (byte & 0x40) != 0 {
        result |= !0 << shift;
    }

    Ok((result, offset))
}

/// Write a LEB128 unsigned 32-bit integer.
pub fn write_leb128_u32(value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    let mut value = value;

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }

    out
}

/// Write a LEB128 unsigned 64-bit integer.
pub fn write_leb128_u64(value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    let mut value = value;

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }

    out
}

/// Write a LEB128 signed 32-bit integer.
pub fn write_leb128_i32(value: i32) -> Vec<u8> {
    let mut out = Vec::new();
    let mut value = value;

    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
        out.push(if done { byte } else { byte | 0x80 });
        if done {
            break;
        }
    }

    out
}

/// Write a LEB128 signed 64-bit integer.
pub fn write_leb128_i64(value: i64) -> Vec<u8> {
    let mut out = Vec::new();
    let mut value = value;

    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
        out.push(if done { byte } else { byte | 0x80 });
        if done {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn u32_canonical_values() {
        for (bytes, expected, len) in [
            (&[0x00][..], 0u32, 1usize),
            (&[0x01][..], 1, 1),
            (&[0x7F][..], 127, 1),
            (&[0x80, 0x01][..], 128, 2),
            (&[0xFF, 0xFF, 0xFF, 0xFF, 0x07][..], u32::MAX >> 1, 5),
        ] {
            let (value, consumed) = read_leb128_u32(bytes, 0).unwrap();
            assert_eq!(value, expected);
            assert_eq!(consumed, len);
        }
    }

    #[test]
    fn u32_reads_at_offset() {
        let bytes = [0xAA, 0xAA, 0x80, 0x01];
        let (value, consumed) = read_leb128_u32(&bytes, 2).unwrap();
        assert_eq!(value, 128);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn truncated_u32_is_unexpected_eof() {
        // Continuation bit set on the last available byte.
        let err = read_leb128_u32(&[0x80], 0).unwrap_err();
        assert_eq!(err.code, wade_error::codes::UNEXPECTED_EOF);

        let err = read_leb128_u32(&[], 0).unwrap_err();
        assert_eq!(err.code, wade_error::codes::UNEXPECTED_EOF);
    }

    #[test]
    fn overlong_u32_rejected() {
        let err = read_leb128_u32(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01], 0).unwrap_err();
        assert_eq!(err.code, wade_error::codes::PARSE_ERROR);
    }

    #[test]
    fn u64_canonical_values() {
        for (bytes, expected, len) in [
            (&[0x00][..], 0u64, 1usize),
            (&[0x7F][..], 127, 1),
            (&[0x80, 0x01][..], 128, 2),
            (
                &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01][..],
                u64::MAX,
                10,
            ),
        ] {
            let (value, consumed) = read_leb128_u64(bytes, 0).unwrap();
            assert_eq!(value, expected);
            assert_eq!(consumed, len);
        }
    }

    #[test]
    fn truncated_u64_is_unexpected_eof() {
        let err = read_leb128_u64(&[0x80], 0).unwrap_err();
        assert_eq!(err.code, wade_error::codes::UNEXPECTED_EOF);
    }

    #[test]
    fn overlong_u64_rejected() {
        // Eleven bytes: one continuation group past the 64-bit maximum.
        let bytes = [0x80; 10];
        let mut overlong = bytes.to_vec();
        overlong.push(0x01);
        let err = read_leb128_u64(&overlong, 0).unwrap_err();
        assert_eq!(err.code, wade_error::codes::PARSE_ERROR);
    }

    #[test]
    fn i32_sign_extension() {
        let (value, consumed) = read_leb128_i32(&[0x7F], 0).unwrap();
        assert_eq!(value, -1);
        assert_eq!(consumed, 1);

        let (value, _) = read_leb128_i32(&[0xC0, 0xBB, 0x78], 0).unwrap();
        assert_eq!(value, -123_456);
    }

    #[test]
    fn i64_sign_extension() {
        let (value, consumed) = read_leb128_i64(&[0x7F], 0).unwrap();
        assert_eq!(value, -1);
        assert_eq!(consumed, 1);
    }

    proptest! {
        #[test]
        fn u32_round_trip(value: u32) {
            let encoded = write_leb128_u32(value);
            let (decoded, consumed) = read_leb128_u32(&encoded, 0).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(consumed, encoded.len());
        }

        #[test]
        fn u64_round_trip(value: u64) {
            let encoded = write_leb128_u64(value);
            let (decoded, consumed) = read_leb128_u64(&encoded, 0).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(consumed, encoded.len());
        }

        #[test]
        fn i32_round_trip(value: i32) {
            let encoded = write_leb128_i32(value);
            let (decoded, consumed) = read_leb128_i32(&encoded, 0).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(consumed, encoded.len());
        }

        #[test]
        fn i64_round_trip(value: i64) {
            let encoded = write_leb128_i64(value);
            let (decoded, consumed) = read_leb128_i64(&encoded, 0).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(consumed, encoded.len());
        }
    }
}
