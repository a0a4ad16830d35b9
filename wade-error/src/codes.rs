// Wade - wade-error
// Module: Wade Error Codes
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for wade
//!
//! Codes are grouped by category: parse errors in 1000-1999, validation in
//! 5000-5999, type errors in 6000-6999, runtime errors in 7000-7999.

// Parse error codes (1000-1999)

/// General parse error
pub const PARSE_ERROR: u16 = 1000;
/// Input exhausted before a field completed
pub const UNEXPECTED_EOF: u16 = 1001;
/// Invalid magic number in the module header
pub const INVALID_MAGIC: u16 = 1002;
/// Unsupported version in the module header
pub const INVALID_VERSION: u16 = 1003;
/// Known section out of order or with an unknown id
pub const INVALID_SECTION_ORDER: u16 = 1004;
/// Invalid import description tag
pub const INVALID_IMPORT_TAG: u16 = 1005;
/// Invalid export description tag
pub const INVALID_EXPORT_TAG: u16 = 1006;
/// Function type does not start with the 0x60 tag
pub const INVALID_FUNC_TYPE_TAG: u16 = 1007;
/// Table type does not start with the funcref (0x70) tag
pub const INVALID_TABLE_TAG: u16 = 1008;
/// Limits flag byte outside {0x00, 0x01}
pub const INVALID_LIMITS_FLAG: u16 = 1009;
/// Code entry locals overrun the declared entry length
pub const INVALID_CODE_LENGTH: u16 = 1010;
/// Global mutability byte outside {0x00, 0x01} under strict decoding
pub const INVALID_MUTABILITY_FLAG: u16 = 1011;
/// Name bytes are not valid UTF-8
pub const INVALID_UTF8: u16 = 1012;

// Validation error codes (5000-5999)

/// General validation error
pub const VALIDATION_ERROR: u16 = 5000;

// Type error codes (6000-6999)

/// Value type byte outside the known set, reported at point of use
pub const UNKNOWN_VALUE_TYPE: u16 = 6000;
/// Type mismatch error
pub const TYPE_MISMATCH: u16 = 6001;

// Runtime error codes (7000-7999)

/// General runtime error
pub const RUNTIME_ERROR: u16 = 7000;
/// Stack underflow error
pub const STACK_UNDERFLOW: u16 = 7001;
/// Stack overflow error
pub const STACK_OVERFLOW: u16 = 7002;
