//! WebAssembly type definitions.
//!
//! Value types are kept permissive at the format layer: the byte read from
//! the binary is stored as-is, and only turning it into a known type name
//! can fail. This keeps the decoder forward-compatible with value types it
//! does not know about; strict checking belongs to validation.

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use wade_error::{codes, Error, ErrorCategory, Result};

/// Index into the type section
pub type TypeIdx = u32;
/// Index into the function index space
pub type FuncIdx = u32;
/// Index into the table index space
pub type TableIdx = u32;
/// Index into the memory index space
pub type MemIdx = u32;
/// Index into the global index space
pub type GlobalIdx = u32;
/// Index into a function's locals
pub type LocalIdx = u32;
/// Label index inside a function body
pub type LabelIdx = u32;

/// A WebAssembly value type, stored as the raw encoding byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValType(pub u8);

impl ValType {
    /// 32-bit integer
    pub const I32: ValType = ValType(0x7F);
    /// 64-bit integer
    pub const I64: ValType = ValType(0x7E);
    /// 32-bit float
    pub const F32: ValType = ValType(0x7D);
    /// 64-bit float
    pub const F64: ValType = ValType(0x7C);

    /// Whether the byte is one of the four known numeric value types.
    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F32 | Self::F64)
    }

    /// The textual name of the type.
    ///
    /// This is the point of use where an unrecognized byte finally fails
    /// with `UNKNOWN_VALUE_TYPE`.
    pub fn name(self) -> Result<&'static str> {
        match self {
            Self::I32 => Ok("i32"),
            Self::I64 => Ok("i64"),
            Self::F32 => Ok("f32"),
            Self::F64 => Ok("f64"),
            Self(byte) => Err(Error::new(
                ErrorCategory::Type,
                codes::UNKNOWN_VALUE_TYPE,
                format!("unknown value type 0x{byte:02x}"),
            )),
        }
    }
}

/// Size bounds for a table or memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Minimum size (pages for memory, elements for table)
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

/// A table type: funcref elements bounded by limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableType {
    /// Table size bounds, in elements
    pub limits: Limits,
}

/// A memory type: linear memory bounded by limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryType {
    /// Memory size bounds, in 64KiB pages
    pub limits: Limits,
}

/// A global variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalType {
    /// Value type of the global
    pub val_type: ValType,
    /// Whether the global may be written after instantiation
    pub mutable: bool,
}

/// A function signature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    /// Parameter value types
    pub params: Vec<ValType>,
    /// Result value types
    pub results: Vec<ValType>,
}

impl FuncType {
    /// Create a new function type.
    #[must_use]
    pub fn new(params: Vec<ValType>, results: Vec<ValType>) -> Self {
        Self { params, results }
    }
}

/// An undecoded instruction stream.
///
/// Function bodies and initializer expressions stay as raw bytes at this
/// layer; turning them into opcodes is the interpreter's job. The `end`
/// marker that terminated the stream is not included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expr {
    /// The raw instruction bytes, without the trailing `end` opcode
    pub bytes: Vec<u8>,
}

impl Expr {
    /// Create an expression from raw instruction bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The raw instruction bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
