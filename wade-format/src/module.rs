//! Decoded WebAssembly module representation.
//!
//! A [`Module`] is assembled field by field while the decoder walks the
//! section stream and is immutable once decoding finishes. Index fields are
//! plain positions into the sibling collections; range-checking them is
//! validation's job, not the format layer's.

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::types::{
    Expr, FuncIdx, FuncType, GlobalIdx, GlobalType, MemIdx, MemoryType, TableIdx, TableType,
    TypeIdx, ValType,
};

/// A custom section: a name plus opaque payload bytes.
///
/// Custom sections may appear anywhere in the stream and are preserved
/// unchanged even when the name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSection {
    /// Section name
    pub name: String,
    /// Opaque payload bytes, exactly as they appeared in the binary
    pub data: Vec<u8>,
}

/// What an import provides, keyed by the description tag byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDesc {
    /// Function import, referencing a type-section signature
    Func(TypeIdx),
    /// Table import
    Table(TableType),
    /// Memory import
    Memory(MemoryType),
    /// Global import
    Global(GlobalType),
}

/// A single import entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Module namespace the import is resolved in
    pub module: String,
    /// Name within the module namespace
    pub name: String,
    /// Import description
    pub desc: ImportDesc,
}

/// What an export refers to, keyed by the description tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDesc {
    /// Function export
    Func(FuncIdx),
    /// Table export
    Table(TableIdx),
    /// Memory export
    Memory(MemIdx),
    /// Global export
    Global(GlobalIdx),
}

/// A single export entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Exported name
    pub name: String,
    /// Export description
    pub desc: ExportDesc,
}

/// A global definition: its type plus an initializer expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    /// Global type
    pub global_type: GlobalType,
    /// Initializer expression, undecoded
    pub init: Expr,
}

/// An element segment seeding a table with function indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Table to initialize
    pub table: TableIdx,
    /// Offset expression, undecoded
    pub offset: Expr,
    /// Function indices placed at the offset
    pub init: Vec<FuncIdx>,
}

/// A run-length encoded group of locals in a code entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEntry {
    /// How many locals of this type
    pub count: u32,
    /// Their value type
    pub val_type: ValType,
}

/// A function body: locals declarations plus the instruction stream.
///
/// Index-aligned with [`Module::functions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    /// Run-length encoded locals
    pub locals: Vec<LocalEntry>,
    /// Instruction stream, undecoded
    pub body: Expr,
}

impl Code {
    /// Total number of locals declared across all run-length groups.
    ///
    /// Interpreters use this to size the call frame before executing the
    /// body.
    #[must_use]
    pub fn local_count(&self) -> u64 {
        self.locals.iter().map(|entry| u64::from(entry.count)).sum()
    }
}

/// A data segment seeding a linear memory with raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    /// Memory to initialize
    pub memory: MemIdx,
    /// Offset expression, undecoded
    pub offset: Expr,
    /// Bytes placed at the offset
    pub init: Vec<u8>,
}

/// A decoded WebAssembly module.
///
/// Each collection is populated exactly once while the corresponding section
/// is decoded. A module that fails to decode partway keeps everything that
/// decoded successfully, which is what diagnostics tooling wants to inspect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    /// Custom sections, in stream order
    pub custom_sections: Vec<CustomSection>,
    /// Function signatures (the type index space)
    pub types: Vec<FuncType>,
    /// Imports, in declaration order
    pub imports: Vec<Import>,
    /// Type indices of locally defined functions, parallel to `code`
    pub functions: Vec<TypeIdx>,
    /// Table definitions
    pub tables: Vec<TableType>,
    /// Memory definitions
    pub memories: Vec<MemoryType>,
    /// Global definitions
    pub globals: Vec<Global>,
    /// Exports, in declaration order
    pub exports: Vec<Export>,
    /// Start function index, if the module has one
    pub start: Option<FuncIdx>,
    /// Element segments
    pub elements: Vec<Element>,
    /// Function bodies, parallel to `functions`
    pub code: Vec<Code>,
    /// Data segments
    pub data: Vec<Data>,
}

impl Module {
    /// Create an empty module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_has_no_sections() {
        let module = Module::new();
        assert!(module.types.is_empty());
        assert!(module.custom_sections.is_empty());
        assert!(module.start.is_none());
    }

    #[test]
    fn local_count_sums_run_lengths() {
        let code = Code {
            locals: vec![
                LocalEntry { count: 2, val_type: ValType::I32 },
                LocalEntry { count: 3, val_type: ValType::F64 },
            ],
            body: Expr::default(),
        };
        assert_eq!(code.local_count(), 5);
    }

    #[test]
    fn local_count_does_not_overflow_u32() {
        let code = Code {
            locals: vec![
                LocalEntry { count: u32::MAX, val_type: ValType::I64 },
                LocalEntry { count: u32::MAX, val_type: ValType::I64 },
            ],
            body: Expr::default(),
        };
        assert_eq!(code.local_count(), 2 * u64::from(u32::MAX));
    }
}
