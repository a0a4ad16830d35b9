//! Wade format library
//!
//! Definitions for the WebAssembly binary format: the constants of the
//! encoding, the LEB128 integer codecs used throughout it, the type-layer
//! values (value types, limits, function types) and the decoded [`module::Module`]
//! representation. Decoding itself lives in `wade-decoder`; this crate only
//! describes the shapes the decoder produces.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod binary;
pub mod module;
pub mod types;

pub use module::Module;
pub use types::{Expr, FuncType, GlobalType, Limits, MemoryType, TableType, ValType};
