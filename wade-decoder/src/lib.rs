//! Wade WebAssembly module decoder
//!
//! Turns a WebAssembly binary — the length-prefixed, section-structured
//! byte stream — into the structured [`wade_format::Module`]
//! representation. The decoder is purely structural: it enforces the
//! header, section ordering and length accounting of the encoding, and
//! leaves index-range and type checking to validation.
//!
//! ```
//! use wade_decoder::decode_module;
//!
//! let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//! let module = decode_module(&bytes).into_result().unwrap();
//! assert!(module.types.is_empty());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod module;
pub mod prelude;
pub mod primitives;
pub mod reader;
pub mod sections;

// Re-export key types
pub use module::{decode_module, decode_module_with_options, DecodeOptions, DecodeOutput};
pub use reader::ByteCursor;
