//! Prelude module for wade-decoder
//!
//! Provides a unified set of imports for both std and no_std environments,
//! re-exporting the types the decoder modules use on every page.

#[cfg(feature = "std")]
pub use std::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

// Re-export from wade-error
pub use wade_error::{codes, Error, ErrorCategory, Result};

// Re-export from wade-format
pub use wade_format::{binary, module::Module};
