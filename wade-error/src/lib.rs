// Wade - wade-error
// Module: Wade Error Handling
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Wade error handling library
//!
//! This library provides the error handling system shared by every wade
//! crate. Errors carry a category, a numeric code and a human-readable
//! message, so a failure deep inside the binary decoder can be matched on
//! programmatically while still printing a useful diagnostic.
//!
//! # Usage
//!
//! ```
//! use wade_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Parse,
//!     codes::INVALID_IMPORT_TAG,
//!     "import 3: invalid import tag 0x05",
//! );
//! assert!(error.is_parse_error());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Error codes for wade
pub mod codes;
/// Error and error handling types
pub mod errors;

// Re-export key types
pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for wade operations.
///
/// This type alias uses `wade_error::Error` as the error type.
pub type Result<T> = core::result::Result<T, Error>;
