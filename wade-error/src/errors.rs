// Wade - wade-error
// Module: Wade Error Types
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for wade
//!
//! This module provides the error type used across the wade codebase.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::codes;

/// `Error` categories for wade operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Core WebAssembly errors
    Core = 1,
    /// Validation errors
    Validation = 5,
    /// Type errors
    Type = 6,
    /// Runtime errors
    Runtime = 7,
    /// System errors
    System = 8,
    /// Parse errors
    Parse = 10,
}

/// Wade `Error` type
///
/// The main error type for the wade toolchain. It pairs a category and a
/// numeric code (stable, matchable) with a message that carries positional
/// context such as the section and entry index where decoding failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code: u16,
    /// `Error` message
    pub message: String,
}

impl Error {
    /// Create a new error.
    pub fn new(category: ErrorCategory, code: u16, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Prefix the message with extra context, keeping category and code.
    #[must_use]
    pub fn context(self, prefix: &str) -> Self {
        let mut message = String::with_capacity(prefix.len() + 2 + self.message.len());
        message.push_str(prefix);
        message.push_str(": ");
        message.push_str(&self.message);
        Self { message, ..self }
    }

    // Factory methods

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::PARSE_ERROR, message)
    }

    /// Create a validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, codes::VALIDATION_ERROR, message)
    }

    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Type, codes::TYPE_MISMATCH, message)
    }

    /// Create a runtime error
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Runtime, codes::RUNTIME_ERROR, message)
    }

    // Category predicates

    /// Check if this is a parse error
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.category == ErrorCategory::Parse
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.category == ErrorCategory::Validation
    }

    /// Check if this is a type error
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        self.category == ErrorCategory::Type
    }

    /// Check if this is a runtime error
    #[must_use]
    pub fn is_runtime_error(&self) -> bool {
        self.category == ErrorCategory::Runtime
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}:{}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
