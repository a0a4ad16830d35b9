//! Wade runtime primitives
//!
//! Execution-side building blocks for the wade interpreter. Currently this
//! is the operand stack the instruction loop evaluates on; memories,
//! tables and call frames build on top of it.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod stack;

pub use stack::OperandStack;
