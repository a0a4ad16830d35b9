//! Operand stack for the instruction loop.
//!
//! A LIFO sequence of untyped 64-bit slots. No type tag is stored per
//! slot: the instruction being executed knows what it pushed, so the
//! push/pop discipline must pair widths and signedness. Everything is
//! expressed through the raw `u64` primitive; integers are widened into a
//! slot and narrowed back out, floats move as their IEEE-754 bit patterns
//! and are never numerically converted.
//!
//! Popping an empty stack is an interpreter invariant violation (a
//! mismatched instruction stream), not a reportable condition, and panics.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// The evaluation stack of untyped 64-bit slots.
#[derive(Debug, Default)]
pub struct OperandStack {
    slots: Vec<u64>,
}

impl OperandStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create an empty stack with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of slots on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Push a raw 64-bit slot.
    pub fn push_u64(&mut self, val: u64) {
        self.slots.push(val);
    }

    /// Pop a raw 64-bit slot.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub fn pop_u64(&mut self) -> u64 {
        match self.slots.pop() {
            Some(val) => val,
            None => panic!("operand stack underflow"),
        }
    }

    /// Push a signed 64-bit integer.
    pub fn push_s64(&mut self, val: i64) {
        self.push_u64(val as u64);
    }

    /// Pop a signed 64-bit integer.
    pub fn pop_s64(&mut self) -> i64 {
        self.pop_u64() as i64
    }

    /// Push an unsigned 32-bit integer, zero-extended into the slot.
    pub fn push_u32(&mut self, val: u32) {
        self.push_u64(u64::from(val));
    }

    /// Pop an unsigned 32-bit integer, discarding the high slot bits.
    pub fn pop_u32(&mut self) -> u32 {
        self.pop_u64() as u32
    }

    /// Push a signed 32-bit integer, sign-extended into the slot.
    pub fn push_s32(&mut self, val: i32) {
        self.push_u64(val as u64);
    }

    /// Pop a signed 32-bit integer, discarding the high slot bits.
    pub fn pop_s32(&mut self) -> i32 {
        self.pop_u64() as i32
    }

    /// Push a 64-bit float as its bit pattern.
    pub fn push_f64(&mut self, val: f64) {
        self.push_u64(val.to_bits());
    }

    /// Pop a 64-bit float from its bit pattern.
    pub fn pop_f64(&mut self) -> f64 {
        f64::from_bits(self.pop_u64())
    }

    /// Push a 32-bit float as its bit pattern, in the low slot bits.
    pub fn push_f32(&mut self, val: f32) {
        self.push_u32(val.to_bits());
    }

    /// Pop a 32-bit float from the low slot bits.
    pub fn pop_f32(&mut self) -> f32 {
        f32::from_bits(self.pop_u32())
    }

    /// Push a boolean as 1 or 0.
    pub fn push_bool(&mut self, val: bool) {
        self.push_u64(u64::from(val));
    }

    /// Pop a boolean: any non-zero slot is true.
    pub fn pop_bool(&mut self) -> bool {
        self.pop_u64() != 0
    }
}
