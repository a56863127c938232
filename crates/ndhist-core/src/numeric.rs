//! Numeric trait for histogram bin values and sample coordinates
//!
//! The same trait bounds both what a bin stores (counts or weights) and the
//! scalar type of incoming sample points. Bin edges are always `f64`, so
//! every `BinValue` converts losslessly enough to `f64` for lookup.

use num_traits::Num;
use std::fmt::Debug;
use std::ops::AddAssign;

/// Base trait for values stored in, or looked up against, a histogram
pub trait BinValue: Num + Copy + PartialOrd + Debug + AddAssign + Send + Sync + 'static {
    /// Check if value is finite (always true for integers)
    fn is_finite(&self) -> bool;

    /// Convert from f64 (for creating constants)
    fn from_f64(val: f64) -> Self;

    /// Convert to f64 (for comparison against bin edges)
    fn to_f64(&self) -> f64;

    /// Sum of two values, or `None` when an integer type would overflow
    fn try_add(self, other: Self) -> Option<Self>;
}

// =============================================================================
// BinValue implementations for concrete types
// =============================================================================

impl BinValue for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn from_f64(val: f64) -> Self {
        val
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn try_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

impl BinValue for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }

    fn from_f64(val: f64) -> Self {
        val as f32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

impl BinValue for i32 {
    fn is_finite(&self) -> bool {
        true // Integers are always finite
    }

    fn from_f64(val: f64) -> Self {
        val as i32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl BinValue for u32 {
    fn is_finite(&self) -> bool {
        true
    }

    fn from_f64(val: f64) -> Self {
        val as u32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl BinValue for i64 {
    fn is_finite(&self) -> bool {
        true
    }

    fn from_f64(val: f64) -> Self {
        val as i64
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl BinValue for u64 {
    fn is_finite(&self) -> bool {
        true
    }

    fn from_f64(val: f64) -> Self {
        val as u64
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl BinValue for usize {
    fn is_finite(&self) -> bool {
        true
    }

    fn from_f64(val: f64) -> Self {
        val as usize
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn try_add(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

/// Convert a whole point to `f64` coordinates
pub fn point_to_f64<P: BinValue, const D: usize>(point: &[P; D]) -> [f64; D] {
    std::array::from_fn(|d| point[d].to_f64())
}

// =============================================================================
// Tests
// =============================================================================
