//! Core types for bin coordinates

use std::fmt;

/// Discrete position of a bin: one bin number per dimension
pub type BinIndex<const D: usize> = [usize; D];

/// One bin along one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinInterval {
    /// Lower edge of the bin (inclusive)
    pub left: f64,
    /// Upper edge of the bin (exclusive)
    pub right: f64,
}

impl BinInterval {
    /// Create a new interval
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }
}

impl fmt::Display for BinInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3})", self.left, self.right)
    }
}
