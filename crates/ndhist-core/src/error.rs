//! Error types for histogram construction and lookup
//!
//! Provides a unified error type for all ndhist crates.

use thiserror::Error;

/// Core error type for histogram operations
#[derive(Error, Debug)]
pub enum Error {
    /// Boundary or frequency storage accessed before it was allocated
    #[error("Unconfigured access: {what} not allocated")]
    UnconfiguredAccess { what: &'static str },

    /// A continuous value falls outside every bin of a dimension
    #[error("Value {value} is outside the bins of dimension {dimension}")]
    OutOfRangeValue { dimension: usize, value: f64 },

    /// A discrete index coordinate is not below the dimension's bin count
    #[error("Index {index} out of range for dimension {dimension} with {size} bins")]
    OutOfRangeIndex {
        dimension: usize,
        index: usize,
        size: usize,
    },

    /// Dimension number not below the histogram's dimensionality
    #[error("Dimension {dimension} out of range for a {dimensions}-dimensional histogram")]
    InvalidDimension { dimension: usize, dimensions: usize },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for storage that has not been allocated yet
    pub fn unconfigured(what: &'static str) -> Self {
        Self::UnconfiguredAccess { what }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a frequency that no longer fits its value type
    pub fn frequency_overflow(context: &str) -> Self {
        Self::InvalidInput(format!("frequency overflow in {context}"))
    }

    /// True for errors caused by a coordinate or index outside the bins
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::OutOfRangeValue { .. } | Self::OutOfRangeIndex { .. }
        )
    }
}
