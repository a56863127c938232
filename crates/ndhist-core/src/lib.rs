//! Core error and numeric types for N-dimensional histograms
//!
//! Every ndhist crate reports failures through [`Error`] and bounds its bin
//! and sample scalars with [`BinValue`].
//!
//! # Example
//!
//! ```rust
//! use ndhist_core::{BinValue, Error, Result};
//!
//! fn snap(value: f64, width: f64) -> Result<f64> {
//!     if !value.is_finite() {
//!         return Err(Error::non_finite("sample"));
//!     }
//!     Ok((value / width).floor() * width)
//! }
//!
//! assert_eq!(snap(7.0, 5.0).unwrap(), 5.0);
//! assert_eq!(<u64 as BinValue>::to_f64(&3), 3.0);
//! ```

pub mod error;
pub mod numeric;

// Re-export core types
pub use error::{Error, Result};
pub use numeric::{point_to_f64, BinValue};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{BinValue, Result};
}
