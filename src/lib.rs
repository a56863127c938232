//! N-dimensional histogram toolkit
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`ndhist_core`]: error type and the [`BinValue`](ndhist_core::BinValue)
//!   numeric trait
//! - [`ndhist_histogram`]: bin grids, dense and sparse storage, configuration
//!   and statistics
//!
//! ```rust
//! use ndhist::prelude::*;
//!
//! let layouts = [
//!     AxisLayout::Edges { edges: vec![0.0, 5.0, 10.0] },
//!     AxisLayout::Edges { edges: vec![0.0, 1.0, 2.0] },
//! ];
//! let samples = [[2.0, 0.5], [7.0, 1.5], [2.0, 1.9]];
//! let hist: DenseHistogram<u64, 2> = ndhist::dense_histogram(&layouts, &samples).unwrap();
//!
//! assert_eq!(hist.frequency(&[1, 1]).unwrap(), 1);
//! assert!((hist.entropy().unwrap() - 3f64.ln()).abs() < 1e-12);
//! ```

pub use ndhist_core;
pub use ndhist_histogram;

pub use ndhist_core::{Error, Result};
pub use ndhist_histogram::{dense_histogram, sparse_histogram};

/// Prelude module for convenient imports
pub mod prelude {
    pub use ndhist_core::prelude::*;
    pub use ndhist_histogram::{
        AnyHistogram, AxisLayout, BinGrid, BinIndex, DenseHistogram, Histogram,
        HistogramBuilder, HistogramConfig, HistogramOps, OutOfRangePolicy, SparseHistogram,
        StorageKind,
    };
}
