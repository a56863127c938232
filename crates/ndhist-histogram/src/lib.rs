//! N-dimensional histograms with independently configured bins per dimension
//!
//! This crate bins multi-channel samples (for example, the intensities of an
//! image across several channels) into discrete frequency counts. Each
//! dimension carries its own bin count and its own lower/upper edge per bin,
//! so bins may be uneven, or even leave gaps between them.
//!
//! # Key Features
//!
//! - **Coordinate system**: [`BinGrid`] converts points to bin indices, bin
//!   indices to corner points, and snaps raw values to bin edges
//! - **Half-open bins**: every bin is `[lower, upper)`; values with no bin are
//!   reported as errors, never clamped
//! - **Pluggable storage**: the [`Histogram`] trait with a dense
//!   ([`DenseHistogram`]) and a sparse ([`SparseHistogram`]) implementation
//! - **Configuration**: JSON-loadable [`HistogramConfig`] with automatic
//!   dense/sparse selection
//! - **Statistics**: mode, marginals, mean, entropy and merging through
//!   [`HistogramOps`]
//!
//! # Examples
//!
//! ## Configuring a grid by hand
//!
//! ```rust
//! use ndhist_histogram::{BinGrid, DenseHistogram, Histogram};
//!
//! let mut grid = BinGrid::<2>::new();
//! grid.set_dimension_size(0, 2).unwrap();
//! grid.set_dimension_size(1, 2).unwrap();
//! grid.allocate_mins();
//! grid.allocate_maxs();
//! grid.set_dimension_bounds(0, vec![0.0, 5.0], vec![5.0, 10.0]).unwrap();
//! grid.set_dimension_bounds(1, vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
//!
//! let mut hist = DenseHistogram::<u64, 2>::with_grid(grid).unwrap();
//! for sample in [[2.0, 0.5], [7.0, 1.5], [2.0, 1.9]] {
//!     hist.increment_at(&sample).unwrap();
//! }
//!
//! assert_eq!(hist.frequency(&[0, 1]).unwrap(), 1);
//! assert_eq!(hist.frequency(&[1, 0]).unwrap(), 0);
//! assert_eq!(hist.grid().bin_min_from_value(0, 7.0).unwrap(), 5.0);
//! ```
//!
//! ## Building from configuration
//!
//! ```rust
//! use ndhist_histogram::{
//!     AnyHistogram, AxisLayout, HistogramBuilder, HistogramConfig, HistogramOps,
//!     OutOfRangePolicy, StorageKind,
//! };
//!
//! let config = HistogramConfig::new(vec![
//!     AxisLayout::Uniform { bins: 16, min: 0.0, max: 256.0 },
//!     AxisLayout::Uniform { bins: 16, min: 0.0, max: 256.0 },
//!     AxisLayout::Uniform { bins: 16, min: 0.0, max: 256.0 },
//! ])
//! .with_storage(StorageKind::Auto { expected_occupancy: 32 })
//! .with_out_of_range(OutOfRangePolicy::Skip);
//!
//! let pixels = [[12u32, 200, 40], [13, 201, 41], [255, 0, 0], [300, 0, 0]];
//! let hist: AnyHistogram<u64, 3> = HistogramBuilder::new(config).build(&pixels).unwrap();
//!
//! assert_eq!(hist.storage(), StorageKind::Sparse);
//! assert_eq!(hist.total_frequency().unwrap(), 3.0);
//! assert_eq!(hist.mode().unwrap(), Some(([0, 12, 2], 2)));
//! ```

pub mod builders;
pub mod config;
pub mod dense;
pub mod grid;
pub mod ops;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sparse;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use builders::{fill, AnyHistogram, FillSummary, HistogramBuilder};
pub use config::{AxisLayout, HistogramConfig, OutOfRangePolicy, StorageKind};
pub use dense::DenseHistogram;
pub use grid::BinGrid;
pub use ops::HistogramOps;
pub use sparse::SparseHistogram;
pub use traits::Histogram;
pub use types::{BinIndex, BinInterval};

#[cfg(feature = "parallel")]
pub use parallel::fill_parallel;

use ndhist_core::BinValue;

// Convenience functions
/// Create a dense histogram over `layouts` holding the counts of `samples`
pub fn dense_histogram<B, P, const D: usize>(
    layouts: &[AxisLayout],
    samples: &[[P; D]],
) -> crate::Result<DenseHistogram<B, D>>
where
    B: BinValue,
    P: BinValue,
{
    let mut histogram = DenseHistogram::with_grid(BinGrid::from_layouts(layouts)?)?;
    fill(&mut histogram, samples, OutOfRangePolicy::Error)?;
    Ok(histogram)
}

/// Create a sparse histogram over `layouts` holding the counts of `samples`
pub fn sparse_histogram<B, P, const D: usize>(
    layouts: &[AxisLayout],
    samples: &[[P; D]],
) -> crate::Result<SparseHistogram<B, D>>
where
    B: BinValue,
    P: BinValue,
{
    let mut histogram = SparseHistogram::with_grid(BinGrid::from_layouts(layouts)?)?;
    fill(&mut histogram, samples, OutOfRangePolicy::Error)?;
    Ok(histogram)
}

pub use ndhist_core::{Error, Result};
