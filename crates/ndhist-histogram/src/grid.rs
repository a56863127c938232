//! Bin boundary tables and the continuous ↔ discrete coordinate system
//!
//! A [`BinGrid`] holds, for each of `D` dimensions, a bin count and two
//! tables of edges: the lower and the upper edge of every bin. Every bin is
//! the half-open interval `[lower, upper)`, the last bin of a dimension
//! included, so a value equal to the final upper edge has no bin.
//!
//! The grid goes through an explicit lifecycle driven by its owner:
//!
//! 1. set bin counts with [`BinGrid::set_dimension_size`]
//! 2. allocate the edge tables with [`BinGrid::allocate_mins`] and
//!    [`BinGrid::allocate_maxs`]
//! 3. write edges with [`BinGrid::set_bin_min`] / [`BinGrid::set_bin_max`]
//!    or [`BinGrid::set_dimension_bounds`]
//!
//! Reading a table before it is allocated returns
//! [`Error::UnconfiguredAccess`]. Changing a bin count after allocation drops
//! both tables, so stale edges are never read.
//!
//! Within a dimension, bins are expected to be non-empty, sorted and
//! non-overlapping (`lower[n] < upper[n] <= lower[n + 1]`). Lookups rely on that ordering
//! for their binary search but do not check it; [`BinGrid::validate`] does.
//!
//! # Example
//!
//! ```rust
//! use ndhist_histogram::BinGrid;
//!
//! let mut grid = BinGrid::<1>::new();
//! grid.set_dimension_size(0, 2).unwrap();
//! grid.allocate_mins();
//! grid.allocate_maxs();
//! grid.set_dimension_bounds(0, vec![0.0, 5.0], vec![5.0, 10.0]).unwrap();
//!
//! assert_eq!(grid.index(&[7.0]).unwrap(), [1]);
//! assert_eq!(grid.bin_min_from_value(0, 7.0).unwrap(), 5.0);
//! assert!(grid.index(&[10.0]).is_err());
//! ```

use crate::config::AxisLayout;
use crate::types::{BinIndex, BinInterval};
use ndhist_core::{BinValue, Error, Result};

/// Per-dimension bin counts and edge tables
#[derive(Debug, Clone, PartialEq)]
pub struct BinGrid<const D: usize> {
    /// Number of bins along each dimension
    sizes: [usize; D],
    /// Lower edge of each bin, per dimension
    mins: Option<[Vec<f64>; D]>,
    /// Upper edge of each bin, per dimension
    maxs: Option<[Vec<f64>; D]>,
}

impl<const D: usize> Default for BinGrid<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> BinGrid<D> {
    /// Create an unconfigured grid with no bins
    pub fn new() -> Self {
        Self {
            sizes: [0; D],
            mins: None,
            maxs: None,
        }
    }

    /// Create a grid with the given bin counts and zeroed edge tables
    pub fn with_sizes(sizes: [usize; D]) -> Self {
        let mut grid = Self {
            sizes,
            mins: None,
            maxs: None,
        };
        grid.allocate_mins();
        grid.allocate_maxs();
        grid
    }

    /// Build a fully populated grid from one layout per dimension
    ///
    /// The resulting grid is validated before it is returned.
    pub fn from_layouts(layouts: &[AxisLayout]) -> Result<Self> {
        if layouts.len() != D {
            return Err(Error::size_mismatch(D, layouts.len(), "axis layouts"));
        }

        let mut tables = Vec::with_capacity(D);
        let mut grid = Self::new();
        for (d, layout) in layouts.iter().enumerate() {
            let (mins, maxs) = layout.boundaries()?;
            grid.set_dimension_size(d, mins.len())?;
            tables.push((mins, maxs));
        }

        grid.allocate_mins();
        grid.allocate_maxs();
        for (d, (mins, maxs)) in tables.into_iter().enumerate() {
            grid.set_dimension_bounds(d, mins, maxs)?;
        }

        grid.validate()?;
        Ok(grid)
    }

    /// Number of dimensions
    pub const fn dimensions(&self) -> usize {
        D
    }

    /// Bin counts of all dimensions
    pub fn sizes(&self) -> &[usize; D] {
        &self.sizes
    }

    /// Get the number of bins of dimension `d`
    pub fn dimension_size(&self, dimension: usize) -> Result<usize> {
        self.check_dimension(dimension)?;
        Ok(self.sizes[dimension])
    }

    /// Set the number of bins of dimension `d`
    ///
    /// Changing the count of an allocated grid drops both edge tables; they
    /// must be allocated and populated again.
    pub fn set_dimension_size(&mut self, dimension: usize, size: usize) -> Result<()> {
        self.check_dimension(dimension)?;
        let previous = self.sizes[dimension];
        if previous != size && (self.mins.is_some() || self.maxs.is_some()) {
            log::debug!(
                "bin count of dimension {dimension} changed from {previous} to {size}, dropping edge tables"
            );
            self.mins = None;
            self.maxs = None;
        }
        self.sizes[dimension] = size;
        Ok(())
    }

    /// Allocate the lower-edge table using the current bin counts
    pub fn allocate_mins(&mut self) {
        log::debug!("allocating lower edges for bin counts {:?}", self.sizes);
        self.mins = Some(self.zeroed_tables());
    }

    /// Allocate the upper-edge table using the current bin counts
    pub fn allocate_maxs(&mut self) {
        log::debug!("allocating upper edges for bin counts {:?}", self.sizes);
        self.maxs = Some(self.zeroed_tables());
    }

    /// True once both edge tables are allocated
    pub fn is_allocated(&self) -> bool {
        self.mins.is_some() && self.maxs.is_some()
    }

    /// Total number of bins, or `None` if the product overflows
    pub fn total_bins(&self) -> Option<usize> {
        self.sizes
            .iter()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size))
    }

    /// Get the lower edge of bin `n` of dimension `d`
    pub fn bin_min(&self, dimension: usize, bin: usize) -> Result<f64> {
        self.check_dimension(dimension)?;
        let mins = self.min_tables()?;
        self.check_bin(dimension, bin)?;
        Ok(mins[dimension][bin])
    }

    /// Get the upper edge of bin `n` of dimension `d`
    pub fn bin_max(&self, dimension: usize, bin: usize) -> Result<f64> {
        self.check_dimension(dimension)?;
        let maxs = self.max_tables()?;
        self.check_bin(dimension, bin)?;
        Ok(maxs[dimension][bin])
    }

    /// Set the lower edge of bin `n` of dimension `d`
    pub fn set_bin_min(&mut self, dimension: usize, bin: usize, value: f64) -> Result<()> {
        self.check_dimension(dimension)?;
        self.min_tables()?;
        self.check_bin(dimension, bin)?;
        if let Some(mins) = self.mins.as_mut() {
            mins[dimension][bin] = value;
        }
        Ok(())
    }

    /// Set the upper edge of bin `n` of dimension `d`
    pub fn set_bin_max(&mut self, dimension: usize, bin: usize, value: f64) -> Result<()> {
        self.check_dimension(dimension)?;
        self.max_tables()?;
        self.check_bin(dimension, bin)?;
        if let Some(maxs) = self.maxs.as_mut() {
            maxs[dimension][bin] = value;
        }
        Ok(())
    }

    /// Replace every edge of dimension `d` at once
    pub fn set_dimension_bounds(
        &mut self,
        dimension: usize,
        mins: Vec<f64>,
        maxs: Vec<f64>,
    ) -> Result<()> {
        self.check_dimension(dimension)?;
        let size = self.sizes[dimension];
        if mins.len() != size {
            return Err(Error::size_mismatch(size, mins.len(), "lower edges"));
        }
        if maxs.len() != size {
            return Err(Error::size_mismatch(size, maxs.len(), "upper edges"));
        }

        match (self.mins.as_mut(), self.maxs.as_mut()) {
            (Some(min_tables), Some(max_tables)) => {
                min_tables[dimension] = mins;
                max_tables[dimension] = maxs;
                Ok(())
            }
            (None, _) => Err(Error::unconfigured("bin minimums")),
            (_, None) => Err(Error::unconfigured("bin maximums")),
        }
    }

    /// Lower edges of every bin of dimension `d`
    pub fn dimension_mins(&self, dimension: usize) -> Result<&[f64]> {
        self.check_dimension(dimension)?;
        Ok(&self.min_tables()?[dimension])
    }

    /// Upper edges of every bin of dimension `d`
    pub fn dimension_maxs(&self, dimension: usize) -> Result<&[f64]> {
        self.check_dimension(dimension)?;
        Ok(&self.max_tables()?[dimension])
    }

    /// The whole lower-edge table
    pub fn mins(&self) -> Result<&[Vec<f64>; D]> {
        self.min_tables()
    }

    /// The whole upper-edge table
    pub fn maxs(&self) -> Result<&[Vec<f64>; D]> {
        self.max_tables()
    }

    /// Bin `n` of dimension `d` as an interval
    pub fn interval(&self, dimension: usize, bin: usize) -> Result<BinInterval> {
        Ok(BinInterval::new(
            self.bin_min(dimension, bin)?,
            self.bin_max(dimension, bin)?,
        ))
    }

    /// Find the bin of dimension `d` that contains `value`
    ///
    /// Binary search; edges must be ordered as [`BinGrid::validate`] checks.
    pub fn bin_of_value(&self, dimension: usize, value: f64) -> Result<usize> {
        self.check_dimension(dimension)?;
        let mins = self.min_tables()?;
        let maxs = self.max_tables()?;
        locate(&mins[dimension], &maxs[dimension], value)
            .ok_or(Error::OutOfRangeValue { dimension, value })
    }

    /// Discrete index of the bin containing `point`
    ///
    /// Each coordinate is looked up independently; the first coordinate
    /// without a bin fails the whole lookup with `OutOfRangeValue`.
    pub fn index<P: BinValue>(&self, point: &[P; D]) -> Result<BinIndex<D>> {
        let mins = self.min_tables()?;
        let maxs = self.max_tables()?;

        let mut index = [0usize; D];
        for (dimension, slot) in index.iter_mut().enumerate() {
            let value = point[dimension].to_f64();
            *slot = locate(&mins[dimension], &maxs[dimension], value)
                .ok_or(Error::OutOfRangeValue { dimension, value })?;
        }
        Ok(index)
    }

    /// Lower edge of the bin of dimension `d` that contains `value`
    pub fn bin_min_from_value(&self, dimension: usize, value: f64) -> Result<f64> {
        let bin = self.bin_of_value(dimension, value)?;
        self.bin_min(dimension, bin)
    }

    /// Upper edge of the bin of dimension `d` that contains `value`
    pub fn bin_max_from_value(&self, dimension: usize, value: f64) -> Result<f64> {
        let bin = self.bin_of_value(dimension, value)?;
        self.bin_max(dimension, bin)
    }

    /// Lower corner of the bin containing `point`
    pub fn histogram_min_from_value<P: BinValue>(&self, point: &[P; D]) -> Result<[f64; D]> {
        let index = self.index(point)?;
        self.histogram_min(&index)
    }

    /// Upper corner of the bin containing `point`
    pub fn histogram_max_from_value<P: BinValue>(&self, point: &[P; D]) -> Result<[f64; D]> {
        let index = self.index(point)?;
        self.histogram_max(&index)
    }

    /// Lower corner of the bin at `index`
    pub fn histogram_min(&self, index: &BinIndex<D>) -> Result<[f64; D]> {
        let mins = self.min_tables()?;
        self.check_index(index)?;
        Ok(std::array::from_fn(|d| mins[d][index[d]]))
    }

    /// Upper corner of the bin at `index`
    pub fn histogram_max(&self, index: &BinIndex<D>) -> Result<[f64; D]> {
        let maxs = self.max_tables()?;
        self.check_index(index)?;
        Ok(std::array::from_fn(|d| maxs[d][index[d]]))
    }

    /// Fail with `OutOfRangeIndex` unless every coordinate names a bin
    pub fn check_index(&self, index: &BinIndex<D>) -> Result<()> {
        for (dimension, (&bin, &size)) in index.iter().zip(self.sizes.iter()).enumerate() {
            if bin >= size {
                return Err(Error::OutOfRangeIndex {
                    dimension,
                    index: bin,
                    size,
                });
            }
        }
        Ok(())
    }

    /// Row-major position of `index`; the last dimension varies fastest
    pub fn linear_offset(&self, index: &BinIndex<D>) -> Result<usize> {
        self.check_index(index)?;
        Ok(index
            .iter()
            .zip(self.sizes.iter())
            .fold(0, |acc, (&bin, &size)| acc * size + bin))
    }

    /// Inverse of [`BinGrid::linear_offset`]
    pub fn index_from_offset(&self, offset: usize) -> Option<BinIndex<D>> {
        if offset >= self.total_bins()? {
            return None;
        }

        let mut index = [0usize; D];
        let mut rest = offset;
        for d in (0..D).rev() {
            index[d] = rest % self.sizes[d];
            rest /= self.sizes[d];
        }
        Some(index)
    }

    /// Check that edges are finite, and sorted without overlap per dimension
    ///
    /// Every bin must be wider than zero: a half-open `[a, a)` bin can never
    /// hold a value.
    pub fn validate(&self) -> Result<()> {
        let mins = self.min_tables()?;
        let maxs = self.max_tables()?;

        for d in 0..D {
            let (lower, upper) = (&mins[d], &maxs[d]);
            for n in 0..self.sizes[d] {
                if !lower[n].is_finite() || !upper[n].is_finite() {
                    return Err(Error::non_finite("bin edges"));
                }
                if lower[n] >= upper[n] {
                    return Err(Error::InvalidInput(format!(
                        "bin {n} of dimension {d} has lower edge {} not below upper edge {}",
                        lower[n], upper[n]
                    )));
                }
                if n + 1 < self.sizes[d] && upper[n] > lower[n + 1] {
                    return Err(Error::InvalidInput(format!(
                        "bin {n} of dimension {d} overlaps the next bin ({} > {})",
                        upper[n],
                        lower[n + 1]
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_dimension(&self, dimension: usize) -> Result<()> {
        if dimension >= D {
            return Err(Error::InvalidDimension {
                dimension,
                dimensions: D,
            });
        }
        Ok(())
    }

    fn check_bin(&self, dimension: usize, bin: usize) -> Result<()> {
        let size = self.sizes[dimension];
        if bin >= size {
            return Err(Error::OutOfRangeIndex {
                dimension,
                index: bin,
                size,
            });
        }
        Ok(())
    }

    fn min_tables(&self) -> Result<&[Vec<f64>; D]> {
        self.mins.as_ref().ok_or(Error::unconfigured("bin minimums"))
    }

    fn max_tables(&self) -> Result<&[Vec<f64>; D]> {
        self.maxs.as_ref().ok_or(Error::unconfigured("bin maximums"))
    }

    fn zeroed_tables(&self) -> [Vec<f64>; D] {
        std::array::from_fn(|d| vec![0.0; self.sizes[d]])
    }
}

/// Binary search for the half-open bin holding `value`
///
/// NaN compares false against every edge and therefore never finds a bin.
fn locate(mins: &[f64], maxs: &[f64], value: f64) -> Option<usize> {
    let bin = mins.partition_point(|&lower| lower <= value).checked_sub(1)?;
    (value < maxs[bin]).then_some(bin)
}
