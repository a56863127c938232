//! Map-backed histogram storage
//!
//! Only bins with a non-zero frequency are stored, so memory follows the
//! number of populated bins rather than the size of the grid. Lookups are
//! O(log n) in the number of populated bins. Writing zero to a bin removes
//! its entry.

use crate::grid::BinGrid;
use crate::traits::Histogram;
use crate::types::BinIndex;
use ndhist_core::{BinValue, Error, Result};
use std::collections::BTreeMap;

/// Histogram storing only populated bins, keyed by index
#[derive(Debug, Clone, PartialEq)]
pub struct SparseHistogram<B: BinValue, const D: usize> {
    grid: BinGrid<D>,
    /// Keys order lexicographically, which is row-major
    frequencies: BTreeMap<BinIndex<D>, B>,
    /// Bin counts the storage was allocated for
    shape: Option<[usize; D]>,
}

impl<B: BinValue, const D: usize> SparseHistogram<B, D> {
    /// Wrap a grid without allocating frequency storage
    pub fn new(grid: BinGrid<D>) -> Self {
        Self {
            grid,
            frequencies: BTreeMap::new(),
            shape: None,
        }
    }

    /// Wrap a grid and allocate empty frequency storage
    pub fn with_grid(grid: BinGrid<D>) -> Result<Self> {
        let mut histogram = Self::new(grid);
        histogram.allocate_frequencies()?;
        Ok(histogram)
    }

    /// Number of stored (non-zero) bins
    pub fn nnz(&self) -> usize {
        self.frequencies.len()
    }

    /// Fraction of the grid's bins that are empty
    ///
    /// A grid whose bin count overflows `usize` is treated as fully empty.
    pub fn sparsity(&self) -> f64 {
        match self.grid.total_bins() {
            None => 1.0,
            Some(0) => 0.0,
            Some(total) => 1.0 - (self.nnz() as f64 / total as f64),
        }
    }

    fn check_storage(&self) -> Result<()> {
        match self.shape {
            Some(shape) if shape == *self.grid.sizes() => Ok(()),
            _ => Err(Error::unconfigured("frequency storage")),
        }
    }
}

impl<B: BinValue, const D: usize> Histogram<B, D> for SparseHistogram<B, D> {
    fn grid(&self) -> &BinGrid<D> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut BinGrid<D> {
        &mut self.grid
    }

    fn allocate_frequencies(&mut self) -> Result<()> {
        log::debug!("resetting sparse storage for bin counts {:?}", self.grid.sizes());
        self.frequencies.clear();
        self.shape = Some(*self.grid.sizes());
        Ok(())
    }

    fn frequency(&self, index: &BinIndex<D>) -> Result<B> {
        self.check_storage()?;
        self.grid.check_index(index)?;
        Ok(self.frequencies.get(index).copied().unwrap_or_else(B::zero))
    }

    fn set_frequency(&mut self, index: &BinIndex<D>, value: B) -> Result<()> {
        self.check_storage()?;
        self.grid.check_index(index)?;
        if value.is_zero() {
            self.frequencies.remove(index);
        } else {
            self.frequencies.insert(*index, value);
        }
        Ok(())
    }

    fn populated(&self) -> Result<Vec<(BinIndex<D>, B)>> {
        self.check_storage()?;
        Ok(self
            .frequencies
            .iter()
            .map(|(index, &value)| (*index, value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_10x10() -> BinGrid<2> {
        let edges: Vec<f64> = (0..10).map(f64::from).collect();
        let uppers: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut grid = BinGrid::with_sizes([10, 10]);
        grid.set_dimension_bounds(0, edges.clone(), uppers.clone()).unwrap();
        grid.set_dimension_bounds(1, edges, uppers).unwrap();
        grid
    }

    #[test]
    fn test_frequency_requires_allocation() {
        let hist = SparseHistogram::<u64, 2>::new(grid_10x10());
        assert!(matches!(hist.frequency(&[0, 0]), Err(Error::UnconfiguredAccess { .. })));
        assert!(hist.populated().is_err());
    }

    #[test]
    fn test_only_populated_bins_stored() {
        let mut hist = SparseHistogram::<u64, 2>::with_grid(grid_10x10()).unwrap();
        assert_eq!(hist.nnz(), 0);
        assert_eq!(hist.sparsity(), 1.0);

        hist.increment_at(&[3.5, 7.2]).unwrap();
        hist.increment_at(&[3.0, 7.9]).unwrap();
        hist.increment_at(&[9.9, 0.0]).unwrap();

        assert_eq!(hist.nnz(), 2);
        assert_eq!(hist.frequency(&[3, 7]).unwrap(), 2);
        assert_eq!(hist.frequency(&[9, 0]).unwrap(), 1);
        assert_eq!(hist.frequency(&[5, 5]).unwrap(), 0);
        assert!((hist.sparsity() - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_zero_removes_entry() {
        let mut hist = SparseHistogram::<i64, 2>::with_grid(grid_10x10()).unwrap();
        hist.set_frequency(&[1, 1], 4).unwrap();
        hist.set_frequency(&[1, 1], 0).unwrap();
        assert_eq!(hist.nnz(), 0);
        assert!(hist.is_empty().unwrap());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut hist = SparseHistogram::<u64, 2>::with_grid(grid_10x10()).unwrap();
        assert!(matches!(
            hist.frequency(&[10, 0]),
            Err(Error::OutOfRangeIndex { dimension: 0, index: 10, size: 10 })
        ));
        assert!(hist.set_frequency(&[0, 11], 1).is_err());
        assert!(matches!(
            hist.frequency_at(&[-1.0, 2.0]),
            Err(Error::OutOfRangeValue { dimension: 0, .. })
        ));
    }

    #[test]
    fn test_populated_in_row_major_order() {
        let mut hist = SparseHistogram::<u64, 2>::with_grid(grid_10x10()).unwrap();
        hist.set_frequency(&[4, 0], 1).unwrap();
        hist.set_frequency(&[0, 9], 2).unwrap();
        hist.set_frequency(&[0, 3], 3).unwrap();
        assert_eq!(
            hist.populated().unwrap(),
            vec![([0, 3], 3), ([0, 9], 2), ([4, 0], 1)]
        );
    }

    #[test]
    fn test_sparsity_of_huge_grid() {
        let mut grid = BinGrid::<3>::new();
        for d in 0..3 {
            grid.set_dimension_size(d, 1 << 30).unwrap();
        }
        assert_eq!(grid.total_bins(), None);

        let mut hist = SparseHistogram::<u64, 3>::new(grid);
        hist.allocate_frequencies().unwrap();
        assert_eq!(hist.sparsity(), 1.0);
        assert_eq!(SparseHistogram::<u64, 1>::with_grid(BinGrid::new()).unwrap().sparsity(), 0.0);
    }

    #[test]
    fn test_add_overflow_is_an_error() {
        let mut hist = SparseHistogram::<u32, 2>::with_grid(grid_10x10()).unwrap();
        hist.set_frequency(&[2, 3], u32::MAX).unwrap();
        let err = hist.add_frequency(&[2, 3], 1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(hist.frequency(&[2, 3]).unwrap(), u32::MAX);
        assert!(hist.increment_at(&[2.5, 3.5]).is_err());
    }

    #[test]
    fn test_reallocation_clears() {
        let mut hist = SparseHistogram::<u64, 2>::with_grid(grid_10x10()).unwrap();
        hist.set_frequency(&[2, 2], 9).unwrap();
        hist.allocate_frequencies().unwrap();
        assert_eq!(hist.frequency(&[2, 2]).unwrap(), 0);
    }
}
