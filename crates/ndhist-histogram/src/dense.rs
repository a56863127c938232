//! Array-backed histogram storage
//!
//! One slot per bin in row-major order (last dimension fastest). Access is
//! O(1); memory is proportional to the product of the bin counts.

use crate::grid::BinGrid;
use crate::traits::Histogram;
use crate::types::BinIndex;
use ndhist_core::{BinValue, Error, Result};

/// Histogram storing every bin's frequency in a flat vector
#[derive(Debug, Clone, PartialEq)]
pub struct DenseHistogram<B: BinValue, const D: usize> {
    grid: BinGrid<D>,
    frequencies: Vec<B>,
    /// Bin counts the storage was allocated for
    shape: Option<[usize; D]>,
}

impl<B: BinValue, const D: usize> DenseHistogram<B, D> {
    /// Wrap a grid without allocating frequency storage
    pub fn new(grid: BinGrid<D>) -> Self {
        Self {
            grid,
            frequencies: Vec::new(),
            shape: None,
        }
    }

    /// Wrap a grid and allocate zeroed frequency storage
    pub fn with_grid(grid: BinGrid<D>) -> Result<Self> {
        let mut histogram = Self::new(grid);
        histogram.allocate_frequencies()?;
        Ok(histogram)
    }

    /// Raw frequencies in row-major order
    pub fn as_slice(&self) -> Result<&[B]> {
        self.check_storage()?;
        Ok(&self.frequencies)
    }

    fn check_storage(&self) -> Result<()> {
        match self.shape {
            Some(shape) if shape == *self.grid.sizes() => Ok(()),
            _ => Err(Error::unconfigured("frequency storage")),
        }
    }
}

impl<B: BinValue, const D: usize> Histogram<B, D> for DenseHistogram<B, D> {
    fn grid(&self) -> &BinGrid<D> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut BinGrid<D> {
        &mut self.grid
    }

    fn allocate_frequencies(&mut self) -> Result<()> {
        let total = self.grid.total_bins().ok_or_else(|| {
            Error::InvalidParameter(format!(
                "bin counts {:?} exceed addressable storage",
                self.grid.sizes()
            ))
        })?;
        log::debug!("allocating {total} dense bins for bin counts {:?}", self.grid.sizes());
        self.frequencies = vec![B::zero(); total];
        self.shape = Some(*self.grid.sizes());
        Ok(())
    }

    fn frequency(&self, index: &BinIndex<D>) -> Result<B> {
        self.check_storage()?;
        let offset = self.grid.linear_offset(index)?;
        Ok(self.frequencies[offset])
    }

    fn set_frequency(&mut self, index: &BinIndex<D>, value: B) -> Result<()> {
        self.check_storage()?;
        let offset = self.grid.linear_offset(index)?;
        self.frequencies[offset] = value;
        Ok(())
    }

    fn add_frequency(&mut self, index: &BinIndex<D>, delta: B) -> Result<()> {
        self.check_storage()?;
        let offset = self.grid.linear_offset(index)?;
        let slot = &mut self.frequencies[offset];
        *slot = slot
            .try_add(delta)
            .ok_or_else(|| Error::frequency_overflow(&format!("bin {index:?}")))?;
        Ok(())
    }

    fn populated(&self) -> Result<Vec<(BinIndex<D>, B)>> {
        self.check_storage()?;
        Ok(self
            .frequencies
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_zero())
            .filter_map(|(offset, &value)| {
                self.grid.index_from_offset(offset).map(|index| (index, value))
            })
            .collect())
    }
}
