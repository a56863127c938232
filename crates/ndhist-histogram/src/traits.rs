//! Frequency access contract shared by every histogram storage

use crate::grid::BinGrid;
use crate::types::BinIndex;
use ndhist_core::{BinValue, Error, Result};

/// A bin grid plus storage for one frequency per bin
///
/// Implementors own a [`BinGrid`] and decide how frequencies are laid out.
/// Storage goes through its own allocation step,
/// [`Histogram::allocate_frequencies`], once the grid's bin counts are
/// final. Reading or writing frequencies before that step, or after the
/// grid's bin counts change, fails with `UnconfiguredAccess`.
///
/// Point-based access resolves the point through [`BinGrid::index`] and then
/// defers to the index-based method, so both share the grid's half-open
/// interval policy.
pub trait Histogram<B: BinValue, const D: usize> {
    /// The coordinate system of this histogram
    fn grid(&self) -> &BinGrid<D>;

    /// Mutable access to the coordinate system
    fn grid_mut(&mut self) -> &mut BinGrid<D>;

    /// (Re)create zeroed frequency storage for the grid's current bin counts
    fn allocate_frequencies(&mut self) -> Result<()>;

    /// Get the frequency of the bin at `index`
    fn frequency(&self, index: &BinIndex<D>) -> Result<B>;

    /// Overwrite the frequency of the bin at `index`
    fn set_frequency(&mut self, index: &BinIndex<D>, value: B) -> Result<()>;

    /// Every bin with a non-zero frequency, in row-major order
    fn populated(&self) -> Result<Vec<(BinIndex<D>, B)>>;

    /// Get the frequency of the bin containing `point`
    fn frequency_at<P: BinValue>(&self, point: &[P; D]) -> Result<B> {
        let index = self.grid().index(point)?;
        self.frequency(&index)
    }

    /// Overwrite the frequency of the bin containing `point`
    fn set_frequency_at<P: BinValue>(&mut self, point: &[P; D], value: B) -> Result<()> {
        let index = self.grid().index(point)?;
        self.set_frequency(&index, value)
    }

    /// Add `delta` to the frequency of the bin at `index`
    ///
    /// Integer frequencies that would overflow fail with `InvalidInput` and
    /// leave the bin unchanged.
    fn add_frequency(&mut self, index: &BinIndex<D>, delta: B) -> Result<()> {
        let current = self.frequency(index)?;
        let sum = current
            .try_add(delta)
            .ok_or_else(|| Error::frequency_overflow(&format!("bin {index:?}")))?;
        self.set_frequency(index, sum)
    }

    /// Count one sample, returning the bin it landed in
    fn increment_at<P: BinValue>(&mut self, point: &[P; D]) -> Result<BinIndex<D>> {
        let index = self.grid().index(point)?;
        self.add_frequency(&index, B::one())?;
        Ok(index)
    }

    /// True when no bin holds a non-zero frequency
    fn is_empty(&self) -> Result<bool> {
        Ok(self.populated()?.iter().all(|(_, value)| value.is_zero()))
    }
}
