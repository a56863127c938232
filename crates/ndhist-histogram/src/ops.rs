//! Operations on filled histograms

use crate::traits::Histogram;
use crate::types::BinIndex;
use ndhist_core::{BinValue, Error, Result};

/// Statistics and combination available on every [`Histogram`]
pub trait HistogramOps<B: BinValue, const D: usize>: Histogram<B, D> {
    /// Sum of all frequencies
    fn total_frequency(&self) -> Result<f64>;

    /// Bin with the largest frequency; ties go to the first in row-major order
    fn mode(&self) -> Result<Option<(BinIndex<D>, B)>>;

    /// Frequencies summed over every dimension except `d`
    fn marginal(&self, dimension: usize) -> Result<Vec<f64>>;

    /// Frequency-weighted mean of the bin centers
    fn mean(&self) -> Result<[f64; D]>;

    /// Shannon entropy (nats) of the normalized frequencies
    fn entropy(&self) -> Result<f64>;

    /// Add every frequency of `other` into this histogram
    ///
    /// Both histograms must share an identical grid.
    fn merge<O: Histogram<B, D>>(&mut self, other: &O) -> Result<()>;
}

impl<B, H, const D: usize> HistogramOps<B, D> for H
where
    B: BinValue,
    H: Histogram<B, D>,
{
    fn total_frequency(&self) -> Result<f64> {
        Ok(self.populated()?.iter().map(|(_, value)| value.to_f64()).sum())
    }

    fn mode(&self) -> Result<Option<(BinIndex<D>, B)>> {
        let mut best: Option<(BinIndex<D>, B)> = None;
        for (index, value) in self.populated()? {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((index, value)),
            }
        }
        Ok(best)
    }

    fn marginal(&self, dimension: usize) -> Result<Vec<f64>> {
        let size = self.grid().dimension_size(dimension)?;
        let mut totals = vec![0.0; size];
        for (index, value) in self.populated()? {
            totals[index[dimension]] += value.to_f64();
        }
        Ok(totals)
    }

    fn mean(&self) -> Result<[f64; D]> {
        let populated = self.populated()?;
        let total: f64 = populated.iter().map(|(_, value)| value.to_f64()).sum();
        if total == 0.0 {
            return Err(Error::empty_input("histogram mean"));
        }

        let lower = self.grid().mins()?;
        let upper = self.grid().maxs()?;
        let mut mean = [0.0; D];
        for (index, value) in &populated {
            let weight = value.to_f64() / total;
            for (d, slot) in mean.iter_mut().enumerate() {
                let center = (lower[d][index[d]] + upper[d][index[d]]) / 2.0;
                *slot += weight * center;
            }
        }
        Ok(mean)
    }

    fn entropy(&self) -> Result<f64> {
        let populated = self.populated()?;
        let total: f64 = populated.iter().map(|(_, value)| value.to_f64()).sum();
        if total <= 0.0 {
            return Ok(0.0);
        }

        Ok(populated
            .iter()
            .map(|(_, value)| value.to_f64() / total)
            .filter(|&p| p > 0.0)
            .map(|p| -p * p.ln())
            .sum())
    }

    fn merge<O: Histogram<B, D>>(&mut self, other: &O) -> Result<()> {
        if self.grid() != other.grid() {
            return Err(Error::InvalidInput(
                "cannot merge histograms with different bin grids".to_string(),
            ));
        }
        for (index, value) in other.populated()? {
            self.add_frequency(&index, value)?;
        }
        Ok(())
    }
}
