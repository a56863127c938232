//! Histogram construction from configuration and sample streams

use crate::config::{HistogramConfig, OutOfRangePolicy, StorageKind};
use crate::dense::DenseHistogram;
use crate::grid::BinGrid;
use crate::sparse::SparseHistogram;
use crate::traits::Histogram;
use crate::types::BinIndex;
use ndhist_core::{BinValue, Error, Result};

/// Either storage strategy behind one type
#[derive(Debug, Clone, PartialEq)]
pub enum AnyHistogram<B: BinValue, const D: usize> {
    Dense(DenseHistogram<B, D>),
    Sparse(SparseHistogram<B, D>),
}

impl<B: BinValue, const D: usize> AnyHistogram<B, D> {
    /// Wrap `grid` in allocated storage of the given kind
    pub fn with_storage(grid: BinGrid<D>, storage: StorageKind) -> Result<Self> {
        let total = grid.total_bins().ok_or_else(|| {
            Error::InvalidParameter(format!("bin counts {:?} overflow", grid.sizes()))
        })?;
        let resolved = storage.resolve(total);
        log::debug!("selected {resolved:?} storage for {total} bins (requested {storage:?})");

        match resolved {
            StorageKind::Sparse => Ok(Self::Sparse(SparseHistogram::with_grid(grid)?)),
            StorageKind::Dense | StorageKind::Auto { .. } => {
                Ok(Self::Dense(DenseHistogram::with_grid(grid)?))
            }
        }
    }

    /// Storage strategy in use
    pub fn storage(&self) -> StorageKind {
        match self {
            Self::Dense(_) => StorageKind::Dense,
            Self::Sparse(_) => StorageKind::Sparse,
        }
    }
}

impl<B: BinValue, const D: usize> Histogram<B, D> for AnyHistogram<B, D> {
    fn grid(&self) -> &BinGrid<D> {
        match self {
            Self::Dense(h) => h.grid(),
            Self::Sparse(h) => h.grid(),
        }
    }

    fn grid_mut(&mut self) -> &mut BinGrid<D> {
        match self {
            Self::Dense(h) => h.grid_mut(),
            Self::Sparse(h) => h.grid_mut(),
        }
    }

    fn allocate_frequencies(&mut self) -> Result<()> {
        match self {
            Self::Dense(h) => h.allocate_frequencies(),
            Self::Sparse(h) => h.allocate_frequencies(),
        }
    }

    fn frequency(&self, index: &BinIndex<D>) -> Result<B> {
        match self {
            Self::Dense(h) => h.frequency(index),
            Self::Sparse(h) => h.frequency(index),
        }
    }

    fn set_frequency(&mut self, index: &BinIndex<D>, value: B) -> Result<()> {
        match self {
            Self::Dense(h) => h.set_frequency(index, value),
            Self::Sparse(h) => h.set_frequency(index, value),
        }
    }

    fn add_frequency(&mut self, index: &BinIndex<D>, delta: B) -> Result<()> {
        match self {
            Self::Dense(h) => h.add_frequency(index, delta),
            Self::Sparse(h) => h.add_frequency(index, delta),
        }
    }

    fn populated(&self) -> Result<Vec<(BinIndex<D>, B)>> {
        match self {
            Self::Dense(h) => h.populated(),
            Self::Sparse(h) => h.populated(),
        }
    }
}

/// Outcome of binning a batch of samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillSummary {
    /// Samples counted into a bin
    pub binned: usize,
    /// Samples dropped because they had no bin
    pub skipped: usize,
}

impl FillSummary {
    /// Combine the summaries of two batches
    pub fn merge(self, other: FillSummary) -> FillSummary {
        FillSummary {
            binned: self.binned + other.binned,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Count every sample into `histogram`
///
/// Under [`OutOfRangePolicy::Error`] the first sample without a bin aborts
/// the pass; samples before it stay counted. Any other error aborts
/// regardless of policy.
pub fn fill<H, B, P, const D: usize>(
    histogram: &mut H,
    samples: &[[P; D]],
    policy: OutOfRangePolicy,
) -> Result<FillSummary>
where
    H: Histogram<B, D>,
    B: BinValue,
    P: BinValue,
{
    let mut summary = FillSummary::default();
    for sample in samples {
        match histogram.increment_at(sample) {
            Ok(_) => summary.binned += 1,
            Err(Error::OutOfRangeValue { dimension, value })
                if policy == OutOfRangePolicy::Skip =>
            {
                log::trace!("skipping sample {sample:?}: {value} has no bin in dimension {dimension}");
                summary.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if summary.skipped > 0 {
        log::debug!(
            "binned {} samples, skipped {} out of range",
            summary.binned,
            summary.skipped
        );
    }
    Ok(summary)
}

/// Builds histograms described by a [`HistogramConfig`]
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    config: HistogramConfig,
}

impl HistogramBuilder {
    /// Create a new builder
    pub fn new(config: HistogramConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    /// Validated grid for the configured axes
    pub fn grid<const D: usize>(&self) -> Result<BinGrid<D>> {
        BinGrid::from_layouts(&self.config.axes)
    }

    /// Allocated histogram with every frequency at zero
    pub fn build_empty<B: BinValue, const D: usize>(&self) -> Result<AnyHistogram<B, D>> {
        AnyHistogram::with_storage(self.grid()?, self.config.storage)
    }

    /// Histogram holding the counts of `samples`
    pub fn build<B, P, const D: usize>(&self, samples: &[[P; D]]) -> Result<AnyHistogram<B, D>>
    where
        B: BinValue,
        P: BinValue,
    {
        let mut histogram = self.build_empty()?;
        fill(&mut histogram, samples, self.config.out_of_range)?;
        Ok(histogram)
    }
}
