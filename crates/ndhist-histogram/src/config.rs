//! Configuration types for histogram setup
//!
//! A [`HistogramConfig`] describes the bins of every dimension, which
//! storage strategy to use, and what to do with samples that fall outside
//! the bins. It is usually loaded once from JSON:
//!
//! ```rust
//! use ndhist_histogram::{HistogramConfig, OutOfRangePolicy, StorageKind};
//!
//! let config = HistogramConfig::from_json(r#"{
//!     "axes": [
//!         { "kind": "uniform", "bins": 256, "min": 0.0, "max": 256.0 },
//!         { "kind": "edges", "edges": [0.0, 0.5, 1.0] }
//!     ],
//!     "storage": { "auto": { "expected_occupancy": 64 } },
//!     "out_of_range": "skip"
//! }"#).unwrap();
//!
//! assert_eq!(config.axes.len(), 2);
//! assert_eq!(config.out_of_range, OutOfRangePolicy::Skip);
//! assert_eq!(config.storage.resolve(512), StorageKind::Sparse);
//! ```

use ndhist_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sparse storage costs several times a dense slot per populated bin
pub const SPARSE_CROSSOVER: usize = 4;

/// Largest bin count a uniform layout may request for one dimension
pub const MAX_UNIFORM_BINS: usize = 1 << 24;

/// Bin layout of a single dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisLayout {
    /// `bins` equal-width bins covering `[min, max)`, at most [`MAX_UNIFORM_BINS`]
    Uniform { bins: usize, min: f64, max: f64 },

    /// Contiguous bins between strictly increasing edges
    Edges { edges: Vec<f64> },

    /// Arbitrary lower and upper edges, one pair per bin
    Explicit { mins: Vec<f64>, maxs: Vec<f64> },
}

impl AxisLayout {
    /// Number of bins this layout produces
    pub fn bin_count(&self) -> usize {
        match self {
            Self::Uniform { bins, .. } => *bins,
            Self::Edges { edges } => edges.len().saturating_sub(1),
            Self::Explicit { mins, .. } => mins.len(),
        }
    }

    /// Lower and upper edge of every bin
    pub fn boundaries(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        match self {
            Self::Uniform { bins, min, max } => uniform_boundaries(*bins, *min, *max),
            Self::Edges { edges } => {
                if edges.len() < 2 {
                    return Err(Error::InsufficientData {
                        expected: 2,
                        actual: edges.len(),
                    });
                }
                if edges.iter().any(|edge| !edge.is_finite()) {
                    return Err(Error::non_finite("bin edges"));
                }
                if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(Error::InvalidInput(
                        "bin edges must be strictly increasing".to_string(),
                    ));
                }
                let mins = edges[..edges.len() - 1].to_vec();
                let maxs = edges[1..].to_vec();
                Ok((mins, maxs))
            }
            Self::Explicit { mins, maxs } => {
                if mins.len() != maxs.len() {
                    return Err(Error::size_mismatch(mins.len(), maxs.len(), "explicit bin edges"));
                }
                Ok((mins.clone(), maxs.clone()))
            }
        }
    }
}

/// Equal-width bins; the last upper edge is exactly `max`
fn uniform_boundaries(bins: usize, min: f64, max: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if bins == 0 {
        return Err(Error::InvalidParameter(
            "uniform layout needs at least one bin".to_string(),
        ));
    }
    if bins > MAX_UNIFORM_BINS {
        return Err(Error::InvalidParameter(format!(
            "uniform layout asks for {bins} bins, limit is {MAX_UNIFORM_BINS}"
        )));
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(Error::non_finite("uniform range"));
    }
    if min >= max {
        return Err(Error::InvalidParameter(format!(
            "uniform range [{min}, {max}) is empty"
        )));
    }

    let width = (max - min) / bins as f64;
    let mut mins = Vec::with_capacity(bins);
    let mut maxs = Vec::with_capacity(bins);
    for i in 0..bins {
        let left = min + i as f64 * width;
        let right = if i == bins - 1 {
            max
        } else {
            min + (i + 1) as f64 * width
        };
        if left >= right {
            return Err(Error::InvalidParameter(format!(
                "uniform range [{min}, {max}) is too narrow for {bins} distinct bins"
            )));
        }
        mins.push(left);
        maxs.push(right);
    }
    Ok((mins, maxs))
}

/// Frequency storage strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// One slot per bin
    #[default]
    Dense,

    /// Only populated bins are stored
    Sparse,

    /// Choose from the expected number of populated bins
    Auto { expected_occupancy: usize },
}

impl StorageKind {
    /// Concrete storage for a grid with `total_bins` bins
    ///
    /// `Auto` picks sparse storage when the expected populated bins, scaled
    /// by [`SPARSE_CROSSOVER`], stay below the total.
    pub fn resolve(self, total_bins: usize) -> StorageKind {
        match self {
            Self::Auto { expected_occupancy } => {
                if expected_occupancy.saturating_mul(SPARSE_CROSSOVER) < total_bins {
                    Self::Sparse
                } else {
                    Self::Dense
                }
            }
            concrete => concrete,
        }
    }
}

/// What to do with a sample that has no bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Abort the pass with the lookup error
    #[default]
    Error,

    /// Count the sample as skipped and continue
    Skip,
}

/// Full histogram setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// One layout per dimension
    pub axes: Vec<AxisLayout>,

    /// Frequency storage strategy
    #[serde(default)]
    pub storage: StorageKind,

    /// Handling of samples outside the bins
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

impl HistogramConfig {
    /// Config with dense storage that rejects out-of-range samples
    pub fn new(axes: Vec<AxisLayout>) -> Self {
        Self {
            axes,
            storage: StorageKind::default(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }

    /// Set the storage strategy
    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Set the out-of-range policy
    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading histogram config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of bins described, or `None` on overflow
    pub fn total_bins(&self) -> Option<usize> {
        self.axes
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(axis.bin_count()))
    }
}
