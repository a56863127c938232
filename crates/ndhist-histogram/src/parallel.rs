//! Sharded filling across the rayon thread pool
//!
//! A histogram is not safe to mutate from several threads, so each chunk of
//! samples is counted into its own empty copy of the template. The shards
//! are merged back in chunk order once every chunk is done.

use crate::builders::{fill, FillSummary};
use crate::config::OutOfRangePolicy;
use crate::ops::HistogramOps;
use crate::traits::Histogram;
use ndhist_core::{BinValue, Error, Result};
use rayon::prelude::*;

/// Count `samples` into a copy of `template` using the rayon pool
///
/// The result holds the template's existing frequencies plus the new
/// counts. Errors follow [`fill`]: with [`OutOfRangePolicy::Error`] any
/// out-of-range sample fails the whole call and nothing is merged.
pub fn fill_parallel<H, B, P, const D: usize>(
    template: &H,
    samples: &[[P; D]],
    policy: OutOfRangePolicy,
    chunk_size: usize,
) -> Result<(H, FillSummary)>
where
    H: Histogram<B, D> + Clone + Send + Sync,
    B: BinValue,
    P: BinValue,
{
    if chunk_size == 0 {
        return Err(Error::InvalidParameter(
            "chunk size must be positive".to_string(),
        ));
    }

    let mut empty = template.clone();
    empty.allocate_frequencies()?;

    let shards = samples
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut shard = empty.clone();
            let summary = fill(&mut shard, chunk, policy)?;
            Ok((shard, summary))
        })
        .collect::<Result<Vec<(H, FillSummary)>>>()?;

    log::debug!(
        "merging {} shards of up to {chunk_size} samples",
        shards.len()
    );

    let mut merged = template.clone();
    let mut total = FillSummary::default();
    for (shard, summary) in &shards {
        merged.merge(shard)?;
        total = total.merge(*summary);
    }
    Ok((merged, total))
}
