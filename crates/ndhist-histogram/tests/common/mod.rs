//! Shared utilities for integration tests

#![allow(dead_code)]

use ndhist_histogram::{AxisLayout, BinGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// dim 0: [0,5) [5,10); dim 1: [0,1) [1,2)
pub fn two_by_two_grid() -> BinGrid<2> {
    let mut grid = BinGrid::<2>::new();
    grid.set_dimension_size(0, 2).unwrap();
    grid.set_dimension_size(1, 2).unwrap();
    grid.allocate_mins();
    grid.allocate_maxs();

    grid.set_bin_min(0, 0, 0.0).unwrap();
    grid.set_bin_max(0, 0, 5.0).unwrap();
    grid.set_bin_min(0, 1, 5.0).unwrap();
    grid.set_bin_max(0, 1, 10.0).unwrap();

    grid.set_bin_min(1, 0, 0.0).unwrap();
    grid.set_bin_max(1, 0, 1.0).unwrap();
    grid.set_bin_min(1, 1, 1.0).unwrap();
    grid.set_bin_max(1, 1, 2.0).unwrap();
    grid
}

/// Uneven, contiguous edges built from increasing positive widths
pub fn edges_from_widths(start: f64, widths: &[f64]) -> AxisLayout {
    let mut edges = Vec::with_capacity(widths.len() + 1);
    edges.push(start);
    for width in widths {
        let last = edges[edges.len() - 1];
        edges.push(last + width);
    }
    AxisLayout::Edges { edges }
}

/// Normally distributed 3-channel samples, reproducible from `seed`
pub fn normal_samples(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n)
        .map(|_| [rng.sample(normal), rng.sample(normal), rng.sample(normal)])
        .collect()
}
