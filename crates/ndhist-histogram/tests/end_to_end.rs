//! Full configure → allocate → populate → query scenarios

mod common;

use common::{normal_samples, two_by_two_grid};
use ndhist_histogram::{
    dense_histogram, fill, sparse_histogram, AnyHistogram, AxisLayout, DenseHistogram, Error,
    Histogram, HistogramBuilder, HistogramConfig, HistogramOps, OutOfRangePolicy,
    SparseHistogram, StorageKind,
};

fn check_two_by_two_counts<H: Histogram<u64, 2>>(mut hist: H) {
    for sample in [[2.0, 0.5], [7.0, 1.5], [2.0, 1.9]] {
        hist.increment_at(&sample).unwrap();
    }

    assert_eq!(hist.frequency(&[0, 0]).unwrap(), 1);
    assert_eq!(hist.frequency(&[0, 1]).unwrap(), 1);
    assert_eq!(hist.frequency(&[1, 1]).unwrap(), 1);
    assert_eq!(hist.frequency(&[1, 0]).unwrap(), 0);

    assert_eq!(hist.frequency_at(&[7.0, 1.5]).unwrap(), 1);
    assert_eq!(hist.grid().bin_min_from_value(0, 7.0).unwrap(), 5.0);
}

#[test]
fn test_two_by_two_scenario_dense() {
    check_two_by_two_counts(DenseHistogram::with_grid(two_by_two_grid()).unwrap());
}

#[test]
fn test_two_by_two_scenario_sparse() {
    check_two_by_two_counts(SparseHistogram::with_grid(two_by_two_grid()).unwrap());
}

#[test]
fn test_lifecycle_order_is_enforced_loudly() {
    let mut hist = DenseHistogram::<u64, 2>::new(Default::default());

    // Unconfigured: no edge tables and no frequency storage
    assert!(matches!(hist.grid().mins(), Err(Error::UnconfiguredAccess { .. })));
    assert!(matches!(hist.frequency(&[0, 0]), Err(Error::UnconfiguredAccess { .. })));

    // Sized but not allocated
    hist.grid_mut().set_dimension_size(0, 2).unwrap();
    hist.grid_mut().set_dimension_size(1, 2).unwrap();
    assert!(matches!(hist.grid().dimension_mins(0), Err(Error::UnconfiguredAccess { .. })));

    // Allocated and populated
    *hist.grid_mut() = two_by_two_grid();
    hist.allocate_frequencies().unwrap();
    hist.set_frequency_at(&[9.0, 0.0], 4).unwrap();
    assert_eq!(hist.frequency(&[1, 0]).unwrap(), 4);

    // Resizing invalidates both the grid and the storage
    hist.grid_mut().set_dimension_size(0, 3).unwrap();
    assert!(matches!(hist.grid().index(&[1.0, 1.0]), Err(Error::UnconfiguredAccess { .. })));
    assert!(matches!(hist.frequency(&[1, 0]), Err(Error::UnconfiguredAccess { .. })));
}

#[test]
fn test_uneven_bins_from_config() {
    let config = HistogramConfig::from_json(
        r#"{
            "axes": [
                { "kind": "edges", "edges": [0.0, 1.0, 10.0, 100.0] },
                { "kind": "explicit", "mins": [-1.0, 0.5], "maxs": [0.0, 0.75] }
            ],
            "out_of_range": "skip"
        }"#,
    )
    .unwrap();

    let samples = [[0.5, -0.5], [50.0, 0.6], [50.0, 0.25], [99.9, 0.7], [100.0, 0.6]];
    let hist: AnyHistogram<u32, 2> = HistogramBuilder::new(config).build(&samples).unwrap();

    assert_eq!(hist.frequency(&[0, 0]).unwrap(), 1);
    assert_eq!(hist.frequency(&[2, 1]).unwrap(), 2);
    assert_eq!(hist.total_frequency().unwrap(), 3.0);

    let grid = hist.grid();
    assert_eq!(grid.histogram_min(&[2, 1]).unwrap(), [10.0, 0.5]);
    assert_eq!(grid.histogram_max(&[2, 1]).unwrap(), [100.0, 0.75]);
    assert_eq!(grid.histogram_max_from_value(&[5.0, -0.2]).unwrap(), [10.0, 0.0]);
    // The gap between [-1, 0) and [0.5, 0.75) has no bin
    assert!(matches!(
        grid.index(&[5.0, 0.25]),
        Err(Error::OutOfRangeValue { dimension: 1, .. })
    ));
}

#[test]
fn test_dense_and_sparse_agree() {
    let layouts = vec![AxisLayout::Uniform { bins: 8, min: -4.0, max: 4.0 }; 3];
    let samples: Vec<[f64; 3]> = normal_samples(5_000, 0.0, 1.0, 7)
        .into_iter()
        .filter(|s| s.iter().all(|v| (-4.0..4.0).contains(v)))
        .collect();

    let dense: DenseHistogram<u64, 3> = dense_histogram(&layouts, &samples).unwrap();
    let sparse: SparseHistogram<u64, 3> = sparse_histogram(&layouts, &samples).unwrap();

    assert_eq!(dense.populated().unwrap(), sparse.populated().unwrap());
    assert_eq!(dense.total_frequency().unwrap(), samples.len() as f64);
    assert_eq!(dense.marginal(1).unwrap(), sparse.marginal(1).unwrap());

    // Standard normal data centres on the middle bins
    let mean = dense.mean().unwrap();
    for component in mean {
        assert!(component.abs() < 0.1, "mean component {component} too far from 0");
    }
    let (mode, _) = dense.mode().unwrap().unwrap();
    for bin in mode {
        assert!(bin == 3 || bin == 4, "mode bin {bin} not central");
    }
}

#[test]
fn test_sharded_fill_then_merge() {
    let config = HistogramConfig::new(vec![
        AxisLayout::Uniform { bins: 4, min: 0.0, max: 1.0 },
        AxisLayout::Uniform { bins: 4, min: 0.0, max: 1.0 },
    ])
    .with_storage(StorageKind::Sparse);
    let builder = HistogramBuilder::new(config);

    let samples: Vec<[f64; 2]> = (0..100)
        .map(|i| [(i % 10) as f64 / 10.0, (i / 10) as f64 / 10.0])
        .collect();

    let mut whole: AnyHistogram<u64, 2> = builder.build_empty().unwrap();
    fill(&mut whole, &samples, OutOfRangePolicy::Error).unwrap();

    let mut merged: AnyHistogram<u64, 2> = builder.build_empty().unwrap();
    for shard_samples in samples.chunks(30) {
        let mut shard: AnyHistogram<u64, 2> = builder.build_empty().unwrap();
        fill(&mut shard, shard_samples, OutOfRangePolicy::Error).unwrap();
        merged.merge(&shard).unwrap();
    }

    assert_eq!(merged.populated().unwrap(), whole.populated().unwrap());
    assert_eq!(merged.total_frequency().unwrap(), 100.0);
}

#[test]
fn test_out_of_range_aborts_without_clamping() {
    let layouts = [AxisLayout::Uniform { bins: 2, min: 0.0, max: 1.0 }];
    let result: Result<DenseHistogram<u64, 1>, _> = dense_histogram(&layouts, &[[0.2], [1.0]]);
    let err = result.unwrap_err();
    assert!(err.is_out_of_range());
    assert!(matches!(err, Error::OutOfRangeValue { dimension: 0, value } if value == 1.0));
}
