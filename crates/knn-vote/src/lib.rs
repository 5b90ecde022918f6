#![doc = include_str!("../README.md")]

pub mod classify;
mod core;

pub use classify::{
    classify, classify_linear, merge, par_classify, par_classify_streaming, Classification, LabeledCandidate,
    Merger, PartitionWorker, ScanStats,
};
pub use crate::core::{
    error, metric, normalizer, params, schema, sized_heap, FeatureKind, FeatureSchema, FeatureVector, KnnError,
    Metric, MixedSquared, ParameterSet, SizedHeap,
};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
