//! The core types for k-NN classification: the feature schema, normalization,
//! the distance function and the sized heap.

pub mod error;
pub mod metric;
pub mod normalizer;
pub mod params;
pub mod schema;
pub mod sized_heap;

pub use error::KnnError;
pub use metric::{Metric, MixedSquared};
pub use normalizer::FeatureVector;
pub use params::ParameterSet;
pub use schema::{FeatureKind, FeatureSchema};
pub use sized_heap::SizedHeap;
