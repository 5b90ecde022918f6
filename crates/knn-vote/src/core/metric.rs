//! The `Metric` trait is used for all distance computations between a record
//! and the query.

use super::FeatureVector;

/// A dissimilarity between two normalized vectors.
///
/// Implementors must be non-negative and symmetric, and must return zero for
/// identical vectors. The trait is `Send + Sync` so one metric can be shared
/// by every partition worker.
///
/// # Example
///
/// ```rust
/// use knn_vote::{FeatureVector, Metric};
///
/// /// Counts how many nominal components differ.
/// struct Mismatches;
///
/// impl Metric for Mismatches {
///     fn distance(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
///         let n = a.nominal().iter().zip(b.nominal()).filter(|(x, y)| x != y).count();
///         n as f64
///     }
///
///     fn name(&self) -> &str {
///         "mismatches"
///     }
/// }
///
/// let a = FeatureVector::new(vec![], vec!["x".to_string(), "y".to_string()]);
/// let b = FeatureVector::new(vec![], vec!["x".to_string(), "z".to_string()]);
/// assert_eq!(Mismatches.distance(&a, &b), 1.0);
/// ```
pub trait Metric: Send + Sync {
    /// Call the metric on two vectors.
    fn distance(&self, a: &FeatureVector, b: &FeatureVector) -> f64;

    /// The name of the metric.
    fn name(&self) -> &str;
}

/// The sum of squared differences over numeric components plus one for each
/// unequal nominal component.
///
/// This is the squared Euclidean distance extended with an indicator for
/// categories. The square root is never taken: it would not change which
/// neighbors are nearest.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedSquared;

impl Metric for MixedSquared {
    fn distance(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        let numeric: f64 = distances::vectors::euclidean_sq(a.numeric(), b.numeric());
        let nominal = a.nominal().iter().zip(b.nominal()).filter(|(x, y)| x != y).count();
        #[allow(clippy::cast_precision_loss)]
        let nominal = nominal as f64;
        numeric + nominal
    }

    fn name(&self) -> &str {
        "mixed-squared"
    }
}
