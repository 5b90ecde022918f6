//! A training record reduced to its distance from the query and its label.

use core::cmp::Ordering;

/// A `(distance, label)` pair emitted by a partition.
///
/// Candidates are totally ordered by distance (`f64::total_cmp`) and then by
/// label, so the nearest neighbors of a query are well defined even when
/// distances tie.
#[derive(Debug, Clone)]
pub struct LabeledCandidate {
    /// The distance from the query.
    distance: f64,
    /// The label of the training record.
    label: String,
}

impl LabeledCandidate {
    /// Creates a new candidate.
    pub fn new<S: Into<String>>(distance: f64, label: S) -> Self {
        Self {
            distance,
            label: label.into(),
        }
    }

    /// The distance from the query.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// The label of the training record.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Consumes the candidate and returns its label.
    #[must_use]
    pub fn into_label(self) -> String {
        self.label
    }
}

impl PartialEq for LabeledCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for LabeledCandidate {}

impl PartialOrd for LabeledCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LabeledCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl core::fmt::Display for LabeledCandidate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.6}\t{}", self.distance, self.label)
    }
}
