//! Merging partition candidates and voting on a label.

use std::collections::HashMap;

use crate::{KnnError, SizedHeap};

use super::LabeledCandidate;

/// The outcome of a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The winning label.
    label: String,
    /// The neighbors that voted, nearest first.
    neighbors: Vec<LabeledCandidate>,
    /// Each distinct label with its vote count, winner first.
    votes: Vec<(String, usize)>,
}

impl Classification {
    /// Counts the votes of the given neighbors.
    ///
    /// The label with the most votes wins. Among labels with equally many
    /// votes, the one that appears first in `neighbors` wins; since neighbors
    /// are in ascending order of distance, that is the tied label holding the
    /// nearest neighbor.
    ///
    /// # Errors
    ///
    /// If `neighbors` is empty.
    pub fn from_neighbors(neighbors: Vec<LabeledCandidate>) -> Result<Self, KnnError> {
        let mut votes = Vec::<(String, usize)>::new();
        {
            let mut index = HashMap::<&str, usize>::new();
            for n in &neighbors {
                if let Some(&i) = index.get(n.label()) {
                    votes[i].1 += 1;
                } else {
                    index.insert(n.label(), votes.len());
                    votes.push((n.label().to_string(), 1));
                }
            }
        }

        // Stable, so ties stay in first-seen order.
        votes.sort_by(|(_, a), (_, b)| b.cmp(a));

        let label = votes.first().map(|(l, _)| l.clone()).ok_or(KnnError::EmptyInput)?;
        Ok(Self {
            label,
            neighbors,
            votes,
        })
    }

    /// The winning label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The neighbors that voted, nearest first.
    #[must_use]
    pub fn neighbors(&self) -> &[LabeledCandidate] {
        &self.neighbors
    }

    /// Each distinct label with its vote count, winner first.
    #[must_use]
    pub fn votes(&self) -> &[(String, usize)] {
        &self.votes
    }

    /// Consumes the classification and returns the winning label.
    #[must_use]
    pub fn into_label(self) -> String {
        self.label
    }
}

/// The fan-in side of a classification run.
///
/// A `Merger` keeps the `k_global` nearest candidates out of everything the
/// partitions send it. Partition outputs may be absorbed in any order, and
/// the retained neighbors do not depend on that order. A `Merger` is not
/// meant to be mutated from several threads at once; wrap it in a `Mutex` to
/// absorb outputs as partitions finish.
#[derive(Debug, Clone)]
pub struct Merger {
    /// The nearest candidates seen so far.
    hits: SizedHeap<LabeledCandidate>,
    /// The number of partition outputs absorbed.
    partitions: usize,
    /// The number of candidates offered.
    offered: usize,
}

impl Merger {
    /// Creates a new `Merger` keeping `k_global` neighbors.
    ///
    /// # Errors
    ///
    /// If `k_global` is zero.
    pub fn new(k_global: usize) -> Result<Self, KnnError> {
        Ok(Self {
            hits: SizedHeap::new(k_global)?,
            partitions: 0,
            offered: 0,
        })
    }

    /// Offers a single candidate.
    pub fn offer(&mut self, candidate: LabeledCandidate) {
        self.offered += 1;
        self.hits.offer(candidate);
    }

    /// Offers every candidate emitted by one partition.
    pub fn absorb<I: IntoIterator<Item = LabeledCandidate>>(&mut self, candidates: I) {
        self.partitions += 1;
        for c in candidates {
            self.offer(c);
        }
    }

    /// The number of partition outputs absorbed so far.
    #[must_use]
    pub const fn partitions(&self) -> usize {
        self.partitions
    }

    /// The number of candidates offered so far.
    #[must_use]
    pub const fn offered(&self) -> usize {
        self.offered
    }

    /// The current neighbors, nearest first.
    #[must_use]
    pub fn neighbors(&self) -> Vec<LabeledCandidate> {
        self.hits.snapshot()
    }

    /// Finishes the merge and votes on a label.
    ///
    /// # Errors
    ///
    /// If no candidates were offered.
    pub fn vote(self) -> Result<Classification, KnnError> {
        ftlog::debug!(
            "Voting with {} of {} candidates from {} partitions",
            self.hits.len(),
            self.offered,
            self.partitions
        );
        Classification::from_neighbors(self.hits.into_sorted_vec())
    }
}

/// Merges the candidates of every partition and returns the majority label
/// among the `k_global` nearest.
///
/// # Errors
///
/// - If `k_global` is zero.
/// - If no candidates were offered.
pub fn merge<P, I>(partition_outputs: P, k_global: usize) -> Result<String, KnnError>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = LabeledCandidate>,
{
    let mut merger = Merger::new(k_global)?;
    for output in partition_outputs {
        merger.absorb(output);
    }
    merger.vote().map(Classification::into_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(pairs: &[(f64, &str)]) -> Vec<LabeledCandidate> {
        pairs.iter().map(|&(d, l)| LabeledCandidate::new(d, l)).collect()
    }

    #[test]
    fn majority() -> Result<(), KnnError> {
        let label = merge(
            [
                candidates(&[(0.1, "A"), (0.4, "B")]),
                candidates(&[(0.2, "A"), (0.3, "B"), (0.9, "B")]),
            ],
            3,
        )?;
        assert_eq!(label, "A");
        Ok(())
    }

    #[test]
    fn empty() {
        assert_eq!(merge(Vec::<Vec<LabeledCandidate>>::new(), 3), Err(KnnError::EmptyInput));
        assert_eq!(merge([vec![], vec![]], 3), Err(KnnError::EmptyInput));
        assert!(matches!(
            merge([candidates(&[(0.1, "A")])], 0),
            Err(KnnError::Configuration { .. })
        ));
    }

    #[test]
    fn frequency_tie_goes_to_nearest() -> Result<(), KnnError> {
        for outputs in [
            [candidates(&[(0.2, "B")]), candidates(&[(0.1, "A")])],
            [candidates(&[(0.1, "A")]), candidates(&[(0.2, "B")])],
        ] {
            let mut merger = Merger::new(2)?;
            for o in outputs {
                merger.absorb(o);
            }
            let c = merger.vote()?;
            assert_eq!(c.label(), "A");
            assert_eq!(c.votes(), [("A".to_string(), 1), ("B".to_string(), 1)]);
        }

        // Equal distances fall back to label order.
        let label = merge([candidates(&[(0.5, "Y")]), candidates(&[(0.5, "X")])], 2)?;
        assert_eq!(label, "X");
        Ok(())
    }

    #[test]
    fn counts() -> Result<(), KnnError> {
        let mut merger = Merger::new(2)?;
        merger.absorb(candidates(&[(0.3, "A"), (0.1, "B")]));
        merger.absorb(vec![]);
        merger.absorb(candidates(&[(0.2, "B")]));
        assert_eq!(merger.partitions(), 3);
        assert_eq!(merger.offered(), 3);
        assert_eq!(merger.neighbors(), candidates(&[(0.1, "B"), (0.2, "B")]));

        let c = merger.vote()?;
        assert_eq!(c.label(), "B");
        assert_eq!(c.votes(), [("B".to_string(), 2)]);
        assert_eq!(c.neighbors().len(), 2);
        Ok(())
    }
}
