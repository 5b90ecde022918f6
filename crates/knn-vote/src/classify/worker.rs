//! Scanning one partition for its nearest candidates.

use crate::{core::normalizer, FeatureSchema, FeatureVector, KnnError, Metric, SizedHeap};

use super::LabeledCandidate;

/// Counts kept while scanning a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// The number of non-blank records read.
    pub records: usize,
    /// The number of records skipped because they failed to parse.
    pub skipped: usize,
}

impl ScanStats {
    /// The number of records that were compared with the query.
    #[must_use]
    pub const fn scored(&self) -> usize {
        self.records - self.skipped
    }
}

impl std::ops::Add for ScanStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            records: self.records + rhs.records,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

/// Finds the `k` training records of a partition nearest to a fixed query.
///
/// The worker only borrows the query, the schema and the metric, so any
/// number of workers can scan different partitions at the same time. Running
/// a worker has no side effects other than logging, so a partition can be
/// re-scanned safely.
pub struct PartitionWorker<'a, M: Metric> {
    /// The features of every record.
    schema: &'a FeatureSchema,
    /// The normalized query.
    query: &'a FeatureVector,
    /// The distance function.
    metric: &'a M,
    /// The number of candidates to keep.
    k: usize,
}

impl<'a, M: Metric> PartitionWorker<'a, M> {
    /// Creates a new `PartitionWorker`.
    ///
    /// # Errors
    ///
    /// If `k` is zero.
    pub fn new(schema: &'a FeatureSchema, query: &'a FeatureVector, metric: &'a M, k: usize) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::configuration("k_local must be at least 1"));
        }
        Ok(Self {
            schema,
            query,
            metric,
            k,
        })
    }

    /// The number of candidates the worker keeps.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Scores one raw training record against the query.
    ///
    /// # Errors
    ///
    /// If the record does not parse.
    pub fn score(&self, record: &str) -> Result<LabeledCandidate, KnnError> {
        let (vector, label) = normalizer::parse_labeled(self.schema, record)?;
        Ok(LabeledCandidate::new(self.metric.distance(&vector, self.query), label))
    }

    /// Scans the records and returns at most `k` nearest candidates in
    /// ascending order.
    pub fn run<I, R>(&self, records: I) -> Vec<LabeledCandidate>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.scan(records).0
    }

    /// Like [`run`](Self::run), but also reports how many records were read
    /// and skipped.
    ///
    /// Blank records are not counted. Records that fail to parse are logged
    /// and skipped.
    pub fn scan<I, R>(&self, records: I) -> (Vec<LabeledCandidate>, ScanStats)
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        let (hits, stats) = records
            .into_iter()
            .filter(|r| !r.as_ref().trim().is_empty())
            .fold(
                (SizedHeap::from_k(self.k), ScanStats::default()),
                |(mut hits, mut stats), record| {
                    stats.records += 1;
                    match self.score(record.as_ref()) {
                        Ok(candidate) => hits.offer(candidate),
                        Err(e) => {
                            stats.skipped += 1;
                            ftlog::warn!("Skipping record {}: {e}", stats.records);
                        }
                    }
                    (hits, stats)
                },
            );

        ftlog::debug!(
            "Scanned {} records ({} skipped), kept {} of {} candidates",
            stats.records,
            stats.skipped,
            hits.len(),
            hits.k()
        );

        (hits.into_sorted_vec(), stats)
    }
}
