//! Fanning a query out over partitions and fanning the candidates back in.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use crate::{FeatureVector, KnnError, Metric, ParameterSet};

use super::{Classification, Merger, PartitionWorker, ScanStats};

/// Logs the totals of a run.
fn log_totals<M: Metric>(metric: &M, stats: ScanStats, num_partitions: usize, c: &Classification) {
    ftlog::info!(
        "Classified as {:?} under {} from {} partitions: {} records, {} skipped, votes {:?}",
        c.label(),
        metric.name(),
        num_partitions,
        stats.records,
        stats.skipped,
        c.votes()
    );
}

/// Classifies the query by scanning each partition in turn and merging once.
///
/// # Errors
///
/// - If `k_local` or `k_global` is zero.
/// - If no partition yields a candidate.
pub fn classify<P, R, M>(
    partitions: &[P],
    query: &FeatureVector,
    params: &ParameterSet,
    metric: &M,
) -> Result<Classification, KnnError>
where
    P: AsRef<[R]>,
    R: AsRef<str>,
    M: Metric,
{
    let worker = PartitionWorker::new(params.schema(), query, metric, params.k_local())?;
    let mut merger = Merger::new(params.k_global())?;

    let mut stats = ScanStats::default();
    for p in partitions {
        let (candidates, s) = worker.scan(p.as_ref());
        stats = stats + s;
        merger.absorb(candidates);
    }

    let c = merger.vote()?;
    log_totals(metric, stats, partitions.len(), &c);
    Ok(c)
}

/// Parallel version of [`classify`].
///
/// Every partition is scanned on the rayon pool, all outputs are collected,
/// and then a single merge runs on the calling thread.
///
/// # Errors
///
/// See [`classify`].
pub fn par_classify<P, R, M>(
    partitions: &[P],
    query: &FeatureVector,
    params: &ParameterSet,
    metric: &M,
) -> Result<Classification, KnnError>
where
    P: AsRef<[R]> + Sync,
    R: AsRef<str> + Sync,
    M: Metric,
{
    let worker = PartitionWorker::new(params.schema(), query, metric, params.k_local())?;
    let mut merger = Merger::new(params.k_global())?;

    let outputs = partitions
        .par_iter()
        .map(|p| worker.scan(p.as_ref()))
        .collect::<Vec<_>>();

    let mut stats = ScanStats::default();
    for (candidates, s) in outputs {
        stats = stats + s;
        merger.absorb(candidates);
    }

    let c = merger.vote()?;
    log_totals(metric, stats, partitions.len(), &c);
    Ok(c)
}

/// Parallel version of [`classify`] that merges while partitions are still
/// being scanned.
///
/// Each partition's output is absorbed into a shared, mutex-guarded
/// [`Merger`] as soon as its scan finishes.
///
/// # Errors
///
/// See [`classify`].
pub fn par_classify_streaming<P, R, M>(
    partitions: &[P],
    query: &FeatureVector,
    params: &ParameterSet,
    metric: &M,
) -> Result<Classification, KnnError>
where
    P: AsRef<[R]> + Sync,
    R: AsRef<str> + Sync,
    M: Metric,
{
    let worker = PartitionWorker::new(params.schema(), query, metric, params.k_local())?;
    let merger = Mutex::new(Merger::new(params.k_global())?);

    let stats = partitions
        .par_iter()
        .map(|p| {
            let (candidates, stats) = worker.scan(p.as_ref());
            merger
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .absorb(candidates);
            stats
        })
        .reduce(ScanStats::default, |a, b| a + b);

    let c = merger.into_inner().unwrap_or_else(PoisonError::into_inner).vote()?;
    log_totals(metric, stats, partitions.len(), &c);
    Ok(c)
}

/// Classifies the query with a single scan over every record, using
/// `k_global` throughout.
///
/// This is the non-partitioned reference the partitioned functions agree
/// with whenever `k_local >= k_global`.
///
/// # Errors
///
/// - If `k_global` is zero.
/// - If no record parses.
pub fn classify_linear<I, R, M>(
    records: I,
    query: &FeatureVector,
    params: &ParameterSet,
    metric: &M,
) -> Result<Classification, KnnError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<str>,
    M: Metric,
{
    let worker = PartitionWorker::new(params.schema(), query, metric, params.k_global())?;
    let (neighbors, stats) = worker.scan(records);

    let c = Classification::from_neighbors(neighbors)?;
    log_totals(metric, stats, 1, &c);
    Ok(c)
}
