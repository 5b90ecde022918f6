//! Partitioned classification.

use knn_vote::MixedSquared;

use super::{Inputs, MergeMode};
use crate::data;

/// Reads the inputs, classifies the query over the partitions and writes the
/// result.
pub fn run(inputs: &Inputs, num_partitions: Option<usize>, mode: MergeMode) -> Result<(), String> {
    let (params, query) = inputs.parameters()?;
    let partitions = data::read_partitions(&inputs.inp_paths, num_partitions)?;
    ftlog::info!(
        "Read {} records in {} partitions",
        partitions.iter().map(Vec::len).sum::<usize>(),
        partitions.len()
    );

    let classification = match mode {
        MergeMode::Sequential => knn_vote::classify(&partitions, &query, &params, &MixedSquared),
        MergeMode::Batch => knn_vote::par_classify(&partitions, &query, &params, &MixedSquared),
        MergeMode::Streaming => knn_vote::par_classify_streaming(&partitions, &query, &params, &MixedSquared),
    }
    .map_err(|e| e.to_string())?;

    inputs.write(&classification)
}
