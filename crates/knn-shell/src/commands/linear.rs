//! Classification with a single scan, for checking partitioned results.

use knn_vote::MixedSquared;

use super::Inputs;
use crate::data;

/// Reads the inputs, classifies the query with one scan using `k_global` and
/// writes the result.
pub fn run(inputs: &Inputs) -> Result<(), String> {
    let (params, query) = inputs.parameters()?;
    let records = data::read_partitions(&inputs.inp_paths, Some(1))?.concat();
    ftlog::info!("Read {} records", records.len());

    let classification =
        knn_vote::classify_linear(&records, &query, &params, &MixedSquared).map_err(|e| e.to_string())?;

    inputs.write(&classification)
}
