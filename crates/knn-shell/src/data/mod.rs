//! Reading inputs from disk and formatting the result.

use std::path::{Path, PathBuf};

use knn_vote::{Classification, FeatureSchema, FeatureVector, ParameterSet};

/// Reads a JSON feature schema.
pub fn read_schema<P: AsRef<Path>>(path: P) -> Result<FeatureSchema, String> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| format!("Failed to read schema {path:?}: {e}"))?;
    FeatureSchema::from_json(&json).map_err(|e| e.to_string())
}

/// Reads the parameter file and normalizes its query.
pub fn read_params<P: AsRef<Path>>(
    path: P,
    schema: FeatureSchema,
    k_global: Option<usize>,
) -> Result<(ParameterSet, FeatureVector), String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read parameter file {path:?}: {e}"))?;
    ParameterSet::from_param_file(&contents, schema, k_global).map_err(|e| e.to_string())
}

/// Reads the training files, one partition per file.
///
/// With `num_partitions`, all records are instead re-split, in file order,
/// into that many contiguous partitions of nearly equal size.
pub fn read_partitions(paths: &[PathBuf], num_partitions: Option<usize>) -> Result<Vec<Vec<String>>, String> {
    let partitions = paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|contents| contents.lines().map(String::from).collect::<Vec<_>>())
                .map_err(|e| format!("Failed to read training file {path:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match num_partitions {
        None => Ok(partitions),
        Some(0) => Err("The number of partitions must be positive".to_string()),
        Some(n) => Ok(split_evenly(partitions.concat(), n)),
    }
}

/// Splits the records into `n` contiguous parts whose sizes differ by at most
/// one.
fn split_evenly(records: Vec<String>, n: usize) -> Vec<Vec<String>> {
    let len = records.len();
    let mut records = records.into_iter();
    (0..n)
        .map(|i| {
            let size = (i + 1) * len / n - i * len / n;
            records.by_ref().take(size).collect()
        })
        .collect()
}

/// Formats the result: the label on the first line, then optionally the
/// neighbors (distance and label, nearest first) and the vote tally.
pub fn format_report(classification: &Classification, show_neighbors: bool) -> String {
    let mut report = format!("{}\n", classification.label());
    if show_neighbors {
        report.push_str("# neighbors\n");
        for n in classification.neighbors() {
            report.push_str(&format!("{n}\n"));
        }
        report.push_str("# votes\n");
        for (label, count) in classification.votes() {
            report.push_str(&format!("{label}\t{count}\n"));
        }
    }
    report
}
