//! The commands under the `knn-shell` CLI.

pub mod classify;
pub mod linear;

use std::path::PathBuf;

use clap::Subcommand;
use knn_vote::{Classification, FeatureSchema, FeatureVector, ParameterSet};

use crate::data;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan each partition for its nearest candidates, then merge and vote.
    Classify {
        #[command(flatten)]
        inputs: Inputs,

        /// Re-split all training records into this many contiguous
        /// partitions instead of one partition per input file.
        #[arg(short('n'), long)]
        num_partitions: Option<usize>,

        /// How partition outputs are merged.
        #[arg(short('m'), long, default_value = "batch")]
        mode: MergeMode,
    },
    /// Classify with one scan over all training records.
    Linear {
        #[command(flatten)]
        inputs: Inputs,
    },
}

/// The inputs and outputs shared by every command.
#[derive(clap::Args, Debug)]
pub struct Inputs {
    /// The training files. Each line is `<features...>,<label>`.
    #[arg(short('i'), long, num_args = 1.., required = true)]
    pub inp_paths: Vec<PathBuf>,

    /// The parameter file: `K,<query features...>`.
    #[arg(short('p'), long)]
    pub param_path: PathBuf,

    /// A JSON feature schema. Defaults to the built-in reference schema.
    #[arg(short('f'), long)]
    pub schema_path: Option<PathBuf>,

    /// The number of neighbors that vote. Defaults to the K of the parameter
    /// file.
    #[arg(short('k'), long)]
    pub k_global: Option<usize>,

    /// Where to write the result. Defaults to stdout.
    #[arg(short('o'), long)]
    pub out_path: Option<PathBuf>,

    /// Also write the neighbors and the vote tally.
    #[arg(long, default_value_t = false)]
    pub show_neighbors: bool,
}

impl Inputs {
    /// Reads the schema and the parameter file.
    pub fn parameters(&self) -> Result<(ParameterSet, FeatureVector), String> {
        let schema = match &self.schema_path {
            Some(path) => data::read_schema(path)?,
            None => FeatureSchema::reference(),
        };
        ftlog::info!("Schema has {} features", schema.dimensionality());

        let (params, query) = data::read_params(&self.param_path, schema, self.k_global)?;
        ftlog::info!("k_local = {}, k_global = {}", params.k_local(), params.k_global());
        Ok((params, query))
    }

    /// Writes the classification to the output file or stdout.
    pub fn write(&self, classification: &Classification) -> Result<(), String> {
        let report = data::format_report(classification, self.show_neighbors);
        match &self.out_path {
            Some(path) => {
                std::fs::write(path, report).map_err(|e| e.to_string())?;
                ftlog::info!("Wrote result to {path:?}");
            }
            None => print!("{report}"),
        }
        Ok(())
    }
}

/// How partition outputs reach the merge.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum MergeMode {
    /// Scan partitions one after another on the main thread.
    #[value(name = "sequential")]
    Sequential,
    /// Scan partitions in parallel and merge once all have finished.
    #[value(name = "batch")]
    Batch,
    /// Scan partitions in parallel and merge each output as it finishes.
    #[value(name = "streaming")]
    Streaming,
}
