//! Errors raised while classifying.

/// Everything that can go wrong between reading a record and voting on a
/// label.
///
/// Only `Parse` is recoverable: a `PartitionWorker` skips the offending
/// record and keeps scanning. The other variants end the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum KnnError {
    /// A record had a malformed or missing field.
    #[error("Failed to parse record: {reason}")]
    Parse {
        /// What was wrong with the record.
        reason: String,
    },
    /// The parameter file, the schema or the `k` values are unusable.
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// What was wrong with the configuration.
        reason: String,
    },
    /// The merge received no candidates at all.
    #[error("No candidates were offered to the merge; every partition was empty or unparseable")]
    EmptyInput,
}

impl KnnError {
    /// Creates a `Parse` error.
    pub fn parse<S: Into<String>>(reason: S) -> Self {
        Self::Parse { reason: reason.into() }
    }

    /// Creates a `Configuration` error.
    pub fn configuration<S: Into<String>>(reason: S) -> Self {
        Self::Configuration { reason: reason.into() }
    }
}
