//! The parameters fixed for one classification run.

use super::{normalizer, FeatureSchema, FeatureVector, KnnError};

/// The two neighbor counts and the feature schema of a run.
///
/// `k_local` bounds each partition's candidates and `k_global` bounds the
/// merged neighbors that vote. They are independent: neither one ever
/// overrides the other.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct ParameterSet {
    /// The number of candidates each partition keeps.
    k_local: usize,
    /// The number of neighbors that vote.
    k_global: usize,
    /// The features of every record.
    schema: FeatureSchema,
}

impl ParameterSet {
    /// Creates a new `ParameterSet`.
    ///
    /// A `k_local` smaller than `k_global` is accepted but logged, since the
    /// partitions may then drop neighbors the merge needed.
    ///
    /// # Errors
    ///
    /// If either `k` is zero.
    pub fn new(k_local: usize, k_global: usize, schema: FeatureSchema) -> Result<Self, KnnError> {
        if k_local == 0 || k_global == 0 {
            return Err(KnnError::configuration(format!(
                "k values must be positive, got k_local = {k_local}, k_global = {k_global}"
            )));
        }
        if k_local < k_global {
            ftlog::warn!(
                "k_local ({k_local}) < k_global ({k_global}); partitioned results may differ from a single scan"
            );
        }
        Ok(Self {
            k_local,
            k_global,
            schema,
        })
    }

    /// Parses the contents of a parameter file: `K, <query field 1>, ..., <query field N>`.
    ///
    /// `K` becomes `k_local`. `k_global` defaults to the same value when not
    /// given. The query fields are normalized with the schema.
    ///
    /// # Errors
    ///
    /// - If the file is empty.
    /// - If `K` is not a positive integer.
    /// - If the number of query fields differs from the schema's dimensionality.
    /// - If a query field cannot be normalized.
    pub fn from_param_file(
        contents: &str,
        schema: FeatureSchema,
        k_global: Option<usize>,
    ) -> Result<(Self, FeatureVector), KnnError> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Err(KnnError::configuration("The parameter file is empty"));
        }

        let (k, query) = contents.split_once(',').unwrap_or((contents, ""));
        let k = k
            .trim()
            .parse::<i64>()
            .map_err(|e| KnnError::configuration(format!("K is not an integer: {k:?} ({e})")))?;
        let k_local = usize::try_from(k)
            .ok()
            .filter(|&k| k > 0)
            .ok_or_else(|| KnnError::configuration(format!("K must be positive, got {k}")))?;

        let query = normalizer::parse_query(&schema, query).map_err(|e| match e {
            KnnError::Parse { reason } => KnnError::configuration(format!("Bad query in parameter file: {reason}")),
            e => e,
        })?;

        let params = Self::new(k_local, k_global.unwrap_or(k_local), schema)?;
        Ok((params, query))
    }

    /// The number of candidates each partition keeps.
    #[must_use]
    pub const fn k_local(&self) -> usize {
        self.k_local
    }

    /// The number of neighbors that vote.
    #[must_use]
    pub const fn k_global(&self) -> usize {
        self.k_global
    }

    /// The features of every record.
    #[must_use]
    pub const fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}
