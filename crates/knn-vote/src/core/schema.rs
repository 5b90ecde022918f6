//! The ordered list of features that every record and query must follow.

use serde::{Deserialize, Serialize};

use super::KnnError;

/// How a single feature is read and compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureKind {
    /// A real value rescaled to `(value - min) / (max - min)`.
    Numeric {
        /// The smallest value expected in the training data.
        min: f64,
        /// The largest value expected in the training data.
        max: f64,
    },
    /// A categorical value compared only for equality.
    Nominal,
}

impl FeatureKind {
    /// Whether this feature is numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}

/// A named feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// The name of the feature.
    pub name: String,
    /// How the feature is read and compared.
    #[serde(flatten)]
    pub kind: FeatureKind,
}

impl Feature {
    /// A numeric feature with the given bounds.
    pub fn numeric<S: Into<String>>(name: S, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Numeric { min, max },
        }
    }

    /// A nominal feature.
    pub fn nominal<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Nominal,
        }
    }
}

/// The ordered features of a record, excluding the trailing label.
///
/// A schema is validated on construction: it is non-empty, its names are
/// unique and every numeric feature has finite bounds with `min < max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
#[allow(clippy::module_name_repetitions)]
pub struct FeatureSchema {
    /// The features, in field order.
    features: Vec<Feature>,
}

/// The unvalidated form used for (de)serialization.
#[derive(Serialize, Deserialize)]
struct RawSchema {
    /// The features, in field order.
    features: Vec<Feature>,
}

impl TryFrom<RawSchema> for FeatureSchema {
    type Error = KnnError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        Self::new(raw.features)
    }
}

impl From<FeatureSchema> for RawSchema {
    fn from(schema: FeatureSchema) -> Self {
        Self {
            features: schema.features,
        }
    }
}

impl FeatureSchema {
    /// Creates a new schema.
    ///
    /// # Errors
    ///
    /// - If there are no features.
    /// - If two features share a name.
    /// - If a numeric feature has non-finite bounds or `min >= max`.
    pub fn new(features: Vec<Feature>) -> Result<Self, KnnError> {
        if features.is_empty() {
            return Err(KnnError::configuration("The schema has no features"));
        }

        for (i, f) in features.iter().enumerate() {
            if features[..i].iter().any(|g| g.name == f.name) {
                return Err(KnnError::configuration(format!("Duplicate feature name: {}", f.name)));
            }
            if let FeatureKind::Numeric { min, max } = f.kind {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(KnnError::configuration(format!(
                        "Feature {} has unusable bounds [{min}, {max}]",
                        f.name
                    )));
                }
            }
        }

        Ok(Self { features })
    }

    /// Reads a schema from JSON of the form
    /// `{"features": [{"name": "a", "kind": "numeric", "min": 0, "max": 1}, {"name": "b", "kind": "nominal"}]}`.
    ///
    /// # Errors
    ///
    /// If the JSON is malformed or describes an invalid schema.
    pub fn from_json(json: &str) -> Result<Self, KnnError> {
        serde_json::from_str(json).map_err(|e| KnnError::configuration(format!("Bad schema JSON: {e}")))
    }

    /// Writes the schema as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// If serialization fails.
    pub fn to_json(&self) -> Result<String, KnnError> {
        serde_json::to_string_pretty(self).map_err(|e| KnnError::configuration(e.to_string()))
    }

    /// The schema of the breast-cancer biopsy records the classifier was first
    /// built for: a sample code, eight cytology scores on a 1-10 scale, and the
    /// mitoses score compared as a category.
    #[must_use]
    pub fn reference() -> Self {
        let mut features = vec![Feature::numeric("code", 61_634.0, 13_454_352.0)];
        features.extend(
            [
                "clump",
                "cell_size",
                "cell_shape",
                "marginal_adhesion",
                "single_cell_size",
                "bare_nuclei",
                "chromatin",
                "nucleoli",
            ]
            .into_iter()
            .map(|name| Feature::numeric(name, 1.0, 10.0)),
        );
        features.push(Feature::nominal("mitoses"));
        Self { features }
    }

    /// The features, in field order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The number of features, i.e. the number of fields before the label.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.features.len()
    }

    /// The number of numeric features.
    #[must_use]
    pub fn num_numeric(&self) -> usize {
        self.features.iter().filter(|f| f.kind.is_numeric()).count()
    }
}
