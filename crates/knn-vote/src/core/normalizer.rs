//! Turning raw comma-separated fields into normalized feature vectors.

use super::{FeatureKind, FeatureSchema, KnnError};

/// A record after normalization.
///
/// Numeric and nominal components are kept apart, each in schema order, so the
/// distance function can treat them differently.
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct FeatureVector {
    /// The rescaled numeric components.
    numeric: Vec<f64>,
    /// The raw, trimmed nominal components.
    nominal: Vec<String>,
}

impl FeatureVector {
    /// Creates a vector from already-normalized components.
    #[must_use]
    pub const fn new(numeric: Vec<f64>, nominal: Vec<String>) -> Self {
        Self { numeric, nominal }
    }

    /// The rescaled numeric components.
    #[must_use]
    pub fn numeric(&self) -> &[f64] {
        &self.numeric
    }

    /// The nominal components.
    #[must_use]
    pub fn nominal(&self) -> &[String] {
        &self.nominal
    }
}

/// Rescales `value` into `[0, 1]` relative to the bounds. Values outside the
/// bounds land outside `[0, 1]`.
#[must_use]
pub fn rescale(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Splits a raw record on commas and trims each field.
pub fn split_fields(record: &str) -> impl Iterator<Item = &str> {
    record.split(',').map(str::trim)
}

/// Normalizes the leading fields of a record according to the schema.
///
/// Fields past the schema's dimensionality are ignored.
///
/// # Errors
///
/// - If there are fewer fields than features.
/// - If a field is empty.
/// - If a numeric field is not a finite real number.
/// - If a numeric field is no longer finite after rescaling.
pub fn normalize<S: AsRef<str>>(schema: &FeatureSchema, fields: &[S]) -> Result<FeatureVector, KnnError> {
    if fields.len() < schema.dimensionality() {
        return Err(KnnError::parse(format!(
            "Expected at least {} fields but found {}",
            schema.dimensionality(),
            fields.len()
        )));
    }

    let mut numeric = Vec::with_capacity(schema.num_numeric());
    let mut nominal = Vec::with_capacity(schema.dimensionality() - schema.num_numeric());

    for (feature, field) in schema.features().iter().zip(fields) {
        let field = field.as_ref().trim();
        if field.is_empty() {
            return Err(KnnError::parse(format!("Field {} is empty", feature.name)));
        }

        match feature.kind {
            FeatureKind::Numeric { min, max } => {
                let value = field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| KnnError::parse(format!("Field {} is not a number: {field:?}", feature.name)))?;
                let scaled = rescale(value, min, max);
                if !scaled.is_finite() {
                    return Err(KnnError::parse(format!(
                        "Field {} overflows when rescaled: {field:?}",
                        feature.name
                    )));
                }
                numeric.push(scaled);
            }
            FeatureKind::Nominal => nominal.push(field.to_string()),
        }
    }

    Ok(FeatureVector { numeric, nominal })
}

/// Parses a training record: the schema's features followed by a label.
///
/// Fields after the label are ignored.
///
/// # Errors
///
/// - If any feature field fails to [`normalize`].
/// - If the label is missing or empty.
pub fn parse_labeled(schema: &FeatureSchema, record: &str) -> Result<(FeatureVector, String), KnnError> {
    let fields = split_fields(record).collect::<Vec<_>>();
    let vector = normalize(schema, &fields)?;

    let label = fields
        .get(schema.dimensionality())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| KnnError::parse("Missing label"))?;

    Ok((vector, (*label).to_string()))
}

/// Parses a query record: exactly the schema's features and no label.
///
/// # Errors
///
/// - If the number of fields differs from the schema's dimensionality.
/// - If any field fails to [`normalize`].
pub fn parse_query(schema: &FeatureSchema, record: &str) -> Result<FeatureVector, KnnError> {
    let fields = split_fields(record).collect::<Vec<_>>();
    if fields.len() != schema.dimensionality() {
        return Err(KnnError::parse(format!(
            "Expected {} query fields but found {}",
            schema.dimensionality(),
            fields.len()
        )));
    }
    normalize(schema, &fields)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::core::schema::Feature;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            Feature::numeric("a", 0.0, 10.0),
            Feature::nominal("b"),
            Feature::numeric("c", 1.0, 3.0),
        ])
        .unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[test]
    fn rescales_without_clamping() -> Result<(), KnnError> {
        let v = normalize(&schema(), &["5", " x ", "4"])?;
        assert!(approx_eq!(f64, v.numeric()[0], 0.5));
        assert!(approx_eq!(f64, v.numeric()[1], 1.5));
        assert_eq!(v.nominal(), ["x".to_string()]);

        let v = normalize(&schema(), &["-10", "x", "1"])?;
        assert!(approx_eq!(f64, v.numeric()[0], -1.0));
        assert!(approx_eq!(f64, v.numeric()[1], 0.0));
        Ok(())
    }

    #[test]
    fn is_pure() -> Result<(), KnnError> {
        let schema = schema();
        let a = parse_labeled(&schema, "3.5,red,2,malignant")?;
        let b = parse_labeled(&schema, "3.5,red,2,malignant")?;
        assert_eq!(a, b);
        assert_eq!(a.1, "malignant");
        Ok(())
    }

    #[test]
    fn parse_failures() {
        let schema = schema();
        for record in ["1,x", "1,x,2", "1,x,2,", "one,x,2,L", "1,,2,L", "1,x,NaN,L", "1,x,inf,L", ""] {
            assert!(
                matches!(parse_labeled(&schema, record), Err(KnnError::Parse { .. })),
                "record {record:?} should not parse"
            );
        }
    }

    #[test]
    fn rescaled_overflow_fails() {
        let narrow = FeatureSchema::new(vec![Feature::numeric("x", 0.0, 1e-300)]).unwrap_or_else(|e| unreachable!("{e}"));
        assert!(matches!(parse_labeled(&narrow, "1e10,A"), Err(KnnError::Parse { .. })));
        assert!(matches!(parse_query(&narrow, "1e10"), Err(KnnError::Parse { .. })));
        assert!(parse_labeled(&narrow, "0,B").is_ok());
    }

    #[test]
    fn extra_fields_are_ignored() -> Result<(), KnnError> {
        let (_, label) = parse_labeled(&schema(), "1,x,2,L,trailing,junk")?;
        assert_eq!(label, "L");
        Ok(())
    }

    #[test]
    fn query_needs_exact_count() {
        let schema = schema();
        assert!(parse_query(&schema, "1,x,2").is_ok());
        assert!(parse_query(&schema, "1,x").is_err());
        assert!(parse_query(&schema, "1,x,2,L").is_err());
    }
}
