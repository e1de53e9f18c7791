//! Schema contract for the breast-cancer feature table.
//!
//! Defines the exact column headers, the identifiers they map to, and the
//! scalar type each column must coerce to. The schema is an immutable value
//! built once at startup and handed to the validator.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scalar type a column must coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Float,
    Int,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Float => write!(f, "float"),
            FieldType::Int => write!(f, "int"),
        }
    }
}

/// A single field in the schema.
///
/// `canonical_name` is the identifier reported in errors; `source_alias` is the
/// header string as it appears in the CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub canonical_name: &'static str,
    pub source_alias: &'static str,
    pub expected_type: FieldType,
}

impl FieldSpec {
    pub const fn float(canonical_name: &'static str, source_alias: &'static str) -> Self {
        Self {
            canonical_name,
            source_alias,
            expected_type: FieldType::Float,
        }
    }

    pub const fn int(canonical_name: &'static str, source_alias: &'static str) -> Self {
        Self {
            canonical_name,
            source_alias,
            expected_type: FieldType::Int,
        }
    }
}

/// The breast-cancer column table, in report order.
///
/// - Headers: scikit-learn `load_breast_cancer` feature names, space separated
/// - Order: 10 mean features, 10 standard-error features, 10 worst features, target
/// - Target: integer class label (0 = malignant, 1 = benign)
pub const BREAST_CANCER_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("mean_radius", "mean radius"),
    FieldSpec::float("mean_texture", "mean texture"),
    FieldSpec::float("mean_perimeter", "mean perimeter"),
    FieldSpec::float("mean_area", "mean area"),
    FieldSpec::float("mean_smoothness", "mean smoothness"),
    FieldSpec::float("mean_compactness", "mean compactness"),
    FieldSpec::float("mean_concavity", "mean concavity"),
    FieldSpec::float("mean_concave_points", "mean concave points"),
    FieldSpec::float("mean_symmetry", "mean symmetry"),
    FieldSpec::float("mean_fractal_dimension", "mean fractal dimension"),
    FieldSpec::float("radius_error", "radius error"),
    FieldSpec::float("texture_error", "texture error"),
    FieldSpec::float("perimeter_error", "perimeter error"),
    FieldSpec::float("area_error", "area error"),
    FieldSpec::float("smoothness_error", "smoothness error"),
    FieldSpec::float("compactness_error", "compactness error"),
    FieldSpec::float("concavity_error", "concavity error"),
    FieldSpec::float("concave_points_error", "concave points error"),
    FieldSpec::float("symmetry_error", "symmetry error"),
    FieldSpec::float("fractal_dimension_error", "fractal dimension error"),
    FieldSpec::float("worst_radius", "worst radius"),
    FieldSpec::float("worst_texture", "worst texture"),
    FieldSpec::float("worst_perimeter", "worst perimeter"),
    FieldSpec::float("worst_area", "worst area"),
    FieldSpec::float("worst_smoothness", "worst smoothness"),
    FieldSpec::float("worst_compactness", "worst compactness"),
    FieldSpec::float("worst_concavity", "worst concavity"),
    FieldSpec::float("worst_concave_points", "worst concave points"),
    FieldSpec::float("worst_symmetry", "worst symmetry"),
    FieldSpec::float("worst_fractal_dimension", "worst fractal dimension"),
    FieldSpec::int("target", "target"),
];

/// Rejected schema declarations. These are programming errors, not data errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema has no fields")]
    Empty,

    #[error("duplicate canonical name '{0}' in schema")]
    DuplicateCanonicalName(String),

    #[error("duplicate source alias '{alias}' (fields '{first}' and '{second}')")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
}

/// Ordered, immutable set of field specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Build a schema, rejecting duplicate canonical names or aliases.
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Result<Self, SchemaError> {
        let fields: Vec<FieldSpec> = fields.into_iter().collect();
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut names = HashSet::new();
        for spec in &fields {
            if !names.insert(spec.canonical_name) {
                return Err(SchemaError::DuplicateCanonicalName(
                    spec.canonical_name.to_string(),
                ));
            }
        }

        for (i, spec) in fields.iter().enumerate() {
            if let Some(first) = fields[..i]
                .iter()
                .find(|f| f.source_alias == spec.source_alias)
            {
                return Err(SchemaError::DuplicateAlias {
                    alias: spec.source_alias.to_string(),
                    first: first.canonical_name.to_string(),
                    second: spec.canonical_name.to_string(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// The fixed breast-cancer schema.
    pub fn breast_cancer() -> Self {
        Self::new(BREAST_CANCER_FIELDS.iter().copied())
            .expect("BREAST_CANCER_FIELDS has unique names and aliases")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by canonical name.
    pub fn field(&self, canonical_name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.canonical_name == canonical_name)
    }

    /// Look up a field by its CSV header alias.
    pub fn by_alias(&self, alias: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.source_alias == alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.source_alias)
    }

    /// Compare a header row against the schema.
    ///
    /// A field counts as present if either its alias or its canonical name
    /// appears in the header.
    pub fn check_headers<S: AsRef<str>>(&self, headers: &[S]) -> HeaderCheck {
        let present = |name: &str| headers.iter().any(|h| h.as_ref() == name);

        let missing = self
            .fields
            .iter()
            .filter(|f| !present(f.source_alias) && !present(f.canonical_name))
            .map(|f| f.canonical_name)
            .collect();

        let unknown = headers
            .iter()
            .map(|h| h.as_ref())
            .filter(|h| {
                !self
                    .fields
                    .iter()
                    .any(|f| f.source_alias == *h || f.canonical_name == *h)
            })
            .map(String::from)
            .collect();

        HeaderCheck { missing, unknown }
    }
}

/// Result of comparing a header row with the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCheck {
    /// Canonical names of schema fields with no matching column.
    pub missing: Vec<&'static str>,
    /// Header names the schema does not know. These columns are ignored.
    pub unknown: Vec<String>,
}

impl HeaderCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
