//! Validation errors, the aggregated report, and its text/JSON renderings.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::schema::FieldType;

pub const SUCCESS_LINE: &str = "Data validation successful!";
pub const FAILURE_HEADER: &str = "Data validation failed:";

/// What went wrong with one field of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The row has no (or a blank) value for the field.
    Missing,
    /// The value could not be coerced to the expected type.
    TypeMismatch { expected: FieldType, got: String },
}

impl ErrorKind {
    fn tag(&self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::TypeMismatch { .. } => "type_mismatch",
        }
    }
}

/// A single per-field failure. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub row_index: usize,
    /// Canonical field name.
    pub field: &'static str,
    /// CSV header the value was expected under.
    pub alias: &'static str,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn missing(row_index: usize, field: &'static str, alias: &'static str) -> Self {
        Self {
            row_index,
            field,
            alias,
            kind: ErrorKind::Missing,
        }
    }

    pub fn type_mismatch(
        row_index: usize,
        field: &'static str,
        alias: &'static str,
        expected: FieldType,
        got: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            field,
            alias,
            kind: ErrorKind::TypeMismatch {
                expected,
                got: got.into(),
            },
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ErrorKind::Missing => "missing".to_string(),
            ErrorKind::TypeMismatch { expected, got } => {
                format!("type mismatch: expected {expected}, got {got}")
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ErrorKind::Missing)
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, field '{}': {}",
            self.row_index,
            self.field,
            self.message()
        )
    }
}

/// All errors for a dataset, in non-decreasing row order.
///
/// An empty report means the dataset is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
    rows_checked: usize,
}

impl ValidationReport {
    pub(crate) fn new(errors: Vec<ValidationError>, rows_checked: usize) -> Self {
        debug_assert!(errors.windows(2).all(|w| w[0].row_index <= w[1].row_index));
        Self {
            errors,
            rows_checked,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn rows_checked(&self) -> usize {
        self.rows_checked
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Distinct row indices with at least one error, ascending.
    pub fn error_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row_index).collect();
        rows.dedup();
        rows
    }

    /// Number of errors per canonical field name.
    pub fn counts_by_field(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.errors {
            *counts.entry(e.field).or_insert(0) += 1;
        }
        counts
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_valid() {
            Outcome::Valid
        } else {
            Outcome::Invalid
        }
    }

    /// Write the human-readable report: a success line, or a failure header
    /// followed by one line per error.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.is_valid() {
            return writeln!(out, "{SUCCESS_LINE}");
        }
        writeln!(out, "{FAILURE_HEADER}")?;
        for e in &self.errors {
            writeln!(out, "Error: {e}")?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Pretty JSON with one object per error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let doc = ReportJson {
            valid: self.is_valid(),
            rows_checked: self.rows_checked,
            error_count: self.errors.len(),
            errors: self.errors.iter().map(ErrorJson::from).collect(),
        };
        serde_json::to_string_pretty(&doc)
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    valid: bool,
    rows_checked: usize,
    error_count: usize,
    errors: Vec<ErrorJson<'a>>,
}

#[derive(Serialize)]
struct ErrorJson<'a> {
    row_index: usize,
    field: &'a str,
    alias: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<&'a str>,
    message: String,
}

impl<'a> From<&'a ValidationError> for ErrorJson<'a> {
    fn from(e: &'a ValidationError) -> Self {
        let (expected, input) = match &e.kind {
            ErrorKind::Missing => (None, None),
            ErrorKind::TypeMismatch { expected, got } => (Some(*expected), Some(got.as_str())),
        };
        Self {
            row_index: e.row_index,
            field: e.field,
            alias: e.alias,
            kind: e.kind.tag(),
            expected,
            input,
            message: e.message(),
        }
    }
}

/// Dataset-level decision, mapped to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Valid => 0,
            Outcome::Invalid => 1,
        }
    }
}
