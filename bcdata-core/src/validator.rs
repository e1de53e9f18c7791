//! Record validation against a fixed schema.
//!
//! Validation is a pure function of (records, schema, policy). Malformed rows
//! are reported as data in the `ValidationReport`; nothing here fails or
//! performs I/O. Every row is checked, so one bad row never hides another.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::Record;
use crate::report::{ValidationError, ValidationReport};
use crate::schema::{FieldSpec, FieldType, Schema};

/// Rows per parallel work unit.
const CHUNK_ROWS: usize = 1024;

/// Whether `NaN` and infinities count as valid floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Non-finite values are reported as type mismatches.
    #[default]
    Reject,
    Allow,
}

/// How many errors a single row may contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Report every failing field of every row.
    #[default]
    CollectAll,
    /// Stop checking a row at its first failing field.
    FirstErrorPerRow,
}

/// Knobs for a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub non_finite: NonFinitePolicy,
    pub row_policy: RowPolicy,
    /// Validate row chunks on the rayon pool.
    pub parallel: bool,
    /// Minimum row count before `parallel` takes effect.
    pub parallel_threshold: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            non_finite: NonFinitePolicy::Reject,
            row_policy: RowPolicy::CollectAll,
            parallel: false,
            parallel_threshold: 4096,
        }
    }
}

/// Whether raw cell text coerces to `expected`.
///
/// Integers also accept float literals with no fractional part (`"1.0"`),
/// which is how tabular exporters write integer columns containing blanks.
pub fn coerces(raw: &str, expected: FieldType, non_finite: NonFinitePolicy) -> bool {
    let text = raw.trim();
    match expected {
        FieldType::Float => match text.parse::<f64>() {
            Ok(v) => v.is_finite() || non_finite == NonFinitePolicy::Allow,
            Err(_) => false,
        },
        FieldType::Int => {
            if text.parse::<i64>().is_ok() {
                return true;
            }
            let Ok(v) = text.parse::<f64>() else {
                return false;
            };
            let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
            v.is_finite() && v.fract() == 0.0 && in_range
        }
    }
}

/// Validates record batches against one schema.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    schema: Schema,
    policy: ValidationPolicy,
}

impl RecordValidator {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate every record in table order.
    ///
    /// The parallel path produces exactly the same report as the serial one.
    pub fn validate(&self, records: &[Record]) -> ValidationReport {
        let parallel = self.policy.parallel && records.len() >= self.policy.parallel_threshold;
        debug!(
            rows = records.len(),
            fields = self.schema.len(),
            parallel,
            "validating records"
        );

        let errors: Vec<ValidationError> = if parallel {
            records
                .par_chunks(CHUNK_ROWS)
                .enumerate()
                .map(|(chunk, rows)| {
                    let offset = chunk * CHUNK_ROWS;
                    let mut errors = Vec::new();
                    for (i, record) in rows.iter().enumerate() {
                        self.check_row(offset + i, record, &mut errors);
                    }
                    errors
                })
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            let mut errors = Vec::new();
            for (i, record) in records.iter().enumerate() {
                self.check_row(i, record, &mut errors);
            }
            errors
        };

        debug!(errors = errors.len(), "validation finished");
        ValidationReport::new(errors, records.len())
    }

    /// Validate a single row. `row_index` is only used for error labelling.
    pub fn validate_row(&self, row_index: usize, record: &Record) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_row(row_index, record, &mut errors);
        errors
    }

    fn check_row(&self, row_index: usize, record: &Record, errors: &mut Vec<ValidationError>) {
        for spec in self.schema.iter() {
            if let Some(err) = self.check_field(row_index, spec, record) {
                errors.push(err);
                if self.policy.row_policy == RowPolicy::FirstErrorPerRow {
                    return;
                }
            }
        }
    }

    fn check_field(
        &self,
        row_index: usize,
        spec: &FieldSpec,
        record: &Record,
    ) -> Option<ValidationError> {
        let Some(raw) = record.value_for(spec) else {
            return Some(ValidationError::missing(
                row_index,
                spec.canonical_name,
                spec.source_alias,
            ));
        };
        if coerces(raw, spec.expected_type, self.policy.non_finite) {
            return None;
        }
        Some(ValidationError::type_mismatch(
            row_index,
            spec.canonical_name,
            spec.source_alias,
            spec.expected_type,
            raw.trim(),
        ))
    }
}

/// Validate `records` against `schema` with the default policy.
pub fn validate(records: &[Record], schema: &Schema) -> ValidationReport {
    RecordValidator::new(schema.clone()).validate(records)
}
