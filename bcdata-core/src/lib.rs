//! bcdata core: schema, record validation, and reporting for the
//! breast-cancer feature table.
//!
//! This crate provides:
//! - The fixed column schema with header aliases (`schema`)
//! - Raw row records keyed by header name (`record`)
//! - Batch validation with configurable per-row and non-finite policies (`validator`)
//! - Error aggregation with text and JSON renderings (`report`)
//! - CSV loading (`loader`) and TOML run configuration (`config`)

pub mod config;
pub mod loader;
pub mod record;
pub mod report;
pub mod schema;
pub mod validator;

pub use config::{ConfigError, OutputFormat, ValidatorConfig, DEFAULT_INPUT};
pub use loader::{load_records, load_records_from_reader, LoadError, Table};
pub use record::Record;
pub use report::{ErrorKind, Outcome, ValidationError, ValidationReport};
pub use schema::{FieldSpec, FieldType, HeaderCheck, Schema, SchemaError, BREAST_CANCER_FIELDS};
pub use validator::{
    coerces, validate, NonFinitePolicy, RecordValidator, RowPolicy, ValidationPolicy,
};
