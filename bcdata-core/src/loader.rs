//! CSV loading into `Record`s.
//!
//! Rows may be shorter than the header (trailing cells are then absent and
//! show up as `missing` during validation). An input with no header row,
//! rows longer than the header, or duplicate header names make the file
//! unreadable and abort the load.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::record::Record;

/// Fatal errors while reading the input table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("'{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no columns to parse from input")]
    EmptyInput,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate column '{name}' in header")]
    DuplicateHeader { name: String },

    #[error("row {row_index} has {found} fields, header has {expected}")]
    RowTooLong {
        row_index: usize,
        expected: usize,
        found: usize,
    },
}

/// A loaded table: the header row plus one record per data row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a headered CSV file.
pub fn load_records(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let table = load_records_from_reader(file)?;
    info!(path = %path.display(), rows = table.len(), "loaded input table");
    Ok(table)
}

/// Load a headered CSV from any reader.
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    for (i, name) in headers.iter().enumerate() {
        if headers[..i].contains(name) {
            return Err(LoadError::DuplicateHeader { name: name.clone() });
        }
    }
    debug!(columns = headers.len(), "read header row");

    let mut records = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let row = result?;
        if row.len() > headers.len() {
            return Err(LoadError::RowTooLong {
                row_index,
                expected: headers.len(),
                found: row.len(),
            });
        }
        records.push(Record::from_pairs(
            headers.iter().map(String::as_str).zip(row.iter()),
        ));
    }

    Ok(Table { headers, records })
}
