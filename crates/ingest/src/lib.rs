//! # Ingest - CSV to HTY
//!
//! Transcodes CSV text into an HTY table plus its `<hty>.json` sidecar.
//!
//! Every field must parse as an `i32` (surrounding whitespace is ignored) and
//! every record must have as many fields as the first one. Column names come
//! from the header record when [`IngestOptions::has_header`] is set, and are
//! generated as `column0`, `column1`, ... otherwise.
//!
//! Only the sidecar convention is produced: the binary file holds raw rows and
//! nothing else, so it can be read by the query engine directly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingest::{convert_csv_to_hty, IngestOptions};
//!
//! let summary = convert_csv_to_hty("data.csv", "data.hty", &IngestOptions::default()).unwrap();
//! println!("{} rows x {} columns", summary.rows, summary.columns);
//! ```

use csv::StringRecord;
use schema::{Schema, SchemaError};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use table::{TableError, TableWriter};
use thiserror::Error;

/// Errors raised while converting CSV to HTY.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV file could not be opened.
    #[error("cannot open csv file {}: {source}", path.display())]
    CsvUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input contained no records at all.
    #[error("csv input was empty")]
    EmptyInput,

    /// A field is not a 32-bit integer. `row` and `column` are 1-based.
    #[error("csv parse error at row {row}, column {column}: {reason}")]
    Parse { row: u64, column: u64, reason: String },

    /// A record's field count differs from the first record's.
    #[error("csv row {row} has {actual} fields, expected {expected}")]
    RaggedRow {
        row: u64,
        expected: usize,
        actual: usize,
    },

    /// The CSV reader failed (malformed quoting, invalid UTF-8, I/O).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the sidecar failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Writing the binary file failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// How to read the CSV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Treat the first record as column names.
    pub has_header: bool,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: b',',
        }
    }
}

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    /// Data rows written.
    pub rows: u64,
    /// Columns per row.
    pub columns: usize,
    /// Schema written to the sidecar.
    pub schema: Schema,
}

/// Converts the CSV file at `csv_path` into `hty_path` and its sidecar.
///
/// Existing files at either destination are replaced.
pub fn convert_csv_to_hty<P1, P2>(
    csv_path: P1,
    hty_path: P2,
    options: &IngestOptions,
) -> Result<IngestSummary, IngestError>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|source| IngestError::CsvUnavailable {
        path: csv_path.to_path_buf(),
        source,
    })?;
    log::info!(
        "ingesting {} -> {}",
        csv_path.display(),
        hty_path.as_ref().display()
    );
    ingest_reader(file, hty_path, options)
}

/// Converts CSV text from any reader into `hty_path` and its sidecar.
pub fn ingest_reader<R, P>(
    reader: R,
    hty_path: P,
    options: &IngestOptions,
) -> Result<IngestSummary, IngestError>
where
    R: Read,
    P: AsRef<Path>,
{
    let hty_path = hty_path.as_ref();
    let (schema, rows) = parse_csv(reader, options)?;

    TableWriter::create(hty_path, &schema, &rows)?;
    schema.save(hty_path)?;

    log::debug!(
        "wrote {} ({} rows, {} columns)",
        hty_path.display(),
        rows.len(),
        schema.len()
    );
    Ok(IngestSummary {
        rows: rows.len() as u64,
        columns: schema.len(),
        schema,
    })
}

/// Parses CSV text into a schema and integer rows without touching disk.
pub fn parse_csv<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<(Schema, Vec<Vec<i32>>), IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // headers are handled here so row numbers stay consistent
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = StringRecord::new();
    let mut row_number: u64 = 0;

    if !rdr.read_record(&mut record)? {
        return Err(IngestError::EmptyInput);
    }
    row_number += 1;

    let width = record.len();
    let mut rows: Vec<Vec<i32>> = Vec::new();

    let names: Vec<String> = if options.has_header {
        record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let field = field.trim();
                if field.is_empty() {
                    generated_name(i)
                } else {
                    field.to_string()
                }
            })
            .collect()
    } else {
        rows.push(parse_record(&record, row_number, width)?);
        (0..width).map(generated_name).collect()
    };

    while rdr.read_record(&mut record)? {
        row_number += 1;
        rows.push(parse_record(&record, row_number, width)?);
    }

    Ok((Schema::from_names(names), rows))
}

fn generated_name(ordinal: usize) -> String {
    format!("column{}", ordinal)
}

fn parse_record(record: &StringRecord, row: u64, width: usize) -> Result<Vec<i32>, IngestError> {
    if record.len() != width {
        return Err(IngestError::RaggedRow {
            row,
            expected: width,
            actual: record.len(),
        });
    }
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field.trim().parse::<i32>().map_err(|e| IngestError::Parse {
                row,
                column: i as u64 + 1,
                reason: format!("'{}': {}", field, e),
            })
        })
        .collect()
}
