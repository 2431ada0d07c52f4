//! # Table - HTY Binary Row Store
//!
//! Fixed-width, row-major storage for integer tables. A table is a plain file
//! of 4-byte signed integers; the column count comes from the schema sidecar
//! (see the [`schema`] crate), never from the file itself.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ ROW 0    v(0,0) | v(0,1) | ... | v(0,n-1)                     │
//! │ ROW 1    v(1,0) | v(1,1) | ... | v(1,n-1)                     │
//! │ ...                                                           │
//! │ ROW r-1  v(r-1,0) | ...        | v(r-1,n-1)                   │
//! ├───────────────────────────────────────────────────────────────┤
//! │ [optional garbage: fewer than 4*n bytes, ignored]              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Value `(r, c)` lives at byte `(r * n + c) * 4`. Every value is an `i32` in
//! the platform's native byte order. There is no header, footer, magic or
//! checksum, and the row count is implied by the file length:
//! `r = len / (4 * n)`.
//!
//! ## Access paths
//!
//! | Operation                          | Pattern                              |
//! |-----------------------------------|--------------------------------------|
//! | [`TableReader::scan_column`]      | strided seek, one value per row      |
//! | [`TableReader::scan_all`]         | sequential, whole rows only          |
//! | [`TableWriter::append_rows`]      | copy source to new file, then append |
//! | [`TableWriter::create`]           | write a fresh file from rows         |
//!
//! Files are never modified in place. Appends always produce a new file, which
//! is what makes concurrent readers of the source safe.

mod format;
mod reader;
mod writer;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use format::{row_stride, value_offset, TableStats, VALUE_BYTES};
pub use reader::TableReader;
pub use writer::TableWriter;

/// A decoded row: one value per column, in ordinal order.
pub type Row = Vec<i32>;

/// Errors raised by the HTY reader and writer.
#[derive(Debug, Error)]
pub enum TableError {
    /// The file could not be opened in the requested mode.
    #[error("cannot open HTY file {}: {source}", path.display())]
    FileUnavailable {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// A row to be written does not have one value per column.
    #[error("invalid row size at row {row}: expected {expected} columns, got {actual}")]
    RowSizeMismatch {
        /// Zero-based index of the offending row within the batch.
        row: usize,
        /// Column count from the schema.
        expected: usize,
        /// Values supplied.
        actual: usize,
    },

    /// A column ordinal outside `0..num_columns` was requested.
    #[error("column ordinal {ordinal} out of range for {num_columns} columns")]
    OrdinalOutOfRange {
        /// Requested ordinal.
        ordinal: usize,
        /// Columns per row.
        num_columns: usize,
    },

    /// An I/O error other than reaching the end of the data.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl TableError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TableError::FileUnavailable {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests;
