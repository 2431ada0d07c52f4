//! # Query - HTY Query Pipeline
//!
//! Read-side query primitives and copy-on-write append over an HTY table,
//! composed from the [`schema`] catalog and the [`table`] scanner.
//!
//! ## Architecture
//!
//! ```text
//! Caller
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                  HtyTable                      │
//! │            (hty path + Schema)                 │
//! │                                               │
//! │ project.rs → resolve names → scan_column /    │
//! │              scan_all → ResultSet              │
//! │                                               │
//! │ filter.rs  → project + CompareOp::evaluate     │
//! │                                               │
//! │ append.rs  → TableWriter::append_rows          │
//! │              (new file, source untouched)      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module        | Purpose                                                    |
//! |---------------|------------------------------------------------------------|
//! | [`predicate`] | `CompareOp`: the six comparison operators and their codes  |
//! | [`result`]    | `ResultSet`: named, row-aligned column buffers             |
//! | `project`     | `project_single_column()`, `project()`                     |
//! | `filter`      | `filter()` (column-level), `project_and_filter()` (row-level) |
//! | `append`      | `add_row()`                                                |
//!
//! Every operation is a pure function of the schema, the file contents and
//! its arguments. Names are resolved before the file is opened, and any error
//! aborts the call with no partial result.
//!
//! ## Example
//!
//! ```rust,no_run
//! use query::{CompareOp, HtyTable};
//!
//! let table = HtyTable::open("data.hty").unwrap();
//! let big = table
//!     .project_and_filter(&["a", "c"], "a", CompareOp::Gt, 3)
//!     .unwrap();
//! println!("{} matching rows", big.num_rows());
//! ```

mod append;
mod filter;
pub mod predicate;
mod project;
pub mod result;

use schema::{Schema, SchemaError};
use std::fs::File;
use std::path::{Path, PathBuf};
use table::{TableError, TableReader, TableStats};
use thiserror::Error;

pub use predicate::CompareOp;
pub use result::{ResultColumn, ResultSet};
pub use schema::extract_metadata;

/// Errors returned by query and append operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Sidecar unavailable or column name unknown.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Binary file unavailable, bad row arity, or I/O failure.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A comparison operator code or symbol that is not one of the six.
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// A result set does not have the shape its consumer expects.
    #[error("result shape mismatch: {0}")]
    ResultShapeMismatch(String),
}

impl QueryError {
    /// Returns `true` if this error is an unknown column name.
    #[must_use]
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, QueryError::Schema(SchemaError::ColumnNotFound(_)))
    }
}

/// An HTY file paired with the schema that describes it.
///
/// The handle holds no open file: every query opens the file, scans it and
/// closes it again, so a handle is cheap to clone and safe to keep around
/// while other handles write *new* files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtyTable {
    path: PathBuf,
    schema: Schema,
}

impl HtyTable {
    /// Opens a table by loading the sidecar at `<path>.json`.
    ///
    /// The binary file itself is not touched until the first query.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MetadataUnavailable`] (wrapped) if the sidecar
    /// is missing or invalid.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QueryError> {
        let path = path.as_ref().to_path_buf();
        let schema = Schema::load(&path)?;
        Ok(Self { path, schema })
    }

    /// Pairs `path` with an explicit schema, ignoring any sidecar.
    pub fn with_schema<P: AsRef<Path>>(path: P, schema: Schema) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            schema,
        }
    }

    /// Path of the binary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Schema used to interpret the file.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// File length, row count and trailing bytes as implied by the schema.
    pub fn stats(&self) -> Result<TableStats, QueryError> {
        Ok(self.reader()?.stats()?)
    }

    pub(crate) fn reader(&self) -> Result<TableReader<File>, QueryError> {
        Ok(TableReader::open(&self.path, self.schema.len())?)
    }
}

#[cfg(test)]
mod tests;
