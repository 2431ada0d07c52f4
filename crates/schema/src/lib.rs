//! # Schema - HTY Column Catalog
//!
//! Maps column names to ordinals for HTY tables. The ordinal of a column is
//! its position in [`Schema::columns`] and is the only thing the scanner uses
//! to compute byte offsets, so the order of the sidecar's `columns` array *is*
//! the physical layout of every row.
//!
//! ## Sidecar format
//!
//! The schema lives next to the binary file at `<hty_path>.json`:
//!
//! ```text
//! {
//!   "columns": [
//!     { "name": "a", "type": "int" },
//!     { "name": "b", "type": "int" }
//!   ]
//! }
//! ```
//!
//! `type` is informational only: every column is stored as a 4-byte signed
//! integer. Keys other than `columns`, `name` and `type` are ignored.
//!
//! Nothing ties a sidecar to the binary file it describes. Loading a sidecar
//! that belongs to a different file silently misreads columns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use schema::Schema;
//!
//! let schema = Schema::load("data.hty").unwrap();
//! let ordinal = schema.resolve("price").unwrap();
//! println!("price is column {}", ordinal);
//! ```

mod sidecar;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use sidecar::{extract_metadata, sidecar_path, SIDECAR_EXTENSION};

/// Declared type written for every column by this crate's producers.
pub const INT_TYPE: &str = "int";

/// Errors raised while loading, resolving or saving a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The sidecar is missing, unreadable, not valid JSON, or describes no
    /// columns.
    #[error("metadata unavailable for {}: {reason}", path.display())]
    MetadataUnavailable {
        /// Path of the sidecar that was consulted.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// No column carries the requested name.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// An I/O error while writing a sidecar.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A single column entry of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name; resolved by exact string match.
    pub name: String,
    /// Declared type from the sidecar. Never consulted by the engine.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl ColumnDescriptor {
    /// Creates an integer column descriptor.
    pub fn int<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(INT_TYPE.to_string()),
        }
    }
}

/// Ordered column catalog of an HTY table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Columns in physical order. Position == ordinal.
    pub columns: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Builds a schema from descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Builds an all-integer schema from column names, in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(ColumnDescriptor::int).collect(),
        }
    }

    /// Number of columns (and therefore values per row).
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema declares no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the descriptor at `ordinal`, if any.
    #[must_use]
    pub fn column(&self, ordinal: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(ordinal)
    }

    /// Column names in physical order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Resolves a column name to its ordinal.
    ///
    /// Matching is exact and the first match wins. Duplicate names are not
    /// rejected; later duplicates are simply unreachable by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ColumnNotFound`] if no column has this name.
    pub fn resolve(&self, name: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| SchemaError::ColumnNotFound(name.to_string()))
    }

    /// Resolves several names at once, preserving the caller's order.
    ///
    /// Fails on the first unknown name.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, SchemaError> {
        names.iter().map(|n| self.resolve(n.as_ref())).collect()
    }

    /// A row is valid iff it has exactly one value per column.
    #[must_use]
    pub fn validate(&self, row: &[i32]) -> bool {
        row.len() == self.columns.len()
    }

    /// Names that appear more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = Vec::new();
        for (i, col) in self.columns.iter().enumerate() {
            let seen_before = self.columns[..i].iter().any(|c| c.name == col.name);
            if seen_before && !dups.contains(&col.name.as_str()) {
                dups.push(&col.name);
            }
        }
        dups
    }
}
