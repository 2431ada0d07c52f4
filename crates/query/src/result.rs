//! Result sets: named column buffers returned by multi-column queries.

use crate::QueryError;

/// One named column of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    /// Requested column name.
    pub name: String,
    /// Values, one per selected row.
    pub values: Vec<i32>,
}

/// An ordered sequence of named column buffers.
///
/// Sets built by the query pipeline are always row-aligned: every buffer has
/// the same length and index `i` refers to the same source row in each.
/// Sets built by hand through [`ResultSet::new`] carry no such guarantee;
/// [`check_shape`](ResultSet::check_shape) verifies it before display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    columns: Vec<ResultColumn>,
}

impl ResultSet {
    /// Wraps already-computed columns.
    pub fn new(columns: Vec<ResultColumn>) -> Self {
        Self { columns }
    }

    /// Empty buffers, one per name, in the given order.
    pub(crate) fn with_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            columns: names
                .iter()
                .map(|n| ResultColumn {
                    name: n.as_ref().to_string(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends one selected row. `values[i]` goes to column `i`.
    pub(crate) fn push_row<I: IntoIterator<Item = i32>>(&mut self, values: I) {
        for (col, v) in self.columns.iter_mut().zip(values) {
            col.values.push(v);
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the first buffer; 0 with no columns).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Column names, in result order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// All columns, in result order.
    #[must_use]
    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    /// Values of the first column called `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[i32]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Values of the column at position `index`.
    #[must_use]
    pub fn column_at(&self, index: usize) -> Option<&[i32]> {
        self.columns.get(index).map(|c| c.values.as_slice())
    }

    /// Row `index` across all columns, or `None` if any buffer is too short.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<i32>> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).copied())
            .collect()
    }

    /// Consumes the set, returning the raw buffers in result order.
    #[must_use]
    pub fn into_values(self) -> Vec<Vec<i32>> {
        self.columns.into_iter().map(|c| c.values).collect()
    }

    /// Checks that this set has exactly the columns `names`, in order, and
    /// that every buffer has the same length.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ResultShapeMismatch`] describing the first
    /// inconsistency found.
    pub fn check_shape<S: AsRef<str>>(&self, names: &[S]) -> Result<(), QueryError> {
        if names.len() != self.columns.len() {
            return Err(QueryError::ResultShapeMismatch(format!(
                "result set has {} columns but {} names were given",
                self.columns.len(),
                names.len()
            )));
        }

        for (i, (name, col)) in names.iter().zip(&self.columns).enumerate() {
            if name.as_ref() != col.name {
                return Err(QueryError::ResultShapeMismatch(format!(
                    "column {} is '{}' but '{}' was expected",
                    i,
                    col.name,
                    name.as_ref()
                )));
            }
        }

        let rows = self.num_rows();
        if let Some(ragged) = self.columns.iter().find(|c| c.values.len() != rows) {
            return Err(QueryError::ResultShapeMismatch(format!(
                "inconsistent row counts: column '{}' has {} rows, expected {}",
                ragged.name,
                ragged.values.len(),
                rows
            )));
        }

        Ok(())
    }
}
