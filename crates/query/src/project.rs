/// Projection: `project_single_column()` and `project()`.
///
/// Names are resolved against the schema before the file is opened, so an
/// unknown column fails without any I/O. Single-column projection uses the
/// strided column scan; multi-column projection reads whole rows once and
/// fans each value out to every buffer that asked for it.
use crate::{HtyTable, QueryError, ResultSet};

impl HtyTable {
    /// Returns every value of column `name`, in row order.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` if `name` is not in the schema.
    /// - `FileUnavailable` if the binary file cannot be opened.
    pub fn project_single_column(&self, name: &str) -> Result<Vec<i32>, QueryError> {
        let ordinal = self.schema.resolve(name)?;
        let values = self.reader()?.scan_column(ordinal)?;
        log::debug!(
            "project_single_column({}) on {}: {} values",
            name,
            self.path.display(),
            values.len()
        );
        Ok(values)
    }

    /// Returns the columns `names`, row-aligned, in the order given.
    ///
    /// The order may differ from the physical order and a name may appear
    /// more than once; each occurrence gets its own buffer.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` for the first unknown name.
    /// - `FileUnavailable` if the binary file cannot be opened.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Result<ResultSet, QueryError> {
        let ordinals = self.schema.resolve_all(names)?;
        let rows = self.reader()?.scan_all()?;

        let mut result = ResultSet::with_names(names);
        for row in &rows {
            result.push_row(ordinals.iter().map(|&o| row[o]));
        }

        log::debug!(
            "project({} columns) on {}: {} rows",
            ordinals.len(),
            self.path.display(),
            result.num_rows()
        );
        Ok(result)
    }
}
