/// Copy-on-write append: `add_row()`.
use std::path::Path;
use table::TableWriter;

use crate::{HtyTable, QueryError};

impl HtyTable {
    /// Writes a new table at `dest` holding this table's rows followed by
    /// `rows`, and returns a handle to it with the same schema.
    ///
    /// This table's file is only ever read. No sidecar is written for `dest`;
    /// call [`schema::Schema::save`] on the returned handle's schema if the
    /// new file should be openable with [`HtyTable::open`].
    ///
    /// # Errors
    ///
    /// - `RowSizeMismatch` if any row does not have one value per column;
    ///   checked for the whole batch before any I/O.
    /// - `FileUnavailable` if the source cannot be read, `dest` cannot be
    ///   created, or `dest` is this table's own file.
    pub fn add_row<P, R>(&self, dest: P, rows: &[R]) -> Result<HtyTable, QueryError>
    where
        P: AsRef<Path>,
        R: AsRef<[i32]>,
    {
        let dest = dest.as_ref();
        let stats = TableWriter::append_rows(&self.schema, &self.path, dest, rows)?;
        log::info!(
            "added {} rows to {} as {} ({} rows)",
            rows.len(),
            self.path.display(),
            dest.display(),
            stats.row_count
        );
        Ok(HtyTable::with_schema(dest, self.schema.clone()))
    }
}
