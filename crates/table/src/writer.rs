use same_file::is_same_file;
use schema::Schema;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::format::{write_row, TableStats};
use crate::TableError;

/// Produces HTY files.
///
/// The writer is stateless: every method is a single self-contained file
/// operation. Existing files are never opened for writing except as a fresh
/// destination.
pub struct TableWriter {}

impl TableWriter {
    /// Checks that every row has exactly one value per schema column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowSizeMismatch`] for the first offending row.
    pub fn check_rows<R: AsRef<[i32]>>(schema: &Schema, rows: &[R]) -> Result<(), TableError> {
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if !schema.validate(row) {
                return Err(TableError::RowSizeMismatch {
                    row: i,
                    expected: schema.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Copy-on-write append: writes `dest` as a byte-for-byte copy of
    /// `source` followed by `rows`, leaving `source` untouched.
    ///
    /// # Steps
    ///
    /// 1. Validate the whole batch against `schema` (no I/O on failure).
    /// 2. Open `source` read-only.
    /// 3. Create/truncate `dest` and stream `source` into it.
    /// 4. Append each row's values in column order; flush and fsync.
    /// 5. Reopen `dest` to confirm it is accessible.
    ///
    /// No sidecar is written for `dest`; keeping one in sync is the caller's
    /// responsibility. If copying or appending fails, the partial `dest` is
    /// removed. The write is not atomic: a crash mid-way can still leave a
    /// partial `dest`, but never a damaged `source`.
    ///
    /// # Errors
    ///
    /// - [`TableError::RowSizeMismatch`] if any row has the wrong arity.
    /// - [`TableError::FileUnavailable`] if `source` cannot be read, `dest`
    ///   cannot be created or reopened, or `dest` is the same file as
    ///   `source` under any path, hard links included (it would be truncated
    ///   before being copied).
    /// - [`TableError::Io`] on a failure while copying or appending.
    pub fn append_rows<R: AsRef<[i32]>>(
        schema: &Schema,
        source: &Path,
        dest: &Path,
        rows: &[R],
    ) -> Result<TableStats, TableError> {
        Self::check_rows(schema, rows)?;

        let src_file = File::open(source).map_err(|e| TableError::unavailable(source, e))?;

        // a missing dest cannot be the source
        if is_same_file(source, dest).unwrap_or(false) {
            return Err(TableError::unavailable(
                dest,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "destination is the source file; appends must target a new path",
                ),
            ));
        }

        let mut copied = 0;
        write_fresh(dest, |out| {
            copied = io::copy(&mut BufReader::new(src_file), out)?;
            for row in rows {
                write_row(out, row.as_ref())?;
            }
            Ok(())
        })?;

        let stats = Self::verify(dest, schema.len())?;
        log::debug!(
            "appended {} rows: {} -> {} ({} bytes copied, {} rows total)",
            rows.len(),
            source.display(),
            dest.display(),
            copied,
            stats.row_count
        );
        Ok(stats)
    }

    /// Writes a new HTY file at `path` containing exactly `rows`.
    ///
    /// Any existing file at `path` is replaced. The same all-or-nothing arity
    /// check as [`append_rows`](TableWriter::append_rows) runs first.
    pub fn create<R: AsRef<[i32]>>(
        path: &Path,
        schema: &Schema,
        rows: &[R],
    ) -> Result<TableStats, TableError> {
        Self::check_rows(schema, rows)?;

        write_fresh(path, |out| {
            for row in rows {
                write_row(out, row.as_ref())?;
            }
            Ok(())
        })?;

        let stats = Self::verify(path, schema.len())?;
        log::debug!("created {} with {} rows", path.display(), stats.row_count);
        Ok(stats)
    }

    /// Reopens a freshly written file. Checks accessibility only, not content.
    fn verify(path: &Path, num_columns: usize) -> Result<TableStats, TableError> {
        let file = File::open(path).map_err(|e| TableError::unavailable(path, e))?;
        let len = file.metadata()?.len();
        Ok(TableStats::from_len(len, num_columns))
    }
}

/// Creates or truncates `path`, runs `body` against a buffered writer, then
/// flushes and fsyncs. On any failure after the file was opened, the partial
/// file is removed before the error is returned.
fn write_fresh<F>(path: &Path, body: F) -> Result<(), TableError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| TableError::unavailable(path, e))?;

    let mut out = BufWriter::new(file);
    let result = body(&mut out)
        .and_then(|()| out.flush())
        .and_then(|()| out.into_inner().map_err(|e| e.into_error()))
        .and_then(|file| file.sync_all());

    if let Err(e) = result {
        if let Err(rm) = fs::remove_file(path) {
            log::warn!("could not remove partial {}: {}", path.display(), rm);
        }
        return Err(e.into());
    }
    Ok(())
}
