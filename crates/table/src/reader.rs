use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::format::{read_value, row_stride, value_offset, TableStats, VALUE_BYTES};
use crate::{Row, TableError};

/// Reads values out of an HTY table.
///
/// The reader knows only the column count; name resolution is the caller's
/// job. It is generic over any `Read + Seek` source so tests can scan an
/// in-memory `Cursor<Vec<u8>>` the same way as a file.
///
/// Both scan methods read only **complete rows**: bytes past the last full
/// row are never returned, so a single-column scan and a whole-row scan of
/// the same file always agree on the row count.
pub struct TableReader<R: Read + Seek> {
    rdr: BufReader<R>,
    num_columns: usize,
    /// Path on disk, when opened from a file (kept for diagnostics).
    path: Option<PathBuf>,
}

impl TableReader<File> {
    /// Opens an HTY file for reading with `num_columns` values per row.
    ///
    /// Logs a warning if the file length is not a multiple of the row stride;
    /// the trailing bytes are ignored by every scan.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FileUnavailable`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, num_columns: usize) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TableError::unavailable(path, e))?;

        let mut reader = TableReader {
            rdr: BufReader::new(file),
            num_columns,
            path: Some(path.to_path_buf()),
        };

        let stats = reader.stats()?;
        if !stats.is_aligned() {
            log::warn!(
                "{}: {} trailing bytes after {} complete rows (stride {}); ignoring them",
                path.display(),
                stats.trailing_bytes,
                stats.row_count,
                row_stride(num_columns)
            );
        }
        log::debug!(
            "opened {} ({} bytes, {} columns, {} rows)",
            path.display(),
            stats.file_len,
            num_columns,
            stats.row_count
        );

        Ok(reader)
    }
}

impl<R: Read + Seek> TableReader<R> {
    /// Wraps any seekable source holding HTY rows.
    pub fn from_reader(reader: R, num_columns: usize) -> Self {
        TableReader {
            rdr: BufReader::new(reader),
            num_columns,
            path: None,
        }
    }

    /// Columns per row.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Path the reader was opened from, if it was opened from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Layout implied by the current source length.
    pub fn stats(&mut self) -> Result<TableStats, TableError> {
        let len = self.rdr.seek(SeekFrom::End(0))?;
        Ok(TableStats::from_len(len, self.num_columns))
    }

    /// Reads every value of column `ordinal`, top to bottom.
    ///
    /// Seeks to the column's slot in row 0, reads one value, then skips the
    /// rest of the row to land on the same slot in the next row. The scan
    /// stops at the last complete row, or earlier if a read comes up short
    /// (the source shrank underneath us); neither case is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OrdinalOutOfRange`] for an ordinal outside
    /// `0..num_columns`, or [`TableError::Io`] on any other read failure.
    pub fn scan_column(&mut self, ordinal: usize) -> Result<Vec<i32>, TableError> {
        if ordinal >= self.num_columns {
            return Err(TableError::OrdinalOutOfRange {
                ordinal,
                num_columns: self.num_columns,
            });
        }

        let rows = self.stats()?.row_count;
        let skip = (row_stride(self.num_columns) - VALUE_BYTES) as i64;

        self.rdr
            .seek(SeekFrom::Start(value_offset(0, ordinal, self.num_columns)))?;

        let mut out = Vec::with_capacity(rows as usize);
        while (out.len() as u64) < rows {
            match read_value(&mut self.rdr)? {
                Some(v) => out.push(v),
                None => break,
            }
            if skip > 0 {
                self.rdr.seek_relative(skip)?;
            }
        }

        log::debug!("scan_column(ordinal={}) read {} values", ordinal, out.len());
        Ok(out)
    }

    /// Reads every complete row in file order.
    ///
    /// A row is read atomically: if any of its values cannot be read in full,
    /// the whole row is dropped and the scan ends. Each returned row has
    /// exactly `num_columns` values.
    pub fn scan_all(&mut self) -> Result<Vec<Row>, TableError> {
        let rows = self.stats()?.row_count;
        self.rdr.seek(SeekFrom::Start(0))?;

        let mut out = Vec::with_capacity(rows as usize);
        while (out.len() as u64) < rows {
            match self.read_row()? {
                Some(row) => out.push(row),
                None => break,
            }
        }

        log::debug!("scan_all read {} rows of {} columns", out.len(), self.num_columns);
        Ok(out)
    }

    /// Reads the next row at the current position, or `None` if it is
    /// incomplete.
    fn read_row(&mut self) -> Result<Option<Row>, TableError> {
        let mut row = Vec::with_capacity(self.num_columns);
        for _ in 0..self.num_columns {
            match read_value(&mut self.rdr)? {
                Some(v) => row.push(v),
                None => return Ok(None),
            }
        }
        Ok(Some(row))
    }
}
