//! HTY binary format constants and value read/write helpers.
//!
//! ```text
//! offset(r, c) = (r * num_columns + c) * VALUE_BYTES
//! stride       = num_columns * VALUE_BYTES
//! rows         = file_len / stride          (remainder is ignored)
//! ```
//!
//! Values are `i32` in native byte order, so a file is only portable between
//! machines of the same endianness.

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Size of one stored value in bytes.
pub const VALUE_BYTES: u64 = 4;

/// Bytes occupied by one complete row of `num_columns` values.
#[must_use]
pub fn row_stride(num_columns: usize) -> u64 {
    num_columns as u64 * VALUE_BYTES
}

/// Byte offset of value `(row, ordinal)` in a table of `num_columns` columns.
#[must_use]
pub fn value_offset(row: u64, ordinal: usize, num_columns: usize) -> u64 {
    (row * num_columns as u64 + ordinal as u64) * VALUE_BYTES
}

/// Reads one value, returning `Ok(None)` if fewer than 4 bytes remain.
///
/// A short read at the end of the data is not an error: it is how scans
/// detect the end of the table (including a truncated trailing row).
pub(crate) fn read_value<R: Read>(r: &mut R) -> io::Result<Option<i32>> {
    match r.read_i32::<NativeEndian>() {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes one row of values in ordinal order.
pub(crate) fn write_row<W: Write>(w: &mut W, row: &[i32]) -> io::Result<()> {
    for &v in row {
        w.write_i32::<NativeEndian>(v)?;
    }
    Ok(())
}

/// Layout of an HTY file as implied by its length and column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Total file length in bytes.
    pub file_len: u64,
    /// Columns per row, from the schema.
    pub num_columns: usize,
    /// Complete rows in the file.
    pub row_count: u64,
    /// Bytes past the last complete row. Non-zero means the file is
    /// malformed (truncated or paired with the wrong schema).
    pub trailing_bytes: u64,
}

impl TableStats {
    /// Derives the layout of a `file_len`-byte file with `num_columns` columns.
    #[must_use]
    pub fn from_len(file_len: u64, num_columns: usize) -> Self {
        let stride = row_stride(num_columns);
        let (row_count, trailing_bytes) = if stride == 0 {
            (0, file_len)
        } else {
            (file_len / stride, file_len % stride)
        };
        Self {
            file_len,
            num_columns,
            row_count,
            trailing_bytes,
        }
    }

    /// Returns `true` if the file length is an exact multiple of the stride.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.trailing_bytes == 0
    }
}
