mod writer_tests;

use std::io::Cursor;

use crate::TableReader;

/// Encodes rows the way the format stores them: native-endian `i32`s, row-major.
pub(crate) fn encode<R: AsRef<[i32]>>(rows: &[R]) -> Vec<u8> {
    rows.iter()
        .flat_map(|r| r.as_ref().iter().flat_map(|v| v.to_ne_bytes()).collect::<Vec<_>>())
        .collect()
}

pub(crate) fn cursor_reader(bytes: Vec<u8>, num_columns: usize) -> TableReader<Cursor<Vec<u8>>> {
    TableReader::from_reader(Cursor::new(bytes), num_columns)
}

pub(crate) fn abc_rows() -> Vec<Vec<i32>> {
    vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
}
