use super::{abc_rows, encode};
use crate::*;
use anyhow::Result;
use schema::Schema;
use std::fs;
use tempfile::tempdir;

fn abc() -> Schema {
    Schema::from_names(["a", "b", "c"])
}

// -------------------- create --------------------

#[test]
fn create_writes_native_endian_rows() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("t.hty");

    let stats = TableWriter::create(&path, &abc(), &abc_rows())?;
    assert_eq!(stats.row_count, 3);
    assert_eq!(stats.file_len, 36);
    assert_eq!(fs::read(&path)?, encode(&abc_rows()));
    Ok(())
}

#[test]
fn create_with_no_rows_writes_empty_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("t.hty");
    let rows: Vec<Vec<i32>> = Vec::new();

    TableWriter::create(&path, &abc(), &rows)?;
    assert_eq!(fs::metadata(&path)?.len(), 0);
    Ok(())
}

#[test]
fn create_rejects_bad_arity_without_touching_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.hty");

    let err = TableWriter::create(&path, &abc(), &[vec![1, 2, 3], vec![4, 5]]).unwrap_err();
    assert!(matches!(
        err,
        TableError::RowSizeMismatch {
            row: 1,
            expected: 3,
            actual: 2
        }
    ));
    assert!(!path.exists());
}

// -------------------- append_rows --------------------

#[test]
fn append_copies_source_then_adds_rows() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    let dest = dir.path().join("dest.hty");
    TableWriter::create(&src, &abc(), &abc_rows())?;
    let before = fs::read(&src)?;

    let stats = TableWriter::append_rows(&abc(), &src, &dest, &[[10, 11, 12], [13, 14, 15]])?;
    assert_eq!(stats.row_count, 5);
    assert!(stats.is_aligned());

    // source untouched
    assert_eq!(fs::read(&src)?, before);

    let mut expected = abc_rows();
    expected.push(vec![10, 11, 12]);
    expected.push(vec![13, 14, 15]);
    let mut r = TableReader::open(&dest, 3)?;
    assert_eq!(r.scan_all()?, expected);
    assert_eq!(r.scan_column(0)?, vec![1, 4, 7, 10, 13]);
    Ok(())
}

#[test]
fn append_preserves_source_bytes_verbatim() -> Result<()> {
    // A source with trailing garbage is copied as-is; new rows follow it.
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    let dest = dir.path().join("dest.hty");
    let mut bytes = encode(&abc_rows());
    bytes.extend([0xFF, 0xEE]);
    fs::write(&src, &bytes)?;

    TableWriter::append_rows(&abc(), &src, &dest, &[[1, 1, 1]])?;

    let out = fs::read(&dest)?;
    assert_eq!(&out[..bytes.len()], bytes.as_slice());
    assert_eq!(&out[bytes.len()..], encode(&[[1, 1, 1]]).as_slice());
    Ok(())
}

#[test]
fn append_empty_batch_duplicates_source() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    let dest = dir.path().join("dest.hty");
    TableWriter::create(&src, &abc(), &abc_rows())?;

    let rows: Vec<Vec<i32>> = Vec::new();
    TableWriter::append_rows(&abc(), &src, &dest, &rows)?;
    assert_eq!(fs::read(&dest)?, fs::read(&src)?);
    Ok(())
}

#[test]
fn append_validates_whole_batch_before_io() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("missing.hty");
    let dest = dir.path().join("dest.hty");

    // Source does not exist, but arity is checked first.
    let err = TableWriter::append_rows(&abc(), &src, &dest, &[vec![1, 2, 3], vec![1, 2, 3, 4]])
        .unwrap_err();
    assert!(matches!(
        err,
        TableError::RowSizeMismatch {
            row: 1,
            expected: 3,
            actual: 4
        }
    ));
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn append_missing_source_is_unavailable() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("missing.hty");
    let dest = dir.path().join("dest.hty");

    let err = TableWriter::append_rows(&abc(), &src, &dest, &[[1, 2, 3]]).unwrap_err();
    assert!(matches!(err, TableError::FileUnavailable { ref path, .. } if *path == src));
    assert!(!dest.exists());
}

#[test]
fn append_refuses_to_overwrite_source() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    TableWriter::create(&src, &abc(), &abc_rows())?;
    let before = fs::read(&src)?;

    let err = TableWriter::append_rows(&abc(), &src, &src, &[[1, 2, 3]]).unwrap_err();
    assert!(matches!(err, TableError::FileUnavailable { .. }));
    assert_eq!(fs::read(&src)?, before);
    Ok(())
}

#[test]
fn append_refuses_hard_link_to_source() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    let link = dir.path().join("link.hty");
    TableWriter::create(&src, &abc(), &abc_rows())?;
    fs::hard_link(&src, &link)?;
    let before = fs::read(&src)?;

    let err = TableWriter::append_rows(&abc(), &src, &link, &[[1, 2, 3]]).unwrap_err();
    assert!(matches!(err, TableError::FileUnavailable { ref path, .. } if *path == link));
    assert_eq!(fs::read(&src)?, before);
    assert_eq!(TableReader::open(&src, 3)?.scan_all()?, abc_rows());
    Ok(())
}

#[cfg(unix)]
#[test]
fn append_failing_mid_copy_removes_partial_destination() -> Result<()> {
    // a directory opens fine on unix but fails on the first read
    let dir = tempdir()?;
    let src = dir.path().join("not-a-table");
    fs::create_dir(&src)?;
    let dest = dir.path().join("dest.hty");

    let err = TableWriter::append_rows(&abc(), &src, &dest, &[[1, 2, 3]]).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn append_unwritable_destination_is_unavailable() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("src.hty");
    TableWriter::create(&src, &abc(), &abc_rows())?;
    let dest = dir.path().join("no-such-dir").join("dest.hty");

    let err = TableWriter::append_rows(&abc(), &src, &dest, &[[1, 2, 3]]).unwrap_err();
    assert!(matches!(err, TableError::FileUnavailable { ref path, .. } if *path == dest));
    Ok(())
}
