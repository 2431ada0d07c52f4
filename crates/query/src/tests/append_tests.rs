use super::helpers::abc_table;
use crate::*;
use anyhow::Result;
use schema::Schema;
use std::fs;
use table::{TableError, TableReader};
use tempfile::tempdir;

#[test]
fn add_row_scenario() -> Result<()> {
    let dir = tempdir()?;
    let t = abc_table(dir.path());
    let dest = dir.path().join("abc2.hty");

    let t2 = t.add_row(&dest, &[[10, 11, 12]])?;
    assert_eq!(t2.path(), dest.as_path());
    assert_eq!(t2.project_single_column("a")?, vec![1, 4, 7, 10]);

    // original still reads as before
    assert_eq!(t.project_single_column("a")?, vec![1, 4, 7]);
    Ok(())
}

#[test]
fn add_row_dest_equals_source_plus_rows() -> Result<()> {
    let dir = tempdir()?;
    let t = abc_table(dir.path());
    let before = fs::read(t.path())?;
    let src_rows = TableReader::open(t.path(), 3)?.scan_all()?;

    let new_rows = vec![vec![-1, -2, -3], vec![0, 0, 0], vec![i32::MAX, i32::MIN, 42]];
    let dest = dir.path().join("out.hty");
    t.add_row(&dest, &new_rows)?;

    let mut expected = src_rows;
    expected.extend(new_rows);
    assert_eq!(TableReader::open(&dest, 3)?.scan_all()?, expected);
    assert_eq!(fs::read(t.path())?, before);
    Ok(())
}

#[test]
fn add_row_does_not_write_a_sidecar() -> Result<()> {
    let dir = tempdir()?;
    let t = abc_table(dir.path());
    let dest = dir.path().join("out.hty");
    t.add_row(&dest, &[[1, 2, 3]])?;

    assert!(!schema::sidecar_path(&dest).exists());
    assert!(HtyTable::open(&dest).is_err());

    // the caller can persist it explicitly
    t.schema().save(&dest)?;
    assert_eq!(HtyTable::open(&dest)?.schema(), &Schema::from_names(["a", "b", "c"]));
    Ok(())
}

#[test]
fn add_row_rejects_wrong_arity() -> Result<()> {
    let dir = tempdir()?;
    let t = abc_table(dir.path());
    let dest = dir.path().join("out.hty");

    let err = t.add_row(&dest, &[vec![1, 2, 3], vec![1, 2]]).unwrap_err();
    match err {
        QueryError::Table(TableError::RowSizeMismatch { expected, actual, .. }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected RowSizeMismatch, got {:?}", other),
    }
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn add_row_chained_appends() -> Result<()> {
    let dir = tempdir()?;
    let t = abc_table(dir.path());
    let t2 = t.add_row(dir.path().join("v2.hty"), &[[10, 11, 12]])?;
    let t3 = t2.add_row(dir.path().join("v3.hty"), &[[13, 14, 15]])?;

    assert_eq!(t3.project_single_column("c")?, vec![3, 6, 9, 12, 15]);
    assert_eq!(t2.stats()?.row_count, 4);
    assert_eq!(t.stats()?.row_count, 3);
    Ok(())
}
