use crate::*;

fn col(name: &str, values: &[i32]) -> ResultColumn {
    ResultColumn {
        name: name.to_string(),
        values: values.to_vec(),
    }
}

#[test]
fn accessors() {
    let rs = ResultSet::new(vec![col("a", &[4, 7]), col("c", &[6, 9])]);
    assert_eq!(rs.width(), 2);
    assert_eq!(rs.num_rows(), 2);
    assert!(!rs.is_empty());
    assert_eq!(rs.names().collect::<Vec<_>>(), vec!["a", "c"]);
    assert_eq!(rs.column("c"), Some(&[6, 9][..]));
    assert_eq!(rs.column("b"), None);
    assert_eq!(rs.column_at(0), Some(&[4, 7][..]));
    assert_eq!(rs.row(1), Some(vec![7, 9]));
    assert_eq!(rs.row(2), None);
    assert_eq!(rs.into_values(), vec![vec![4, 7], vec![6, 9]]);
}

#[test]
fn empty_set_has_no_rows() {
    let rs = ResultSet::default();
    assert_eq!(rs.width(), 0);
    assert_eq!(rs.num_rows(), 0);
    assert!(rs.check_shape::<&str>(&[]).is_ok());
}

#[test]
fn check_shape_accepts_matching_names() {
    let rs = ResultSet::new(vec![col("a", &[1]), col("b", &[2])]);
    assert!(rs.check_shape(&["a", "b"]).is_ok());
}

#[test]
fn check_shape_rejects_wrong_width() {
    let rs = ResultSet::new(vec![col("a", &[1]), col("b", &[2])]);
    let err = rs.check_shape(&["a"]).unwrap_err();
    assert!(matches!(err, QueryError::ResultShapeMismatch(_)));
    assert!(err.to_string().contains("2 columns but 1 names"));
}

#[test]
fn check_shape_rejects_wrong_names() {
    let rs = ResultSet::new(vec![col("a", &[1]), col("b", &[2])]);
    assert!(matches!(
        rs.check_shape(&["b", "a"]),
        Err(QueryError::ResultShapeMismatch(_))
    ));
}

#[test]
fn check_shape_rejects_ragged_buffers() {
    let rs = ResultSet::new(vec![col("a", &[1, 2]), col("b", &[2])]);
    let err = rs.check_shape(&["a", "b"]).unwrap_err();
    assert!(err.to_string().contains("inconsistent row counts"));
}
