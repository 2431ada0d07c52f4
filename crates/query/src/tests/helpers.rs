use crate::HtyTable;
use schema::Schema;
use std::path::Path;
use table::TableWriter;

/// Writes `rows` plus a sidecar for `names` at `dir/file`, then opens it.
pub fn make_table<R: AsRef<[i32]>>(dir: &Path, file: &str, names: &[&str], rows: &[R]) -> HtyTable {
    let path = dir.join(file);
    let schema = Schema::from_names(names.iter().copied());
    TableWriter::create(&path, &schema, rows).unwrap();
    schema.save(&path).unwrap();
    HtyTable::open(&path).unwrap()
}

/// The `[a, b, c]` table with rows `(1,2,3), (4,5,6), (7,8,9)`.
pub fn abc_table(dir: &Path) -> HtyTable {
    make_table(dir, "abc.hty", &["a", "b", "c"], &[[1, 2, 3], [4, 5, 6], [7, 8, 9]])
}
