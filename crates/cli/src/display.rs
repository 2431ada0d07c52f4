//! Console rendering of query results.
//!
//! Renderers only ever see successful results. A multi-column result is
//! shape-checked against the names it is displayed under before anything is
//! printed, so a malformed set produces an error instead of a garbled table.

use anyhow::Result;
use query::ResultSet;
use std::io::Write;

const SEPARATOR: &str = "----------------";

/// Prints one column as a numbered list.
///
/// ```text
/// Column: b
/// ----------------
/// Row 1: 2
/// Row 2: 5
/// ----------------
/// Total rows: 2
/// ```
pub fn render_column<W: Write>(out: &mut W, name: &str, values: &[i32]) -> Result<()> {
    writeln!(out, "Column: {}", name)?;
    writeln!(out, "{}", SEPARATOR)?;
    for (i, v) in values.iter().enumerate() {
        writeln!(out, "Row {}: {}", i + 1, v)?;
    }
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Total rows: {}", values.len())?;
    Ok(())
}

/// Prints a result set as a fixed-width table with `width` characters per
/// column. At most `max_rows` rows are printed when `max_rows > 0`; the total
/// always reports every row.
///
/// # Errors
///
/// Fails with a result-shape mismatch if `result` does not have exactly the
/// columns `names` with equal row counts.
pub fn render_result_set<W: Write, S: AsRef<str>>(
    out: &mut W,
    result: &ResultSet,
    names: &[S],
    width: usize,
    max_rows: usize,
) -> Result<()> {
    result.check_shape(names)?;

    let rule = "-".repeat(width * names.len());
    writeln!(out, "Result Set:")?;
    writeln!(out, "{}", rule)?;
    for name in names {
        write!(out, "{:<width$}", name.as_ref(), width = width)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", rule)?;

    let total = result.num_rows();
    let shown = if max_rows > 0 { total.min(max_rows) } else { total };
    for i in 0..shown {
        for col in result.columns() {
            write!(out, "{:<width$}", col.values[i], width = width)?;
        }
        writeln!(out)?;
    }
    if shown < total {
        writeln!(out, "... ({} more rows)", total - shown)?;
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "Total rows: {}", total)?;
    Ok(())
}
