/// Filtering: `filter()` and `project_and_filter()`.
///
/// The two operations select different things and are kept apart on purpose:
///
/// - `filter` is a **column-level** selection. It returns the values of the
///   filtered column that satisfy the predicate, and nothing else.
/// - `project_and_filter` is a **row-level** selection. It returns the
///   requested columns for every row whose filter column satisfies the
///   predicate, row-aligned and in source order.
use crate::{CompareOp, HtyTable, QueryError, ResultSet};

impl HtyTable {
    /// Returns the values of column `name` for which `value <op> literal`
    /// holds, in row order.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` if `name` is not in the schema.
    /// - `FileUnavailable` if the binary file cannot be opened.
    pub fn filter(&self, name: &str, op: CompareOp, literal: i32) -> Result<Vec<i32>, QueryError> {
        let values = self.project_single_column(name)?;
        let matched: Vec<i32> = values
            .into_iter()
            .filter(|&v| op.evaluate(v, literal))
            .collect();

        log::debug!("filter({} {} {}): {} matches", name, op, literal, matched.len());
        Ok(matched)
    }

    /// Returns the columns `names` for every row where
    /// `row[filter_name] <op> literal` holds.
    ///
    /// The filter column does not have to be among `names`; when it is not,
    /// it is evaluated but not returned. Output buffers are row-aligned and
    /// rows keep their original order.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` for an unknown name in `names` or `filter_name`.
    /// - `FileUnavailable` if the binary file cannot be opened.
    pub fn project_and_filter<S: AsRef<str>>(
        &self,
        names: &[S],
        filter_name: &str,
        op: CompareOp,
        literal: i32,
    ) -> Result<ResultSet, QueryError> {
        let ordinals = self.schema.resolve_all(names)?;
        let filter_ordinal = self.schema.resolve(filter_name)?;

        let rows = self.reader()?.scan_all()?;

        let mut result = ResultSet::with_names(names);
        for row in rows.iter().filter(|row| op.evaluate(row[filter_ordinal], literal)) {
            result.push_row(ordinals.iter().map(|&o| row[o]));
        }

        log::debug!(
            "project_and_filter(where {} {} {}): {} of {} rows",
            filter_name,
            op,
            literal,
            result.num_rows(),
            rows.len()
        );
        Ok(result)
    }
}
