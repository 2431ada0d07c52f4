//! Command interpreter for the interactive shell.
//!
//! One [`Shell`] holds the currently open table and executes one command line
//! at a time, writing its output to any `Write`. Keeping it separate from the
//! stdin loop lets tests drive it with in-memory buffers.

use anyhow::{anyhow, bail, Context, Result};
use config::Config;
use ingest::{convert_csv_to_hty, IngestOptions};
use query::{CompareOp, HtyTable};
use std::io::Write;
use std::path::Path;

use crate::display::{render_column, render_result_set};

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

pub const HELP: &str = "\
Commands: OPEN path | SCHEMA | STATS | COLUMN name | PROJECT c1 c2 ...
          FILTER col op value | SELECT c1 c2 ... WHERE col op value
          INSERT dest v1 v2 ... [; v1 v2 ...] | INGEST csv hty | HELP | EXIT";

pub struct Shell {
    config: Config,
    table: Option<HtyTable>,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: None,
        }
    }

    /// Opens `path` (and its sidecar) as the current table.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<&HtyTable> {
        let table = HtyTable::open(path.as_ref())?;
        log::info!(
            "opened {} ({} columns)",
            table.path().display(),
            table.schema().len()
        );
        Ok(&*self.table.insert(table))
    }

    fn current(&self) -> Result<&HtyTable> {
        self.table
            .as_ref()
            .ok_or_else(|| anyhow!("no table open (use OPEN path)"))
    }

    /// Executes one command line. Blank lines are ignored.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Outcome> {
        let mut parts = line.split_whitespace();
        let cmd = match parts.next() {
            Some(c) => c.to_uppercase(),
            None => return Ok(Outcome::Continue),
        };
        let args: Vec<&str> = parts.collect();

        match cmd.as_str() {
            "OPEN" => {
                let [path] = args.as_slice() else {
                    bail!("usage: OPEN path");
                };
                let table = self.open(path)?;
                writeln!(
                    out,
                    "OK ({} columns: {})",
                    table.schema().len(),
                    table.schema().column_names().collect::<Vec<_>>().join(", ")
                )?;
            }
            "SCHEMA" => {
                let table = self.current()?;
                for (ordinal, col) in table.schema().columns.iter().enumerate() {
                    let ty = col.declared_type.as_deref().unwrap_or("int");
                    writeln!(out, "{}: {} ({})", ordinal, col.name, ty)?;
                }
            }
            "STATS" => {
                let table = self.current()?;
                let stats = table.stats()?;
                writeln!(
                    out,
                    "file={} bytes={} columns={} rows={} trailing_bytes={}",
                    table.path().display(),
                    stats.file_len,
                    stats.num_columns,
                    stats.row_count,
                    stats.trailing_bytes
                )?;
            }
            "COLUMN" => {
                let [name] = args.as_slice() else {
                    bail!("usage: COLUMN name");
                };
                let values = self.current()?.project_single_column(name)?;
                render_column(out, name, &values)?;
            }
            "PROJECT" => {
                if args.is_empty() {
                    bail!("usage: PROJECT c1 c2 ...");
                }
                let result = self.current()?.project(&args)?;
                render_result_set(
                    out,
                    &result,
                    &args,
                    self.config.column_width,
                    self.config.max_display_rows,
                )?;
            }
            "FILTER" => {
                let [name, op, value] = args.as_slice() else {
                    bail!("usage: FILTER col op value");
                };
                let op: CompareOp = op.parse()?;
                let literal = parse_int(value)?;
                let values = self.current()?.filter(name, op, literal)?;
                render_column(out, name, &values)?;
            }
            "SELECT" => {
                let where_pos = args
                    .iter()
                    .position(|a| a.eq_ignore_ascii_case("WHERE"))
                    .ok_or_else(|| anyhow!("usage: SELECT c1 c2 ... WHERE col op value"))?;
                let (names, predicate) = (&args[..where_pos], &args[where_pos + 1..]);
                let [filter_name, op, value] = predicate else {
                    bail!("usage: SELECT c1 c2 ... WHERE col op value");
                };
                if names.is_empty() {
                    bail!("usage: SELECT c1 c2 ... WHERE col op value");
                }
                let op: CompareOp = op.parse()?;
                let literal = parse_int(value)?;
                let result = self
                    .current()?
                    .project_and_filter(names, filter_name, op, literal)?;
                render_result_set(
                    out,
                    &result,
                    names,
                    self.config.column_width,
                    self.config.max_display_rows,
                )?;
            }
            "INSERT" => {
                let Some((dest, values)) = args.split_first() else {
                    bail!("usage: INSERT dest v1 v2 ... [; v1 v2 ...]");
                };
                let rows = parse_rows(values)?;
                if rows.is_empty() {
                    bail!("usage: INSERT dest v1 v2 ... [; v1 v2 ...]");
                }
                let table = self.current()?;
                let written = table.add_row(dest, &rows)?;
                written
                    .schema()
                    .save(written.path())
                    .with_context(|| format!("rows written but sidecar for {} failed", dest))?;
                let stats = written.stats()?;
                writeln!(
                    out,
                    "OK ({} rows appended, {} has {} rows)",
                    rows.len(),
                    dest,
                    stats.row_count
                )?;
            }
            "INGEST" => {
                let [csv_path, hty_path] = args.as_slice() else {
                    bail!("usage: INGEST csv_path hty_path");
                };
                let options = IngestOptions {
                    has_header: self.config.csv_header,
                    ..IngestOptions::default()
                };
                let summary = convert_csv_to_hty(csv_path, hty_path, &options)?;
                self.open(hty_path)?;
                writeln!(
                    out,
                    "OK ({} rows x {} columns)",
                    summary.rows, summary.columns
                )?;
            }
            "HELP" => {
                writeln!(out, "{}", HELP)?;
            }
            "EXIT" | "QUIT" => {
                writeln!(out, "bye")?;
                return Ok(Outcome::Exit);
            }
            other => {
                writeln!(out, "unknown command: {}", other)?;
            }
        }

        Ok(Outcome::Continue)
    }
}

fn parse_int(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .with_context(|| format!("invalid integer '{}'", s))
}

/// Parses `v v v ; v v v ; ...` into rows. Empty groups are skipped.
///
/// `;` may stand alone or be attached to a value (`1 2 3; 4 5 6`).
fn parse_rows(tokens: &[&str]) -> Result<Vec<Vec<i32>>> {
    let joined = tokens.join(" ");
    joined
        .split(';')
        .map(|group| {
            group
                .split_whitespace()
                .map(parse_int)
                .collect::<Result<Vec<i32>>>()
        })
        .filter(|row| !matches!(row, Ok(r) if r.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::Schema;
    use std::fs;
    use table::TableWriter;
    use tempfile::tempdir;

    fn run(shell: &mut Shell, line: &str) -> Result<String> {
        let mut buf = Vec::new();
        shell.execute(line, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn abc_shell(dir: &Path) -> Shell {
        let path = dir.join("abc.hty");
        let schema = Schema::from_names(["a", "b", "c"]);
        TableWriter::create(&path, &schema, &[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        schema.save(&path).unwrap();

        let mut shell = Shell::new(Config::default());
        shell.open(&path).unwrap();
        shell
    }

    #[test]
    fn parse_rows_groups_on_semicolons() {
        assert_eq!(
            parse_rows(&["1", "2", ";", "3", "4"]).unwrap(),
            vec![vec![1, 2], vec![3, 4]]
        );
        assert_eq!(
            parse_rows(&["1", "2;", "3", "4;"]).unwrap(),
            vec![vec![1, 2], vec![3, 4]]
        );
        assert!(parse_rows(&["1", "x"]).is_err());
        assert!(parse_rows(&[]).unwrap().is_empty());
    }

    #[test]
    fn commands_need_an_open_table() {
        let mut shell = Shell::new(Config::default());
        let err = run(&mut shell, "COLUMN a").unwrap_err();
        assert!(err.to_string().contains("no table open"));
    }

    #[test]
    fn column_and_filter() {
        let dir = tempdir().unwrap();
        let mut shell = abc_shell(dir.path());

        let out = run(&mut shell, "column b").unwrap();
        assert!(out.contains("Row 3: 8"));

        let out = run(&mut shell, "FILTER a > 3").unwrap();
        assert!(out.contains("Row 1: 4"));
        assert!(out.contains("Row 2: 7"));
        assert!(out.contains("Total rows: 2"));

        let out = run(&mut shell, "FILTER a 3 3").unwrap();
        assert!(out.contains("Total rows: 2"));
    }

    #[test]
    fn select_where() {
        let dir = tempdir().unwrap();
        let mut shell = abc_shell(dir.path());
        let out = run(&mut shell, "SELECT a c WHERE a > 3").unwrap();
        assert!(out.contains("Total rows: 2"));
        assert!(out.lines().any(|l| l.split_whitespace().collect::<Vec<_>>() == ["7", "9"]));
    }

    #[test]
    fn errors_are_typed_messages() {
        let dir = tempdir().unwrap();
        let mut shell = abc_shell(dir.path());
        assert!(run(&mut shell, "COLUMN zz")
            .unwrap_err()
            .to_string()
            .contains("column not found: zz"));
        assert!(run(&mut shell, "FILTER a ~ 3")
            .unwrap_err()
            .to_string()
            .contains("invalid operator"));
        assert!(run(&mut shell, "FILTER a > x").is_err());
        assert!(run(&mut shell, "SELECT a b").is_err());
    }

    #[test]
    fn insert_writes_new_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let mut shell = abc_shell(dir.path());
        let dest = dir.path().join("abc2.hty");
        let before = fs::read(dir.path().join("abc.hty")).unwrap();

        let out = run(&mut shell, &format!("INSERT {} 10 11 12", dest.display())).unwrap();
        assert!(out.contains("1 rows appended"));
        assert!(out.contains("has 4 rows"));
        assert_eq!(fs::read(dir.path().join("abc.hty")).unwrap(), before);

        run(&mut shell, &format!("OPEN {}", dest.display())).unwrap();
        let out = run(&mut shell, "COLUMN a").unwrap();
        assert!(out.contains("Row 4: 10"));
    }

    #[test]
    fn insert_wrong_arity_fails() {
        let dir = tempdir().unwrap();
        let mut shell = abc_shell(dir.path());
        let dest = dir.path().join("bad.hty");
        let err = run(&mut shell, &format!("INSERT {} 1 2 3 ; 4 5", dest.display())).unwrap_err();
        assert!(err.to_string().contains("invalid row size"));
        assert!(!dest.exists());
    }

    #[test]
    fn exit_and_unknown() {
        let mut shell = Shell::new(Config::default());
        let mut buf = Vec::new();
        assert_eq!(shell.execute("", &mut buf).unwrap(), Outcome::Continue);
        assert_eq!(shell.execute("FROB", &mut buf).unwrap(), Outcome::Continue);
        assert_eq!(shell.execute("quit", &mut buf).unwrap(), Outcome::Exit);
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("unknown command: FROB"));
        assert!(s.ends_with("bye\n"));
    }
}
