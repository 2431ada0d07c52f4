//! # hty - Interactive HTY Query Shell
//!
//! A REPL over HTY tables. Reads commands from stdin, runs them against the
//! currently open table, and prints results to stdout. Works interactively or
//! scripted (pipe commands via stdin). Failed commands print `ERR <reason>`
//! and the shell keeps going.
//!
//! ## Commands
//!
//! ```text
//! OPEN path                          Open an HTY file and its <path>.json sidecar
//! SCHEMA                             List columns with their ordinals
//! STATS                              File size, row count, trailing bytes
//! COLUMN name                        Print one column
//! PROJECT c1 c2 ...                  Print several columns as a table
//! FILTER col op value                Print the values of col matching the predicate
//! SELECT c1 c2 ... WHERE col op value
//!                                    Print the rows matching the predicate
//! INSERT dest v1 v2 ... [; v1 ...]   Copy the table to dest with rows appended
//! INGEST csv_path hty_path           Convert a CSV file and open the result
//! EXIT / QUIT                        Leave the shell
//! ```
//!
//! `op` is one of `= != < > <= >=`, a name (`eq`, `lt`, ...) or a numeric
//! code `0..=5`.
//!
//! ## Configuration
//!
//! See the `config` crate: `HTY_TABLE`, `HTY_COLUMN_WIDTH`, `HTY_CSV_HEADER`,
//! `HTY_MAX_DISPLAY_ROWS`. Log verbosity follows `RUST_LOG`.
//!
//! ## Example
//!
//! ```text
//! $ HTY_TABLE=abc.hty cargo run -p cli
//! hty shell (table=abc.hty, width=20)
//! > COLUMN b
//! Column: b
//! ----------------
//! Row 1: 2
//! Row 2: 5
//! ----------------
//! Total rows: 2
//! > EXIT
//! bye
//! ```

mod display;
mod shell;

use anyhow::Result;
use config::Config;
use shell::{Outcome, Shell, HELP};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let startup_table = config.table.clone();
    let width = config.column_width;
    let mut shell = Shell::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &startup_table {
        Some(path) => {
            writeln!(out, "hty shell (table={}, width={})", path.display(), width)?;
            if let Err(e) = shell.open(path) {
                writeln!(out, "ERR {:#}", e)?;
            }
        }
        None => writeln!(out, "hty shell (no table, width={})", width)?,
    }
    writeln!(out, "{}", HELP)?;
    write!(out, "> ")?;
    out.flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        match shell.execute(&line, &mut out) {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue) => {}
            Err(e) => writeln!(out, "ERR {:#}", e)?,
        }

        write!(out, "> ")?;
        out.flush().ok();
    }

    Ok(())
}
