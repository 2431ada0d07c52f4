//! # Config - Shell Settings
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! HTY_TABLE             table to open at startup      (default: none)
//! HTY_COLUMN_WIDTH      result column width in chars  (default: 20)
//! HTY_CSV_HEADER        first CSV line is a header    (default: "false")
//! HTY_MAX_DISPLAY_ROWS  rows printed per result       (default: 0 = all)
//! ```
//!
//! A value that does not parse falls back to its default, with a warning.

use std::path::PathBuf;

/// Default width of one rendered result column.
pub const DEFAULT_COLUMN_WIDTH: usize = 20;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTY file opened before the first prompt, if any.
    pub table: Option<PathBuf>,
    /// Characters per rendered column.
    pub column_width: usize,
    /// Whether `INGEST` treats the first CSV record as column names.
    pub csv_header: bool,
    /// Maximum rows printed per result; 0 prints everything.
    pub max_display_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: None,
            column_width: DEFAULT_COLUMN_WIDTH,
            csv_header: false,
            max_display_rows: 0,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Lets tests supply variables without touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let table = lookup("HTY_TABLE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let column_width = parse_or(&lookup, "HTY_COLUMN_WIDTH", defaults.column_width);
        Self {
            table,
            // a zero-width column would print nothing useful
            column_width: if column_width == 0 {
                DEFAULT_COLUMN_WIDTH
            } else {
                column_width
            },
            csv_header: parse_or(&lookup, "HTY_CSV_HEADER", defaults.csv_header),
            max_display_rows: parse_or(&lookup, "HTY_MAX_DISPLAY_ROWS", defaults.max_display_rows),
        }
    }
}

/// Parses variable `key`, falling back to `default` when unset or invalid.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("ignoring invalid {}={:?}; using default", key, raw);
                default
            }
        },
    }
}
