//! Comparison operators used by `filter` and `project_and_filter`.
//!
//! Each operator has a stable integer code, which is how callers outside Rust
//! (and the shell) name them:
//!
//! | Code | Operator | Symbol |
//! |------|----------|--------|
//! | 0    | `Eq`     | `=`    |
//! | 1    | `Ne`     | `!=`   |
//! | 2    | `Lt`     | `<`    |
//! | 3    | `Gt`     | `>`    |
//! | 4    | `Le`     | `<=`   |
//! | 5    | `Ge`     | `>=`   |

use std::fmt;
use std::str::FromStr;

use crate::QueryError;

/// A comparison between a column value (the subject) and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// All operators, in code order.
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Gt,
        CompareOp::Le,
        CompareOp::Ge,
    ];

    /// Maps a stable operator code to an operator.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidOperator`] for any code outside `0..=5`.
    pub fn from_code(code: i32) -> Result<Self, QueryError> {
        match code {
            0 => Ok(CompareOp::Eq),
            1 => Ok(CompareOp::Ne),
            2 => Ok(CompareOp::Lt),
            3 => Ok(CompareOp::Gt),
            4 => Ok(CompareOp::Le),
            5 => Ok(CompareOp::Ge),
            other => Err(QueryError::InvalidOperator(format!("code {}", other))),
        }
    }

    /// The operator's stable code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            CompareOp::Eq => 0,
            CompareOp::Ne => 1,
            CompareOp::Lt => 2,
            CompareOp::Gt => 3,
            CompareOp::Le => 4,
            CompareOp::Ge => 5,
        }
    }

    /// The operator's conventional symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    /// Evaluates `subject <op> literal`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, subject: i32, literal: i32) -> bool {
        match self {
            CompareOp::Eq => subject == literal,
            CompareOp::Ne => subject != literal,
            CompareOp::Lt => subject < literal,
            CompareOp::Gt => subject > literal,
            CompareOp::Le => subject <= literal,
            CompareOp::Ge => subject >= literal,
        }
    }
}

impl TryFrom<i32> for CompareOp {
    type Error = QueryError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        CompareOp::from_code(code)
    }
}

/// Parses a numeric code, a symbol, or a short name (`eq`, `ge`, ...).
impl FromStr for CompareOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return CompareOp::from_code(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Ok(CompareOp::Eq),
            "!=" | "<>" | "ne" => Ok(CompareOp::Ne),
            "<" | "lt" => Ok(CompareOp::Lt),
            ">" | "gt" => Ok(CompareOp::Gt),
            "<=" | "le" => Ok(CompareOp::Le),
            ">=" | "ge" => Ok(CompareOp::Ge),
            _ => Err(QueryError::InvalidOperator(format!("'{}'", s))),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
