use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Key under which a structural field-count mismatch is recorded in
/// [`RowError::errors`]. All other keys in that map are column names.
pub const ROW_LENGTH: &str = "row_length";

#[derive(Error, Debug)]
/// Reader error
pub enum Error {
    /// Invalid reader or schema configuration. Fatal: raised synchronously
    /// while the reader is being built, never during iteration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// One row failed structural or per-field validation. Recoverable: the
    /// reader stays usable and the next read moves on to the following row.
    #[error("{0}")]
    InvalidRow(RowError),

    /// A collecting reader (`fail_fast(false)`) went past its failure budget.
    #[error("{failures} invalid rows exceed the limit of {limit}")]
    TooManyFailures {
        /// Number of rows rejected so far.
        failures: usize,
        /// Configured `max_failures` value.
        limit: usize,
    },

    /// The underlying CSV tokenizer rejected the input (e.g. invalid UTF-8).
    #[error("csv parse error: {0}")]
    Parse(String),
}

impl From<RowError> for Error {
    fn from(err: RowError) -> Self {
        Error::InvalidRow(err)
    }
}

/// Everything that was wrong with a single rejected row.
///
/// The `errors` map goes from an error-kind tag to its detail. A row with the
/// wrong number of fields produces a single entry under [`ROW_LENGTH`];
/// otherwise each failing field produces one entry keyed by its column name.
/// The two kinds never appear together: a length mismatch suppresses field
/// checks for that row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number of the row within the original input stream,
    /// counting skipped lines and the header.
    pub line: u64,
    /// Raw fields of the rejected row, as tokenized.
    pub row: Vec<String>,
    /// Error-kind tag to detail.
    pub errors: BTreeMap<String, ErrorDetail>,
}

impl RowError {
    /// Returns true if the row was rejected for the given kind,
    /// either [`ROW_LENGTH`] or a column name.
    pub fn contains(&self, kind: &str) -> bool {
        self.errors.contains_key(kind)
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid row at line {}: ", self.line)?;
        match serde_json::to_string(&self.errors) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{:?}", self.errors),
        }
    }
}

/// Detail attached to one entry of a [`RowError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// The row's field count did not match the schema's column count.
    RowLength {
        /// Number of columns the schema declares.
        expected: usize,
        /// Number of fields the row actually had.
        actual: usize,
    },
    /// One field failed its column's validation.
    Field {
        /// The raw field value as read.
        value: String,
        /// Human-readable description of the violation.
        reason: String,
    },
}
