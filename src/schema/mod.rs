//! Column schema definitions.
//!
//! A [`Schema`] is an ordered list of [`ColumnSpec`]s. The ordering is what
//! maps positional CSV fields to column names, whether or not the input
//! carries a header line. Schema construction validates the definition
//! itself; readers assume a [`Schema`] value is well-formed.

use std::collections::HashSet;

use crate::error::Error;

mod column;

pub use column::{CellValue, ColumnSpec, ColumnType};

/// An ordered, validated set of column specifications.
///
/// # Examples
///
/// ```
/// use strictcsv::{ColumnSpec, ColumnType, Schema};
///
/// let schema = Schema::new(vec![
///     ColumnSpec::new("name", ColumnType::Text),
///     ColumnSpec::new("age", ColumnType::Integer),
/// ])
/// .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.columns()[1].name(), "age");
/// ```
///
/// Malformed definitions are rejected up front:
///
/// ```
/// use strictcsv::{ColumnSpec, ColumnType, Schema};
///
/// let result = Schema::new(vec![
///     ColumnSpec::new("name", ColumnType::Text),
///     ColumnSpec::new("name", ColumnType::Text),
/// ]);
/// assert!(result.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Validates the column definitions and builds a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the list is empty, a column name
    /// is empty or duplicated, or a declared default value does not pass its
    /// own column's validation.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, Error> {
        if columns.is_empty() {
            return Err(Error::Configuration(
                "schema must declare at least one column".to_string(),
            ));
        }

        let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
        for spec in &columns {
            if spec.name().is_empty() {
                return Err(Error::Configuration(
                    "column names must not be empty".to_string(),
                ));
            }
            if !seen.insert(spec.name().to_string()) {
                return Err(Error::Configuration(format!(
                    "duplicate column name '{}'",
                    spec.name()
                )));
            }
            if let Some(default) = spec.default() {
                spec.kind().validate_and_coerce(default).map_err(|reason| {
                    Error::Configuration(format!(
                        "default for column '{}' is invalid: {reason}",
                        spec.name()
                    ))
                })?;
            }
        }

        Ok(Self { columns })
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Iterates the columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }
}
