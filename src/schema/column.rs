use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

// Plain amounts ("699", "12.50") and thousands-grouped amounts
// ("1,299.99"), with an optional leading dollar sign.
static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?$").unwrap());

/// A coerced field value produced by column validation.
///
/// Serializes untagged, so a [`crate::Record`] renders as a flat JSON map:
/// strings as strings, numbers as numbers, `Empty` as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text, enumeration, URL and currency values keep their raw form.
    Text(String),
    /// Parsed integer value.
    Integer(i64),
    /// Parsed floating-point value.
    Float(f64),
    /// Parsed boolean value.
    Boolean(bool),
    /// An empty field of a non-required column without a default.
    Empty,
}

impl CellValue {
    /// Returns the textual form of the value, if it has one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The closed set of per-field validators a column can declare.
///
/// Each variant knows how to check one raw field and coerce it into a
/// [`CellValue`]. Dispatch is by variant; there are no user-supplied
/// validation callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// Any string, kept verbatim.
    Text,
    /// Base-10 integer, coerced to `i64`.
    Integer,
    /// Decimal number, coerced to `f64`.
    Float,
    /// `true`/`false` or `1`/`0`, case-insensitive.
    Boolean,
    /// Membership in a fixed list of allowed values.
    Enumeration(Vec<String>),
    /// Absolute URL with a host.
    Url,
    /// Monetary amount such as `699`, `12.50` or `$1,299.99`. Kept as text.
    Currency,
}

impl ColumnType {
    /// Checks `raw` against this column type and coerces it on success.
    ///
    /// The error string describes the violation and ends up as the `reason`
    /// of an [`crate::error::ErrorDetail::Field`] entry.
    pub fn validate_and_coerce(&self, raw: &str) -> Result<CellValue, String> {
        match self {
            ColumnType::Text => Ok(CellValue::Text(raw.to_string())),
            ColumnType::Integer => raw
                .parse::<i64>()
                .map(CellValue::Integer)
                .map_err(|_| format!("'{raw}' is not a valid integer")),
            ColumnType::Float => raw
                .parse::<f64>()
                .map(CellValue::Float)
                .map_err(|_| format!("'{raw}' is not a valid number")),
            ColumnType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(CellValue::Boolean(true)),
                "false" | "0" => Ok(CellValue::Boolean(false)),
                _ => Err(format!("'{raw}' is not a valid boolean")),
            },
            ColumnType::Enumeration(allowed) => {
                if allowed.iter().any(|value| value == raw) {
                    Ok(CellValue::Text(raw.to_string()))
                } else {
                    Err(format!("'{}' is not one of [{}]", raw, allowed.join(", ")))
                }
            }
            ColumnType::Url => match Url::parse(raw) {
                Ok(url) if url.has_host() => Ok(CellValue::Text(raw.to_string())),
                _ => Err(format!("'{raw}' is not a valid URL")),
            },
            ColumnType::Currency => {
                if CURRENCY_RE.is_match(raw) {
                    Ok(CellValue::Text(raw.to_string()))
                } else {
                    Err(format!("'{raw}' is not a valid currency amount"))
                }
            }
        }
    }
}

/// One column of a [`crate::Schema`]: a name, a [`ColumnType`] and its flags.
///
/// Built fluently:
///
/// ```
/// use strictcsv::{ColumnSpec, ColumnType};
///
/// let column = ColumnSpec::new("subcategory", ColumnType::Text)
///     .required(false)
///     .default_value("uncategorized");
///
/// assert_eq!(column.name(), "subcategory");
/// assert!(!column.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    name: String,
    kind: ColumnType,
    required: bool,
    default: Option<String>,
}

impl ColumnSpec {
    /// Creates a required column with no default.
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
        }
    }

    /// Sets whether an empty field is a validation error for this column.
    pub fn required(mut self, yes: bool) -> Self {
        self.required = yes;
        self
    }

    /// Sets the raw value substituted for an empty field. The default is
    /// coerced through the column type like any other field and is checked
    /// for validity when the schema is built.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The column name, unique within its schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column's validator.
    pub fn kind(&self) -> &ColumnType {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_coercion() {
        assert_eq!(
            ColumnType::Integer.validate_and_coerce("42"),
            Ok(CellValue::Integer(42))
        );
        assert_eq!(
            ColumnType::Integer.validate_and_coerce("-7"),
            Ok(CellValue::Integer(-7))
        );
        assert!(ColumnType::Integer.validate_and_coerce("42.5").is_err());
        assert!(ColumnType::Integer.validate_and_coerce("abc").is_err());
    }

    #[test]
    fn float_coercion() {
        assert_eq!(
            ColumnType::Float.validate_and_coerce("3.25"),
            Ok(CellValue::Float(3.25))
        );
        assert!(ColumnType::Float.validate_and_coerce("three").is_err());
    }

    #[test]
    fn boolean_coercion_is_case_insensitive() {
        assert_eq!(
            ColumnType::Boolean.validate_and_coerce("TRUE"),
            Ok(CellValue::Boolean(true))
        );
        assert_eq!(
            ColumnType::Boolean.validate_and_coerce("0"),
            Ok(CellValue::Boolean(false))
        );
        assert!(ColumnType::Boolean.validate_and_coerce("yes").is_err());
    }

    #[test]
    fn enumeration_checks_membership() {
        let kind = ColumnType::Enumeration(vec!["USD".to_string(), "EUR".to_string()]);
        assert_eq!(
            kind.validate_and_coerce("USD"),
            Ok(CellValue::Text("USD".to_string()))
        );
        let err = kind.validate_and_coerce("GBP").unwrap_err();
        assert!(err.contains("USD, EUR"));
    }

    #[test]
    fn url_requires_a_host() {
        assert!(
            ColumnType::Url
                .validate_and_coerce("http://apple.com/iphone")
                .is_ok()
        );
        assert!(ColumnType::Url.validate_and_coerce("not a url").is_err());
        assert!(ColumnType::Url.validate_and_coerce("mailto:x@y.z").is_err());
    }

    #[test]
    fn currency_shapes() {
        for ok in ["699", "12.50", "$1,299.99", "0.5"] {
            assert!(
                ColumnType::Currency.validate_and_coerce(ok).is_ok(),
                "{ok} should be accepted"
            );
        }
        for bad in ["12.345", "1,29", "USD 12", ""] {
            assert!(
                ColumnType::Currency.validate_and_coerce(bad).is_err(),
                "{bad} should be rejected"
            );
        }
    }
}
