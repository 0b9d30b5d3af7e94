use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::CellValue;

/// One validated, parsed CSV row: a column-name to value mapping that
/// preserves schema order.
///
/// A record always carries exactly one entry per schema column. It is owned
/// by the caller once yielded; the reader keeps no reference to it.
///
/// Records serialize as maps, so they can be handed straight to serde-based
/// sinks:
///
/// ```
/// use strictcsv::{CellValue, Record};
///
/// let mut record = Record::with_capacity(2);
/// record.push("name".to_string(), CellValue::Text("Alice".to_string()));
/// record.push("age".to_string(), CellValue::Integer(30));
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["name"], "Alice");
/// assert_eq!(json["age"], 30);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Creates an empty record sized for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a column value. Columns are pushed in schema order.
    pub fn push(&mut self, name: String, value: CellValue) {
        self.fields.push((name, value));
    }

    /// Looks a value up by column name.
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Number of columns in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
