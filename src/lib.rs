#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # strictcsv

 Schema-driven CSV validation and parsing. You declare the columns a file
 must have, with their names, order, and per-field types, and the reader
 turns every row into a validated [`Record`] or a structured error that
 names everything wrong with that row.

 ## Core concepts

 - **[`Schema`]:** an ordered list of [`ColumnSpec`]s. The order defines how
   positional fields map to names; each column carries a [`ColumnType`]
   validator plus `required`/default flags.
 - **[`SchemaReader`]:** a pull-based, forward-only reader built with
   [`SchemaReaderBuilder`]. It can skip leading non-data lines, consume a
   header, and then yields one [`Record`] per valid row.
 - **[`RowError`]:** everything wrong with one rejected row, as a map from
   error-kind tag to detail: [`ROW_LENGTH`] for a field-count mismatch,
   otherwise one entry per failing column. Row errors are recoverable: the
   caller may log them and keep pulling rows.

 ## Getting started

```rust
use strictcsv::{CellValue, ColumnSpec, ColumnType, Schema, SchemaReaderBuilder};

let schema = Schema::new(vec![
    ColumnSpec::new("title", ColumnType::Text),
    ColumnSpec::new("currency", ColumnType::Enumeration(vec![
        "USD".to_string(),
        "EUR".to_string(),
    ])),
    ColumnSpec::new("price", ColumnType::Currency),
    ColumnSpec::new("url", ColumnType::Url),
])
.unwrap();

let data = "\
title,currency,price,url
iPhone 5c blue,USD,699,http://apple.com/iphone
iPad mini,USD,329,http://apple.com/ipad
";

let reader = SchemaReaderBuilder::new(schema)
    .from_reader(data.as_bytes())
    .unwrap();

let iphone = reader.read().unwrap().unwrap();
assert_eq!(iphone.get("price"), Some(&CellValue::Text("699".to_string())));

let ipad = reader.read().unwrap().unwrap();
assert_eq!(ipad.get("title").unwrap().as_str(), Some("iPad mini"));

assert!(reader.read().unwrap().is_none());
```

 ## Error model

 Configuration problems, such as a malformed schema or a `skip_lines` count
 that overruns the input, fail while the reader is built, before any row is
 read. Row problems are per-row and recoverable: each read that hits a bad
 row returns [`Error::InvalidRow`], and the next read moves on. With
 `fail_fast(false)` the reader instead collects rejected rows (bounded by
 `max_failures`) and keeps yielding the valid ones.

 The reader never closes its input; the caller owns the stream and its
 lifetime.
 */

/// Error types for schema-validated reading.
pub mod error;

/// Schema-validating CSV readers.
pub mod reader;

/// The validated row type.
pub mod record;

/// Column and schema definitions.
pub mod schema;

#[doc(inline)]
pub use error::*;

pub use reader::schema_reader::{SchemaReader, SchemaReaderBuilder};
pub use record::Record;
pub use schema::{CellValue, ColumnSpec, ColumnType, Schema};
