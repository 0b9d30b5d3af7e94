#![allow(dead_code)]

use strictcsv::{CellValue, ColumnSpec, ColumnType, Record, Schema};

pub const CATALOG_HEADER: &str = "title,category,subcategory,currency,price,url,image_url";

pub const PHONE_ROW: &str =
    "iPhone 5c blue,Smartphones,Apple,USD,699,http://apple.com/iphone,http://apple.com/iphone.jpg";

pub const TABLET_ROW: &str =
    "iPad mini,Tablets,Apple,USD,329,http://apple.com/ipad,http://apple.com/ipad.jpg";

/// PHONE_ROW with its last field dropped: one field short of the schema.
pub const SHORT_ROW: &str =
    "iPhone 5c blue,Smartphones,Apple,USD,699,http://apple.com/iphone";

/// A seven-column product-catalog schema exercising most column types.
pub fn catalog_schema() -> Schema {
    Schema::new(vec![
        ColumnSpec::new("title", ColumnType::Text),
        ColumnSpec::new(
            "category",
            ColumnType::Enumeration(vec!["Smartphones".to_string(), "Tablets".to_string()]),
        ),
        ColumnSpec::new("subcategory", ColumnType::Text).required(false),
        ColumnSpec::new(
            "currency",
            ColumnType::Enumeration(vec!["USD".to_string(), "EUR".to_string()]),
        ),
        ColumnSpec::new("price", ColumnType::Currency),
        ColumnSpec::new("url", ColumnType::Url),
        ColumnSpec::new("image_url", ColumnType::Url),
    ])
    .expect("catalog schema is valid")
}

pub fn phone_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "iPhone 5c blue"),
        ("category", "Smartphones"),
        ("subcategory", "Apple"),
        ("currency", "USD"),
        ("price", "699"),
        ("url", "http://apple.com/iphone"),
        ("image_url", "http://apple.com/iphone.jpg"),
    ]
}

pub fn tablet_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "iPad mini"),
        ("category", "Tablets"),
        ("subcategory", "Apple"),
        ("currency", "USD"),
        ("price", "329"),
        ("url", "http://apple.com/ipad"),
        ("image_url", "http://apple.com/ipad.jpg"),
    ]
}

/// Asserts a record holds exactly the expected column/value pairs.
pub fn assert_record_eq(record: &Record, expected: &[(&str, &str)]) {
    assert_eq!(record.len(), expected.len());
    for (column, value) in expected {
        assert_eq!(
            record.get(column).and_then(CellValue::as_str),
            Some(*value),
            "column '{column}'"
        );
    }
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
