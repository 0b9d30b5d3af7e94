/// Schema-validating CSV reading.
///
/// The reader wraps the `csv` crate's tokenizer and layers three stages on
/// top of it, in order:
///
/// 1. **Line skipping**: a configured number of leading lines (report
///    preambles, generator banners) is discarded before any CSV parsing.
///    This happens eagerly while the reader is built, so a skip count that
///    overruns the input is a configuration error, not a late surprise.
/// 2. **Header consumption**: when `header_included` is on (the default),
///    the first remaining line is consumed and ignored; the schema's own
///    column order stays authoritative for positional mapping.
/// 3. **Row validation**: every subsequent row is checked for field count
///    and then field by field against its column's type, producing either a
///    [`crate::Record`] or a structured [`crate::RowError`].
///
/// Reading is pull-based and forward-only. `read()` follows the
/// `Ok(Some)` / `Ok(None)` / `Err` contract, with `Ok(None)` repeating once
/// the input is drained; the reader is also an `Iterator` over
/// `Result<Record, Error>`.
pub mod schema_reader;
