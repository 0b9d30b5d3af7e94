use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, Trim};
use log::{debug, warn};

use crate::error::{Error, ErrorDetail, ROW_LENGTH, RowError};
use crate::record::Record;
use crate::schema::{CellValue, ColumnSpec, Schema};

/// A CSV reader that validates every row against a [`Schema`].
///
/// Each successful read yields one [`Record`] mapping column names to
/// coerced values, in schema order. A malformed row surfaces as
/// [`Error::InvalidRow`] carrying everything wrong with that row; the reader
/// itself stays usable, so the caller decides whether one bad row aborts the
/// run or is logged and skipped.
///
/// # Examples
///
/// ```
/// use strictcsv::{CellValue, ColumnSpec, ColumnType, Schema, SchemaReaderBuilder};
///
/// let schema = Schema::new(vec![
///     ColumnSpec::new("city", ColumnType::Text),
///     ColumnSpec::new("pop", ColumnType::Integer),
/// ])
/// .unwrap();
///
/// let data = "\
/// city,pop
/// Boston,4628910
/// Concord,42695
/// ";
///
/// let reader = SchemaReaderBuilder::new(schema)
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// let boston = reader.read().unwrap().unwrap();
/// assert_eq!(boston.get("city"), Some(&CellValue::Text("Boston".to_string())));
/// assert_eq!(boston.get("pop"), Some(&CellValue::Integer(4628910)));
///
/// let concord = reader.read().unwrap().unwrap();
/// assert_eq!(concord.get("pop"), Some(&CellValue::Integer(42695)));
///
/// // Drained, and it stays that way.
/// assert!(reader.read().unwrap().is_none());
/// assert!(reader.read().unwrap().is_none());
/// ```
///
/// Continuing past a bad row:
///
/// ```
/// use strictcsv::{ColumnSpec, ColumnType, Error, ROW_LENGTH, Schema, SchemaReaderBuilder};
///
/// let schema = Schema::new(vec![
///     ColumnSpec::new("name", ColumnType::Text),
///     ColumnSpec::new("qty", ColumnType::Integer),
/// ])
/// .unwrap();
///
/// let data = "bolt,12\nwasher\nnut,7\n";
/// let reader = SchemaReaderBuilder::new(schema)
///     .header_included(false)
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// assert!(reader.read().is_ok());
/// match reader.read() {
///     Err(Error::InvalidRow(row_error)) => assert!(row_error.contains(ROW_LENGTH)),
///     other => panic!("expected a row error, got {other:?}"),
/// }
/// // The sequence is not broken by the rejected row.
/// let nut = reader.read().unwrap().unwrap();
/// assert_eq!(nut.get("name").unwrap().as_str(), Some("nut"));
/// ```
pub struct SchemaReader<R: Read> {
    schema: Schema,
    /// Iterator over the tokenized rows.
    ///
    /// `RefCell` gives interior mutability so `read(&self)` can advance the
    /// underlying stream without a `&mut` receiver.
    records: RefCell<StringRecordsIntoIter<BufReader<R>>>,
    /// Lines discarded before the CSV tokenizer took over; added to the
    /// tokenizer's own line positions when reporting errors.
    skipped_lines: u64,
    fail_fast: bool,
    max_failures: Option<usize>,
    failures: RefCell<Vec<RowError>>,
}

impl<R: Read> SchemaReader<R> {
    /// Reads the next row, validates it, and yields the resulting record.
    ///
    /// # Returns
    /// - `Ok(Some(record))` for a valid row
    /// - `Ok(None)` once the input is drained; repeated reads keep returning
    ///   `Ok(None)`
    /// - `Err(Error::InvalidRow(_))` for a malformed row (fail-fast mode);
    ///   the next call moves on to the following row
    /// - `Err(Error::TooManyFailures { .. })` when a collecting reader goes
    ///   past its `max_failures` budget
    /// - `Err(Error::Parse(_))` if the CSV tokenizer itself rejects the input
    pub fn read(&self) -> Result<Option<Record>, Error> {
        loop {
            let next = self.records.borrow_mut().next();
            let Some(result) = next else {
                debug!("input exhausted");
                return Ok(None);
            };

            let raw = match result {
                Ok(raw) => raw,
                Err(error) => return Err(Error::Parse(error.to_string())),
            };

            let line = self.input_line(&raw);
            match self.validate_row(&raw, line) {
                Ok(record) => return Ok(Some(record)),
                Err(row_error) => {
                    warn!("{row_error}");
                    if self.fail_fast {
                        return Err(Error::InvalidRow(row_error));
                    }
                    let mut failures = self.failures.borrow_mut();
                    failures.push(row_error);
                    if let Some(limit) = self.max_failures
                        && failures.len() > limit
                    {
                        return Err(Error::TooManyFailures {
                            failures: failures.len(),
                            limit,
                        });
                    }
                }
            }
        }
    }

    /// Rows rejected so far by a collecting reader (`fail_fast(false)`).
    /// Always empty in fail-fast mode.
    pub fn failures(&self) -> Vec<RowError> {
        self.failures.borrow().clone()
    }

    /// The schema this reader validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// 1-based line of the row within the original input, counting the lines
    /// skipped before the tokenizer started.
    fn input_line(&self, raw: &StringRecord) -> u64 {
        self.skipped_lines + raw.position().map(|pos| pos.line()).unwrap_or(0)
    }

    fn validate_row(&self, raw: &StringRecord, line: u64) -> Result<Record, RowError> {
        if raw.len() != self.schema.len() {
            let mut errors = BTreeMap::new();
            errors.insert(
                ROW_LENGTH.to_string(),
                ErrorDetail::RowLength {
                    expected: self.schema.len(),
                    actual: raw.len(),
                },
            );
            return Err(RowError {
                line,
                row: raw.iter().map(str::to_string).collect(),
                errors,
            });
        }

        let mut errors = BTreeMap::new();
        let mut record = Record::with_capacity(self.schema.len());
        for (spec, field) in self.schema.iter().zip(raw.iter()) {
            match validate_field(spec, field) {
                Ok(value) => record.push(spec.name().to_string(), value),
                Err(reason) => {
                    errors.insert(
                        spec.name().to_string(),
                        ErrorDetail::Field {
                            value: field.to_string(),
                            reason,
                        },
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(RowError {
                line,
                row: raw.iter().map(str::to_string).collect(),
                errors,
            })
        }
    }
}

impl<R: Read> Iterator for SchemaReader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}

/// Applies required/default handling, then the column's own validation.
fn validate_field(spec: &ColumnSpec, raw: &str) -> Result<CellValue, String> {
    if raw.is_empty() {
        if let Some(default) = spec.default() {
            return spec.kind().validate_and_coerce(default);
        }
        if spec.is_required() {
            return Err("value is required and was not provided".to_string());
        }
        return Ok(CellValue::Empty);
    }
    spec.kind().validate_and_coerce(raw)
}

/// A builder for configuring schema-validated CSV reading.
///
/// # Default configuration
///
/// - Header: included (consumed and ignored)
/// - Skip lines: 0
/// - Delimiter: comma (,)
/// - Terminator: CRLF
/// - Trimming: on (whitespace stripped around every field)
/// - Fail fast: on (a bad row is returned as an error from the read that
///   hit it)
///
/// # Examples
///
/// ```
/// use strictcsv::{ColumnSpec, ColumnType, Schema, SchemaReaderBuilder};
///
/// let schema = Schema::new(vec![ColumnSpec::new("id", ColumnType::Integer)]).unwrap();
///
/// let data = "export v2\n-- begin --\nid\n1\n2\n";
/// let reader = SchemaReaderBuilder::new(schema)
///     .skip_lines(2)
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// assert_eq!(reader.count(), 2);
/// ```
pub struct SchemaReaderBuilder {
    schema: Schema,
    header_included: bool,
    skip_lines: usize,
    delimiter: u8,
    terminator: Terminator,
    trim: bool,
    fail_fast: bool,
    max_failures: Option<usize>,
}

impl SchemaReaderBuilder {
    /// Creates a builder for the given schema with the default configuration.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            header_included: true,
            skip_lines: 0,
            delimiter: b',',
            terminator: Terminator::CRLF,
            trim: true,
            fail_fast: true,
            max_failures: None,
        }
    }

    /// Sets whether the first non-skipped line is a header.
    ///
    /// The header is consumed and ignored: the schema supplies the column
    /// names, and its declaration order maps fields positionally either way.
    pub fn header_included(mut self, yes: bool) -> Self {
        self.header_included = yes;
        self
    }

    /// Sets the number of leading lines to discard before any CSV parsing.
    ///
    /// Skipping happens while the reader is built. If the input ends before
    /// the requested count is consumed, construction fails with
    /// [`Error::Configuration`]; if it ends exactly at the last skipped
    /// line, the reader is valid and already exhausted.
    pub fn skip_lines(mut self, count: usize) -> Self {
        self.skip_lines = count;
        self
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the record terminator (default: CRLF).
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Sets whether whitespace around fields is stripped (default: on).
    pub fn trim(mut self, yes: bool) -> Self {
        self.trim = yes;
        self
    }

    /// Sets whether a malformed row is returned as an error from the read
    /// that encounters it (default) or collected, skipped, and exposed via
    /// [`SchemaReader::failures`].
    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }

    /// Caps how many rows a collecting reader may reject before reading
    /// errors out with [`Error::TooManyFailures`]. Only consulted when
    /// `fail_fast` is off.
    pub fn max_failures(mut self, limit: usize) -> Self {
        self.max_failures = Some(limit);
        self
    }

    /// Builds a [`SchemaReader`] over any `Read` source.
    ///
    /// Leading lines are skipped here, so an over-long `skip_lines` fails
    /// immediately rather than at first read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the input ends before `skip_lines`
    /// lines were consumed, or if the stream fails while skipping.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<SchemaReader<R>, Error> {
        let mut input = BufReader::new(rdr);
        skip_leading_lines(&mut input, self.skip_lines)?;
        if self.skip_lines > 0 {
            debug!("skipped {} leading lines", self.skip_lines);
        }

        let records = ReaderBuilder::new()
            .trim(if self.trim { Trim::All } else { Trim::None })
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(self.header_included)
            // Let rows of any length through so that field-count mismatches
            // surface as structured row-length errors, not tokenizer errors.
            .flexible(true)
            .from_reader(input)
            .into_records();

        Ok(SchemaReader {
            schema: self.schema,
            records: RefCell::new(records),
            skipped_lines: self.skip_lines as u64,
            fail_fast: self.fail_fast,
            max_failures: self.max_failures,
            failures: RefCell::new(Vec::new()),
        })
    }

    /// Builds a [`SchemaReader`] over a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file cannot be opened, plus
    /// every error [`Self::from_reader`] can return.
    pub fn from_path(self, path: impl AsRef<Path>) -> Result<SchemaReader<File>, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| {
            Error::Configuration(format!("cannot open '{}': {error}", path.display()))
        })?;
        self.from_reader(file)
    }
}

/// Advances the stream past exactly `count` lines.
///
/// Errors if the input runs out first: a skip count that overruns the stream
/// is a misconfiguration and must not be discovered lazily.
fn skip_leading_lines<R: BufRead>(input: &mut R, count: usize) -> Result<(), Error> {
    let mut line = String::new();
    for consumed in 0..count {
        line.clear();
        let bytes = input
            .read_line(&mut line)
            .map_err(|error| Error::Configuration(format!("failed to skip lines: {error}")))?;
        if bytes == 0 {
            return Err(Error::Configuration(format!(
                "skip_lines is {count} but the input ends after {consumed} lines"
            )));
        }
    }
    Ok(())
}
