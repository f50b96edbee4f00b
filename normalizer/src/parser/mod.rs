//! CSV input reader.
//!
//! Skips the header, then yields one [`RawRow`] per record. Columns are taken
//! by position; a header that names them differently is only logged. Values
//! stay as raw bytes; decoding is a field rule, not a parsing concern.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use crate::error::{RunError, RunResult};
use crate::models::{Field, RawRow};

/// Record number of the first row after the header.
pub const FIRST_DATA_RECORD: u64 = 2;

/// Reads [`RawRow`]s from delimited input.
///
/// The header has already been read when construction succeeds. Record
/// numbers count it, so the first data row is record 2.
pub struct RowReader<R: Read> {
    reader: csv::Reader<R>,
    record: ByteRecord,
    next_record: u64,
}

impl RowReader<File> {
    /// Open a file for reading.
    pub fn open(path: &Path, delimiter: u8) -> RunResult<Self> {
        let file = File::open(path).map_err(|source| RunError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, delimiter)
    }
}

impl<R: Read> RowReader<R> {
    /// Wrap any reader and read past its header row.
    pub fn from_reader(input: R, delimiter: u8) -> RunResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.byte_headers().map_err(RunError::Read)?;
        if !headers.is_empty() && !check_header(headers) {
            tracing::warn!(
                expected = %Field::header().join(","),
                found = %header_names(headers).join(","),
                "unexpected header, reading columns by position"
            );
        }

        Ok(Self {
            reader,
            record: ByteRecord::new(),
            next_record: FIRST_DATA_RECORD,
        })
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = RunResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);
                let row = RawRow::new(self.next_record, line, self.record.clone());
                self.next_record += 1;
                Some(Ok(row))
            }
            Ok(false) => None,
            Err(e) => Some(Err(RunError::Read(e))),
        }
    }
}

/// Whether a header row lists the fixed fields, in order.
///
/// Surrounding whitespace around each name is ignored.
pub fn check_header(headers: &ByteRecord) -> bool {
    let found = header_names(headers);
    found.len() == Field::COUNT
        && found
            .iter()
            .zip(Field::ALL)
            .all(|(name, field)| name == field.name())
}

fn header_names(headers: &ByteRecord) -> Vec<String> {
    headers
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect()
}

/// Read every row of an in-memory input.
pub fn parse_rows(input: &[u8], delimiter: u8) -> RunResult<Vec<RawRow>> {
    RowReader::from_reader(input, delimiter)?.collect()
}
