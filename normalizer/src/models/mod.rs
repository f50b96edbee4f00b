//! Domain models for the normalizer.
//!
//! - [`Field`] - The closed set of columns, in declaration order
//! - [`RawRow`] - One input record, exactly as read
//! - [`NormalizedRow`] - One accepted record, after every field rule

use std::borrow::Cow;

use csv::ByteRecord;
use serde::Serialize;

// =============================================================================
// Field
// =============================================================================

/// A column of the fixed record schema.
///
/// The declaration order is the column order of both input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    Address,
    Zip,
    Fullname,
    FooDuration,
    BarDuration,
    TotalDuration,
    Notes,
}

impl Field {
    /// Every field, in column order.
    pub const ALL: [Field; 8] = [
        Field::Timestamp,
        Field::Address,
        Field::Zip,
        Field::Fullname,
        Field::FooDuration,
        Field::BarDuration,
        Field::TotalDuration,
        Field::Notes,
    ];

    /// Number of columns in a record.
    pub const COUNT: usize = Self::ALL.len();

    /// Header text of this column.
    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "Timestamp",
            Field::Address => "Address",
            Field::Zip => "ZIP",
            Field::Fullname => "Fullname",
            Field::FooDuration => "FooDuration",
            Field::BarDuration => "BarDuration",
            Field::TotalDuration => "TotalDuration",
            Field::Notes => "Notes",
        }
    }

    /// Zero-based column position.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header row, as strings.
    pub fn header() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Raw input row
// =============================================================================

/// One input record, untouched.
///
/// Values are kept as bytes: text fields are re-decoded from them, and
/// rejected rows are written back out byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Record number, counting the header as record 1.
    pub record: u64,
    /// 1-based physical line where the record starts.
    pub line: u64,
    values: ByteRecord,
}

impl RawRow {
    pub fn new(record: u64, line: u64, values: ByteRecord) -> Self {
        Self {
            record,
            line,
            values,
        }
    }

    /// Build a row from string values. Mostly useful in tests.
    pub fn from_strs<I, S>(record: u64, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let values: ByteRecord = values.into_iter().collect();
        Self::new(record, record, values)
    }

    /// Raw bytes of a column, or `None` if the record is too short.
    pub fn bytes(&self, field: Field) -> Option<&[u8]> {
        self.values.get(field.index())
    }

    /// Column value decoded lossily, or an empty string if absent.
    pub fn text(&self, field: Field) -> Cow<'_, str> {
        self.bytes(field)
            .map(String::from_utf8_lossy)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Number of values in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The record as read.
    pub fn values(&self) -> &ByteRecord {
        &self.values
    }
}

// =============================================================================
// Normalized output row
// =============================================================================

/// An accepted record, every field transformed.
///
/// Member order matches [`Field::ALL`]; serializing with `csv::Writer` emits
/// the header and values in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "ZIP")]
    pub zip: String,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "FooDuration")]
    pub foo_duration: u64,
    #[serde(rename = "BarDuration")]
    pub bar_duration: u64,
    #[serde(rename = "TotalDuration")]
    pub total_duration: u64,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl NormalizedRow {
    /// Value of one column as it will be written.
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Timestamp => Cow::Borrowed(&self.timestamp),
            Field::Address => Cow::Borrowed(&self.address),
            Field::Zip => Cow::Borrowed(&self.zip),
            Field::Fullname => Cow::Borrowed(&self.fullname),
            Field::FooDuration => Cow::Owned(self.foo_duration.to_string()),
            Field::BarDuration => Cow::Owned(self.bar_duration.to_string()),
            Field::TotalDuration => Cow::Owned(self.total_duration.to_string()),
            Field::Notes => Cow::Borrowed(&self.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_and_names() {
        assert_eq!(
            Field::header(),
            vec![
                "Timestamp",
                "Address",
                "ZIP",
                "Fullname",
                "FooDuration",
                "BarDuration",
                "TotalDuration",
                "Notes"
            ]
        );
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_raw_row_access() {
        let row = RawRow::from_strs(3, ["a", "b"]);
        assert_eq!(row.record, 3);
        assert_eq!(row.len(), 2);
        assert_eq!(row.text(Field::Address), "b");
        assert_eq!(row.bytes(Field::Notes), None);
        assert_eq!(row.text(Field::Notes), "");
    }

    #[test]
    fn test_raw_row_lossy_text() {
        let row = RawRow::from_strs(1, [&b"caf\xe9"[..]]);
        assert_eq!(row.text(Field::Timestamp), "caf\u{FFFD}");
    }

    #[test]
    fn test_normalized_value_strings() {
        let row = NormalizedRow {
            timestamp: "2023-01-05T06:15:30-05:00".into(),
            address: "123 Main St".into(),
            zip: "09501".into(),
            fullname: "JANE DOE".into(),
            foo_duration: 90,
            bar_duration: 45,
            total_duration: 135,
            notes: "ok".into(),
        };
        assert_eq!(row.value(Field::TotalDuration), "135");
        assert_eq!(row.value(Field::Zip), "09501");
    }
}
