//! Row executor.
//!
//! Applies every field operation to one [`RawRow`] and builds the
//! [`NormalizedRow`], or stops at the first field that fails.
//!
//! Fields are applied in a fixed order, which decides the reported error when
//! several fields are bad:
//!
//! ```text
//! Timestamp → Address → ZIP → Fullname → FooDuration → BarDuration → Notes
//! ```
//!
//! The text fields never fail, so in practice the gates are Timestamp, ZIP,
//! FooDuration, then BarDuration. TotalDuration is always recomputed and its
//! input value is ignored.

use crate::error::{DurationField, RowResult, ValidationError, ValidationKind};
use crate::models::{Field, NormalizedRow, RawRow};

use super::operations::{
    decode_text, decode_uppercase, format_duration, format_timestamp, format_zip, total_duration,
};

/// Transform one row. Pure: no I/O, no state.
pub fn process_row(row: &RawRow) -> RowResult<NormalizedRow> {
    if row.len() != Field::COUNT {
        return Err(ValidationError::new(
            ValidationKind::MalformedRow {
                expected: Field::COUNT,
                found: row.len(),
            },
            Field::Timestamp,
            row.text(Field::Timestamp),
        ));
    }

    let timestamp = format_timestamp(&row.text(Field::Timestamp))?;
    let address = decode_text(raw(row, Field::Address));
    let zip = format_zip(&row.text(Field::Zip))?;
    let fullname = decode_uppercase(raw(row, Field::Fullname));
    let foo_duration = format_duration(&row.text(Field::FooDuration), DurationField::Foo)?;
    let bar_duration = format_duration(&row.text(Field::BarDuration), DurationField::Bar)?;
    let notes = decode_text(raw(row, Field::Notes));

    Ok(NormalizedRow {
        timestamp,
        address,
        zip,
        fullname,
        foo_duration,
        bar_duration,
        total_duration: total_duration(foo_duration, bar_duration),
        notes,
    })
}

fn raw(row: &RawRow, field: Field) -> &[u8] {
    row.bytes(field).unwrap_or_default()
}
