//! Field operations.
//!
//! One pure function per column rule. Each either returns the reformatted
//! value or a [`ValidationError`] naming the field and the rule it broke.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat,
    TimeZone,
};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;
use chrono_tz::US::Eastern;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DurationField, RowResult, ValidationError, ValidationKind};
use crate::models::Field;

/// Width every ZIP code is padded to.
pub const ZIP_LENGTH: usize = 5;

/// Zone input timestamps are written in.
pub const SOURCE_ZONE: Tz = Los_Angeles;

/// Zone output timestamps are converted to.
pub const TARGET_ZONE: Tz = Eastern;

/// Exact shape of `M/d/yy h:mm:ss a`, split into month, day, year and clock.
static TIMESTAMP_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}) (\d{1,2}:\d{2}:\d{2} (?:AM|PM))$")
        .expect("timestamp pattern is valid")
});

const CLOCK_FORMAT: &str = "%I:%M:%S %p";

/// Two-digit years are offsets from this one.
const BASE_YEAR: i32 = 2000;

// =============================================================================
// Timestamp
// =============================================================================

/// Parse a Pacific `M/d/yy h:mm:ss a` timestamp and render it as RFC 3339
/// in US/Eastern, e.g. `2023-01-05T06:15:30-05:00`.
pub fn format_timestamp(input: &str) -> RowResult<String> {
    let invalid = || ValidationError::new(ValidationKind::InvalidTimestamp, Field::Timestamp, input);

    let local = parse_local_timestamp(input).ok_or_else(invalid)?;
    let pacific = resolve_local(&SOURCE_ZONE, local).ok_or_else(invalid)?;

    Ok(pacific
        .with_timezone(&TARGET_ZONE)
        .to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Parse the wall-clock part, without any zone.
///
/// Days 29 to 31 past the end of their month are pulled back to its last
/// day, so `2/30/23` reads as `2023-02-28`.
fn parse_local_timestamp(input: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_SHAPE.captures(input)?;

    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year = BASE_YEAR + caps[3].parse::<i32>().ok()?;

    if !(1..=31).contains(&day) {
        return None;
    }
    let date = (day.min(28)..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))?;

    let time = NaiveTime::parse_from_str(&caps[4], CLOCK_FORMAT).ok()?;
    Some(date.and_time(time))
}

/// Attach a zone to a wall-clock time.
///
/// Overlaps take the earlier offset; times inside a gap move forward by the
/// length of the gap.
fn resolve_local(zone: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let before = zone
                .from_local_datetime(&(local - Duration::days(1)))
                .earliest()?;
            let after = zone
                .from_local_datetime(&(local + Duration::days(1)))
                .earliest()?;
            let gap = before.offset().fix().local_minus_utc()
                - after.offset().fix().local_minus_utc();
            let shifted = local + Duration::seconds(i64::from(gap.abs()));
            zone.from_local_datetime(&shifted).earliest()
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Re-decode bytes as UTF-8, replacing malformed sequences with U+FFFD, and
/// keep only the first line.
pub fn decode_text(input: &[u8]) -> String {
    let (decoded, _) = encoding_rs::UTF_8.decode_without_bom_handling(input);
    match decoded.find(|c: char| c == '\n' || c == '\r') {
        Some(end) => decoded[..end].to_string(),
        None => decoded.into_owned(),
    }
}

/// [`decode_text`], upper-cased.
pub fn decode_uppercase(input: &[u8]) -> String {
    decode_text(input).to_uppercase()
}

// =============================================================================
// ZIP
// =============================================================================

/// Check a ZIP code without reformatting it.
pub fn validate_zip(zip: &str) -> RowResult<()> {
    let fail = |kind| Err(ValidationError::new(kind, Field::Zip, zip));

    if zip.is_empty() {
        return fail(ValidationKind::EmptyZip);
    }
    if zip.chars().count() > ZIP_LENGTH {
        return fail(ValidationKind::ZipTooLong);
    }
    if !zip.chars().all(|c| c.is_ascii_digit()) {
        return fail(ValidationKind::NonDigitZip);
    }
    Ok(())
}

/// Validate a ZIP code and left-pad it with `0` to five digits.
pub fn format_zip(zip: &str) -> RowResult<String> {
    validate_zip(zip)?;
    Ok(format!("{:0>width$}", zip, width = ZIP_LENGTH))
}

// =============================================================================
// Durations
// =============================================================================

/// Parse `HH:MM:SS.mmm` into whole seconds. The fractional part is dropped.
pub fn format_duration(input: &str, which: DurationField) -> RowResult<u64> {
    parse_seconds(input).ok_or_else(|| {
        ValidationError::new(ValidationKind::InvalidDuration { which }, which.field(), input)
    })
}

fn parse_seconds(input: &str) -> Option<u64> {
    let (clock, _millis) = input.split_once('.')?;

    let parts: Vec<u64> = clock
        .split(':')
        .map(|part| part.parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;

    let &[hours, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Sum of the two durations, in seconds.
pub fn total_duration(foo: u64, bar: u64) -> u64 {
    foo.saturating_add(bar)
}
