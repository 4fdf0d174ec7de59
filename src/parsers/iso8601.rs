//! ISO 8601 date parsing.

use super::parse_integer;
use crate::{error::ErrorMessage, DateError, DateResult, DateTime};

/// Parses an ISO 8601 date and time as a UTC instant.
///
/// The input is read as `<YYYY>-<MM>-<DD>T<HH>:<MM>:<SS>`. Only the first
/// two characters of the seconds field are read, so fractional seconds and
/// any zone designator after them are ignored. A `±HH:MM` offset is not
/// applied.
///
/// ```rust
/// use datewise::parse_iso8601;
///
/// let dt = parse_iso8601("2016-01-19T08:07:37Z").unwrap();
/// assert_eq!(dt.epoch_milliseconds(), 1_453_190_857_000);
/// ```
pub fn parse_iso8601(source: &str) -> DateResult<DateTime> {
    let (date, time) = source
        .split_once('T')
        .ok_or_else(|| DateError::syntax().with_enum(ErrorMessage::MissingTimeSeparator))?;

    let [year, month, day] = split_fields(date, '-').ok_or_else(|| {
        DateError::syntax().with_message("Date must be formatted as `YYYY-MM-DD`.")
    })?;
    let [hour, minute, seconds] = split_fields(time, ':')
        .ok_or_else(|| DateError::syntax().with_enum(ErrorMessage::InvalidTime))?;
    let second = seconds
        .get(..2)
        .ok_or_else(|| DateError::syntax().with_enum(ErrorMessage::InvalidTime))?;

    #[cfg(feature = "log")]
    if seconds.len() > 2 {
        log::trace!("Ignoring `{}` after the seconds of `{source}`", &seconds[2..]);
    }

    DateTime::from_utc_fields(
        parse_integer(year, "year")?,
        parse_integer(month, "month")? - 1,
        parse_integer(day, "day")?,
        parse_integer(hour, "hour")?,
        parse_integer(minute, "minute")?,
        parse_integer(second, "second")?,
        0,
    )
}

/// Splits `source` into exactly `N` fields, leaving any further separators
/// in the last field.
fn split_fields<const N: usize>(source: &str, separator: char) -> Option<[&str; N]> {
    let mut parts = source.splitn(N, separator);
    let mut fields = [""; N];
    for field in &mut fields {
        *field = parts.next()?;
    }
    Some(fields)
}
