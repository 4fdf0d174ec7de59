//! This module implements the RFC 2822 and ISO 8601 date parsers.
//!
//! Both parsers work on whitespace and separator delimited tokens rather
//! than a full grammar, and accept the loose forms found in mail headers
//! and JavaScript date strings.

use alloc::format;

use crate::{DateError, DateResult};

mod iso8601;
mod rfc2822;

pub use iso8601::parse_iso8601;
#[cfg(feature = "sys")]
pub use rfc2822::parse_rfc2822;
pub use rfc2822::parse_rfc2822_with_time_zone;

/// English month names, full and abbreviated.
const MONTHS: [(&str, &str); 12] = [
    ("January", "Jan"),
    ("February", "Feb"),
    ("March", "Mar"),
    ("April", "Apr"),
    ("May", "May"),
    ("June", "Jun"),
    ("July", "Jul"),
    ("August", "Aug"),
    ("September", "Sep"),
    ("October", "Oct"),
    ("November", "Nov"),
    ("December", "Dec"),
];

/// English weekday names, full and abbreviated, starting from Sunday.
const WEEKDAYS: [(&str, &str); 7] = [
    ("Sunday", "Sun"),
    ("Monday", "Mon"),
    ("Tuesday", "Tue"),
    ("Wednesday", "Wed"),
    ("Thursday", "Thu"),
    ("Friday", "Fri"),
    ("Saturday", "Sat"),
];

fn lookup(table: &[(&str, &str)], name: &str) -> Option<usize> {
    table
        .iter()
        .position(|(full, abbr)| name.eq_ignore_ascii_case(full) || name.eq_ignore_ascii_case(abbr))
}

/// Returns the zero-based month index of an English month name.
pub(crate) fn month_index(name: &str) -> Option<i64> {
    lookup(&MONTHS, name).map(|idx| idx as i64)
}

/// Returns the weekday index (0 is Sunday) of an English weekday name.
pub(crate) fn weekday_index(name: &str) -> Option<u8> {
    lookup(&WEEKDAYS, name).map(|idx| idx as u8)
}

/// Parses an unsigned decimal field.
pub(crate) fn parse_integer(token: &str, field: &str) -> DateResult<i64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::syntax().with_message(format!("Invalid {field}: `{token}`.")));
    }
    token
        .parse::<i64>()
        .map_err(|_| DateError::range().with_message(format!("The {field} value is too large.")))
}
