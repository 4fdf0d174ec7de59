//! The `datewise` crate is a small collection of date and time utilities.
//!
//! ```rust
//! use datewise::{parse_iso8601, time_span_to_string, DateTime};
//!
//! let start = parse_iso8601("2016-01-19T08:07:37Z").unwrap();
//! assert_eq!(start.to_string(), "2016-01-19T08:07:37.000Z");
//! assert!(start.in_leap_year());
//!
//! let end = DateTime::from_utc_fields(2016, 0, 19, 10, 0, 0, 250).unwrap();
//! assert_eq!(time_span_to_string(&start, &end), "01:52:23.250");
//! ```
//!
//! The crate provides:
//!
//!   - RFC 2822 parsing (`Tue, 26 Jan 2016 13:48:02 GMT`), resolving
//!     zone-less dates through a [`LocalTimeZone`].
//!   - Lenient ISO 8601 parsing (`2016-01-19T08:07:37Z`).
//!   - A Gregorian leap-year predicate.
//!   - `HH:mm:ss.sss` timespan formatting.
//!   - The angle between the hands of an analog clock.
//!
//! Time zone data is available with the `tzdb` feature, and the host's
//! time zone and clock with the `sys` feature.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // Epoch arithmetic is bounded by the valid instant range.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod error;
pub mod fields;
pub mod parsers;
pub mod timespan;
pub mod tz;

mod datetime;
mod epoch_milliseconds;

#[cfg(feature = "sys")]
pub mod sys;
#[cfg(feature = "tzdb")]
pub mod tzdb;

#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::DateError;

/// The `datewise` result type
pub type DateResult<T> = Result<T, DateError>;

pub mod time {
    pub use crate::epoch_milliseconds::EpochMilliseconds;
}

pub use crate::{
    clock::{angle_between_clock_hands, angle_between_clock_hands_degrees},
    datetime::{is_leap_year, DateTime},
    fields::DateTimeFields,
    parsers::{parse_iso8601, parse_rfc2822_with_time_zone},
    timespan::{time_span_to_string, TimeSpan},
    tz::{FixedOffset, LocalTimeZone, Utc},
};

#[cfg(feature = "sys")]
pub use crate::{parsers::parse_rfc2822, sys::SystemTimeZone};

#[cfg(feature = "tzdb")]
pub use crate::tzdb::TzifTimeZone;

/// A library specific trait for unwrapping assertions.
#[cfg_attr(not(feature = "tzdb"), allow(dead_code))]
pub(crate) trait DateUnwrap {
    type Output;

    /// `datewise` based assertion for unwrapping. This will panic in
    /// debug builds, but returns an error during runtime.
    fn date_unwrap(self) -> DateResult<Self::Output>;
}

impl<T> DateUnwrap for Option<T> {
    type Output = T;

    fn date_unwrap(self) -> DateResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(DateError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! date_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::DateError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::DateError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(&self) -> i64 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        *self as i64
    }
}

// Relevant numeric constants
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Milliseconds per hour constant: 3.6e+6
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per minute constant: 6e+4
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per second constant
pub const MS_PER_SECOND: i64 = 1_000;
/// Max instant millisecond constant: 8.64e+15
#[doc(hidden)]
pub(crate) const MS_MAX_INSTANT: i64 = MS_PER_DAY * 100_000_000;
/// Min instant millisecond constant
#[doc(hidden)]
pub(crate) const MS_MIN_INSTANT: i64 = -MS_MAX_INSTANT;
