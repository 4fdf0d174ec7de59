//! This module implements calendar field records and the field arithmetic
//! used to build instants from them.
//!
//! Field arithmetic follows ECMAScript's `MakeDay`, `MakeTime` and
//! `MakeDate`: values outside their usual range roll over into the
//! neighbouring unit, so hour `-1` is 23:00 on the previous day and month
//! `12` is January of the following year.

use date_equations::gregorian;

use crate::{
    epoch_milliseconds::EpochMilliseconds, error::ErrorMessage, DateError, DateResult,
    MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
};

/// The supported year range, with a year of slack on either side for
/// fields that roll over into a valid instant.
const MIN_YEAR: i64 = -271_822;
const MAX_YEAR: i64 = 275_761;

/// The calendar fields of an instant in some time zone.
///
/// `month` is zero-based (0 is January) and `weekday` counts from Sunday (0).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeFields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub weekday: u8,
}

impl DateTimeFields {
    /// Splits epoch milliseconds into calendar fields.
    ///
    /// The milliseconds must be within the valid instant range, adjusted by
    /// at most a day of UTC offset.
    pub(crate) fn from_epoch_milliseconds(millis: EpochMilliseconds) -> Self {
        let epoch_days = millis.epoch_days() as i32;
        let (year, month, day) = gregorian::ymd_from_epoch_days(epoch_days);
        let ms_in_day = millis.ms_in_day();

        Self {
            year,
            month: month - 1,
            day,
            hour: (ms_in_day / MS_PER_HOUR) as u8,
            minute: (ms_in_day % MS_PER_HOUR / MS_PER_MINUTE) as u8,
            second: (ms_in_day % MS_PER_MINUTE / MS_PER_SECOND) as u8,
            millisecond: (ms_in_day % MS_PER_SECOND) as u16,
            weekday: gregorian::day_of_week(epoch_days),
        }
    }
}

/// `MakeDay`: the epoch day of `day` in the zero-based `month` of `year`.
pub(crate) fn make_day(year: i64, month: i64, day: i64) -> DateResult<i64> {
    let year = year
        .checked_add(month.div_euclid(12))
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::YearOutOfRange))?;
    let month = month.rem_euclid(12) as u8 + 1;

    let first_of_month = gregorian::epoch_days_from_ymd(year as i32, month, 1);
    i64::from(first_of_month)
        .checked_add(day)
        .and_then(|d| d.checked_sub(1))
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::FieldOverflow))
}

/// `MakeTime`: the milliseconds represented by the time fields.
pub(crate) fn make_time(hour: i64, minute: i64, second: i64, millisecond: i64) -> DateResult<i64> {
    hour.checked_mul(MS_PER_HOUR)
        .and_then(|t| t.checked_add(minute.checked_mul(MS_PER_MINUTE)?))
        .and_then(|t| t.checked_add(second.checked_mul(MS_PER_SECOND)?))
        .and_then(|t| t.checked_add(millisecond))
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::FieldOverflow))
}

/// `MakeDate`: combines an epoch day and a time into epoch milliseconds.
pub(crate) fn make_date(day: i64, time: i64) -> DateResult<i64> {
    day.checked_mul(MS_PER_DAY)
        .and_then(|d| d.checked_add(time))
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::FieldOverflow))
}
