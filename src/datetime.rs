//! This module implements `DateTime`, an instant with millisecond precision.

use date_equations::gregorian;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    epoch_milliseconds::EpochMilliseconds,
    fields::{make_date, make_day, make_time, DateTimeFields},
    timespan::TimeSpan,
    error::ErrorMessage,
    tz::LocalTimeZone,
    utils, DateError, DateResult, MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_DAY, MS_PER_SECOND,
};

/// An instant in time, stored as milliseconds since the Unix epoch.
///
/// Calendar fields can be read in UTC with [`DateTime::utc_fields`], or for
/// any [`LocalTimeZone`] with [`DateTime::local_fields`]. The `Display`
/// implementation writes the instant in ISO 8601 UTC form.
///
/// ```rust
/// use datewise::{DateTime, FixedOffset};
///
/// let tz = FixedOffset::try_from_seconds(3_600).unwrap();
/// let dt = DateTime::from_local_fields(1995, 11, 17, 3, 24, 0, 0, &tz).unwrap();
/// assert_eq!(dt.to_string(), "1995-12-17T02:24:00.000Z");
/// assert_eq!(dt.local_fields(&tz).unwrap().hour, 3);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(EpochMilliseconds);

impl From<EpochMilliseconds> for DateTime {
    fn from(value: EpochMilliseconds) -> Self {
        Self(value)
    }
}

// ==== Public API ====

impl DateTime {
    /// Creates a new `DateTime` from milliseconds since the epoch.
    pub fn try_new(epoch_milliseconds: i64) -> DateResult<Self> {
        EpochMilliseconds::try_from(epoch_milliseconds).map(Self)
    }

    /// Creates a new `DateTime` from UTC calendar fields.
    ///
    /// `month` is zero-based. Fields outside their usual range roll over
    /// into the neighbouring unit.
    #[allow(clippy::too_many_arguments)]
    pub fn from_utc_fields(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
    ) -> DateResult<Self> {
        let millis = local_milliseconds(year, month, day, hour, minute, second, millisecond)?;
        Self::try_new(millis)
    }

    /// Creates a new `DateTime` from wall-clock fields in `time_zone`.
    ///
    /// `month` is zero-based. Fields outside their usual range roll over
    /// into the neighbouring unit.
    #[allow(clippy::too_many_arguments)]
    pub fn from_local_fields(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        time_zone: &impl LocalTimeZone,
    ) -> DateResult<Self> {
        let local = local_milliseconds(year, month, day, hour, minute, second, millisecond)?;
        let offset = time_zone.offset_seconds_for_local(local)?;
        Self::try_new(apply_offset(local, -1, offset)?)
    }

    /// Returns the current system time.
    #[cfg(feature = "sys")]
    pub fn now() -> DateResult<Self> {
        crate::sys::get_system_milliseconds().and_then(Self::try_new)
    }

    /// Returns the milliseconds since the epoch.
    #[inline]
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i64 {
        self.0.as_i64()
    }

    /// Returns the UTC calendar fields of this instant.
    #[must_use]
    pub fn utc_fields(&self) -> DateTimeFields {
        DateTimeFields::from_epoch_milliseconds(self.0)
    }

    /// Returns the calendar fields of this instant in `time_zone`.
    pub fn local_fields(&self, time_zone: &impl LocalTimeZone) -> DateResult<DateTimeFields> {
        let offset = time_zone.offset_seconds_at(self.epoch_milliseconds())?;
        let local = apply_offset(self.epoch_milliseconds(), 1, offset)?;
        // Local fields are only defined within a day of the valid range.
        if !(MS_MIN_INSTANT - MS_PER_DAY..=MS_MAX_INSTANT + MS_PER_DAY).contains(&local) {
            return Err(DateError::range().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        Ok(DateTimeFields::from_epoch_milliseconds(EpochMilliseconds(local)))
    }

    /// Returns whether the UTC year of this instant is a leap year.
    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        gregorian::is_leap_year(self.utc_fields().year)
    }

    /// Returns the `TimeSpan` from this instant until `other`.
    #[inline]
    #[must_use]
    pub fn until(&self, other: &Self) -> TimeSpan {
        TimeSpan::between(self, other)
    }
}

/// Returns whether the UTC year of `date_time` is a leap year.
#[inline]
#[must_use]
pub fn is_leap_year(date_time: &DateTime) -> bool {
    date_time.in_leap_year()
}

/// Moves `millis` by `offset_seconds` in the direction of `sign`.
fn apply_offset(millis: i64, sign: i64, offset_seconds: i64) -> DateResult<i64> {
    offset_seconds
        .checked_mul(sign * MS_PER_SECOND)
        .and_then(|offset| millis.checked_add(offset))
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::FieldOverflow))
}

#[allow(clippy::too_many_arguments)]
fn local_milliseconds(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> DateResult<i64> {
    let day = make_day(year, month, day)?;
    let time = make_time(hour, minute, second, millisecond)?;
    make_date(day, time)
}

// ==== Formatting ====

impl Writeable for DateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let fields = self.utc_fields();
        utils::write_year(fields.year, sink)?;
        sink.write_char('-')?;
        utils::write_padded_2(u64::from(fields.month) + 1, sink)?;
        sink.write_char('-')?;
        utils::write_padded_2(u64::from(fields.day), sink)?;
        sink.write_char('T')?;
        utils::write_padded_2(u64::from(fields.hour), sink)?;
        sink.write_char(':')?;
        utils::write_padded_2(u64::from(fields.minute), sink)?;
        sink.write_char(':')?;
        utils::write_padded_2(u64::from(fields.second), sink)?;
        sink.write_char('.')?;
        utils::write_padded_3(u64::from(fields.millisecond), sink)?;
        sink.write_char('Z')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if (0..=9999).contains(&self.utc_fields().year) {
            return LengthHint::exact(24);
        }
        LengthHint::exact(27)
    }
}

impl_display_with_writeable!(DateTime);
