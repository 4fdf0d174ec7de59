//! Local time zones.
//!
//! A [`LocalTimeZone`] maps instants to UTC offsets, which is all the
//! crate needs to construct instants from wall-clock fields and to read
//! wall-clock fields back out.

use crate::{error::ErrorMessage, DateError, DateResult, MS_PER_DAY, MS_PER_SECOND};

/// Offsets are limited to less than a day in either direction.
const MAX_OFFSET_SECONDS: i64 = 86_399;

/// The `LocalTimeZone` trait resolves UTC offsets, in seconds east of UTC.
pub trait LocalTimeZone {
    /// Returns the offset in effect at the instant `epoch_milliseconds`.
    fn offset_seconds_at(&self, epoch_milliseconds: i64) -> DateResult<i64>;

    /// Returns the offset for a wall-clock time, given as milliseconds since
    /// the epoch as if the wall-clock time were UTC.
    ///
    /// Wall-clock times repeated by a backward transition resolve to the
    /// earlier instant. Wall-clock times skipped by a forward transition
    /// resolve with the offset before the transition, which moves them
    /// forward by the length of the gap.
    fn offset_seconds_for_local(&self, local_milliseconds: i64) -> DateResult<i64> {
        let before = self.offset_seconds_at(local_milliseconds.saturating_sub(MS_PER_DAY))?;
        let after = self.offset_seconds_at(local_milliseconds.saturating_add(MS_PER_DAY))?;
        if before == after {
            return Ok(before);
        }

        let resolves_with = |offset: i64| -> DateResult<bool> {
            let instant = offset
                .checked_mul(MS_PER_SECOND)
                .and_then(|offset| local_milliseconds.checked_sub(offset))
                .ok_or_else(|| DateError::range().with_enum(ErrorMessage::OffsetOutOfRange))?;
            Ok(self.offset_seconds_at(instant)? == offset)
        };

        if !resolves_with(before)? && resolves_with(after)? {
            return Ok(after);
        }
        Ok(before)
    }
}

impl<T: LocalTimeZone + ?Sized> LocalTimeZone for &T {
    fn offset_seconds_at(&self, epoch_milliseconds: i64) -> DateResult<i64> {
        (**self).offset_seconds_at(epoch_milliseconds)
    }

    fn offset_seconds_for_local(&self, local_milliseconds: i64) -> DateResult<i64> {
        (**self).offset_seconds_for_local(local_milliseconds)
    }
}

/// Coordinated Universal Time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utc;

impl LocalTimeZone for Utc {
    fn offset_seconds_at(&self, _: i64) -> DateResult<i64> {
        Ok(0)
    }

    fn offset_seconds_for_local(&self, _: i64) -> DateResult<i64> {
        Ok(0)
    }
}

/// A time zone with a constant offset from UTC.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedOffset(i64);

impl FixedOffset {
    /// Creates a new `FixedOffset` from seconds east of UTC.
    pub fn try_from_seconds(seconds: i64) -> DateResult<Self> {
        if !(-MAX_OFFSET_SECONDS..=MAX_OFFSET_SECONDS).contains(&seconds) {
            return Err(DateError::range().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        Ok(Self(seconds))
    }

    /// Creates a new `FixedOffset` from hours and minutes east of UTC.
    ///
    /// The sign of `hours` applies to `minutes`.
    pub fn try_from_hours_minutes(hours: i64, minutes: i64) -> DateResult<Self> {
        let sign = if hours < 0 { -1 } else { 1 };
        let seconds = hours
            .checked_mul(3_600)
            .zip(minutes.checked_mul(sign * 60))
            .and_then(|(hours, minutes)| hours.checked_add(minutes))
            .ok_or_else(|| DateError::range().with_enum(ErrorMessage::OffsetOutOfRange))?;
        Self::try_from_seconds(seconds)
    }

    /// Returns the offset in seconds east of UTC.
    #[inline]
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.0
    }
}

impl LocalTimeZone for FixedOffset {
    fn offset_seconds_at(&self, _: i64) -> DateResult<i64> {
        Ok(self.0)
    }

    fn offset_seconds_for_local(&self, _: i64) -> DateResult<i64> {
        Ok(self.0)
    }
}
