//! This module implements `TimeSpan` and its `HH:mm:ss.sss` formatting.

use alloc::string::String;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{utils, DateTime, Sign, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// The elapsed time between two instants, in milliseconds.
///
/// `TimeSpan` displays as `HH:mm:ss.sss`. Hours widen past two digits for
/// spans of 100 hours or more, and negative spans are written as their
/// magnitude with a leading `-`.
///
/// ```rust
/// use datewise::TimeSpan;
///
/// assert_eq!(TimeSpan::from_milliseconds(19_210_453).to_string(), "05:20:10.453");
/// assert_eq!(TimeSpan::from_milliseconds(-1_500).to_string(), "-00:00:01.500");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    milliseconds: i64,
}

impl TimeSpan {
    /// Creates a new `TimeSpan` of `milliseconds`.
    #[inline]
    #[must_use]
    pub const fn from_milliseconds(milliseconds: i64) -> Self {
        Self { milliseconds }
    }

    /// Returns the `TimeSpan` of `end - start`.
    #[must_use]
    pub fn between(start: &DateTime, end: &DateTime) -> Self {
        // Both instants are within +/-8.64e15, so the difference cannot overflow.
        Self::from_milliseconds(end.epoch_milliseconds() - start.epoch_milliseconds())
    }

    /// Returns the signed length of the span in milliseconds.
    #[inline]
    #[must_use]
    pub const fn total_milliseconds(&self) -> i64 {
        self.milliseconds
    }

    /// Returns the sign of the span.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.milliseconds)
    }

    /// Returns the whole hours of the span's magnitude.
    #[inline]
    #[must_use]
    pub fn hours(&self) -> u64 {
        self.components().0
    }

    /// Returns the minutes component of the span's magnitude.
    #[inline]
    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.components().1
    }

    /// Returns the seconds component of the span's magnitude.
    #[inline]
    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.components().2
    }

    /// Returns the milliseconds component of the span's magnitude.
    #[inline]
    #[must_use]
    pub fn milliseconds(&self) -> u64 {
        self.components().3
    }

    /// Decomposes the magnitude with truncating division into
    /// (hours, minutes, seconds, milliseconds).
    fn components(&self) -> (u64, u64, u64, u64) {
        let dif = self.milliseconds.unsigned_abs();
        let (per_hour, per_minute, per_second) = (
            MS_PER_HOUR as u64,
            MS_PER_MINUTE as u64,
            MS_PER_SECOND as u64,
        );

        let hours = dif / per_hour;
        let minutes = (dif - hours * per_hour) / per_minute;
        let seconds = (dif - hours * per_hour - minutes * per_minute) / per_second;
        let milliseconds = dif.abs_diff(hours * per_hour + minutes * per_minute + seconds * per_second);
        (hours, minutes, seconds, milliseconds)
    }
}

impl Writeable for TimeSpan {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let (hours, minutes, seconds, milliseconds) = self.components();
        if self.sign() == Sign::Negative {
            sink.write_char('-')?;
        }
        utils::write_padded_2(hours, sink)?;
        sink.write_char(':')?;
        utils::write_padded_2(minutes, sink)?;
        sink.write_char(':')?;
        utils::write_padded_2(seconds, sink)?;
        sink.write_char('.')?;
        utils::write_padded_3(milliseconds, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let sign = usize::from(self.sign() == Sign::Negative);
        let hours = self.hours();
        if hours < 100 {
            return LengthHint::exact(12 + sign);
        }
        LengthHint::between(13 + sign, 23 + sign)
    }
}

impl_display_with_writeable!(TimeSpan);

/// Formats the time elapsed from `start` to `end` as `HH:mm:ss.sss`.
#[must_use]
pub fn time_span_to_string(start: &DateTime, end: &DateTime) -> String {
    TimeSpan::between(start, end).to_string()
}
