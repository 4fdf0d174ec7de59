use crate::{error::ErrorMessage, DateError, DateResult, MS_PER_DAY};

/// Milliseconds since 1970-01-01T00:00:00Z, validated to be within
/// +/-100,000,000 days of the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct EpochMilliseconds(pub(crate) i64);

impl TryFrom<i64> for EpochMilliseconds {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let result = Self(value);
        result.check_validity()?;
        Ok(result)
    }
}

impl EpochMilliseconds {
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn check_validity(&self) -> DateResult<()> {
        if !is_valid_epoch_millis(&self.0) {
            return Err(DateError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(())
    }

    /// Returns the day number relative to the epoch.
    pub(crate) fn epoch_days(&self) -> i64 {
        self.0.div_euclid(MS_PER_DAY)
    }

    /// Returns the milliseconds elapsed since the start of the day.
    pub(crate) fn ms_in_day(&self) -> i64 {
        self.0.rem_euclid(MS_PER_DAY)
    }
}

/// Utility for determining if the millis are within a valid range.
#[inline]
#[must_use]
pub(crate) fn is_valid_epoch_millis(millis: &i64) -> bool {
    (crate::MS_MIN_INSTANT..=crate::MS_MAX_INSTANT).contains(millis)
}
