//! Access to the host system's clock and time zone.

use alloc::string::String;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::{tz::LocalTimeZone, tzdb::TzifTimeZone, DateError, DateResult};

/// The host system's time zone.
///
/// The zone is resolved from the host's IANA identifier when it is created.
/// If the host zone cannot be determined or loaded, it behaves as UTC.
#[derive(Debug, Clone)]
pub struct SystemTimeZone {
    identifier: Option<String>,
    zone: Option<TzifTimeZone>,
}

impl Default for SystemTimeZone {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimeZone {
    /// Resolves the host's time zone.
    #[must_use]
    pub fn new() -> Self {
        let resolved = get_system_tz_identifier().and_then(|identifier| {
            let zone = TzifTimeZone::from_identifier(&identifier)?;
            Ok((identifier, zone))
        });

        match resolved {
            Ok((identifier, zone)) => Self {
                identifier: Some(identifier),
                zone: Some(zone),
            },
            Err(_e) => {
                #[cfg(feature = "log")]
                log::warn!("Falling back to UTC for the system time zone: {_e}");
                Self {
                    identifier: None,
                    zone: None,
                }
            }
        }
    }

    /// Returns the host's IANA identifier, or `None` when the host zone
    /// could not be resolved.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl LocalTimeZone for SystemTimeZone {
    fn offset_seconds_at(&self, epoch_milliseconds: i64) -> DateResult<i64> {
        match &self.zone {
            Some(zone) => zone.offset_seconds_at(epoch_milliseconds),
            None => Ok(0),
        }
    }

    fn offset_seconds_for_local(&self, local_milliseconds: i64) -> DateResult<i64> {
        match &self.zone {
            Some(zone) => zone.offset_seconds_for_local(local_milliseconds),
            None => Ok(0),
        }
    }
}

/// Returns the host's IANA time zone identifier.
#[inline]
pub(crate) fn get_system_tz_identifier() -> DateResult<String> {
    iana_time_zone::get_timezone()
        .map_err(|_| DateError::general("Error fetching the system time zone"))
}

/// Returns the system time in milliseconds since the epoch.
pub(crate) fn get_system_milliseconds() -> DateResult<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| DateError::general("Error fetching system time"))
        .and_then(|d| {
            i64::try_from(d.as_millis())
                .map_err(|_| DateError::range().with_message("System time is out of range."))
        })
}
