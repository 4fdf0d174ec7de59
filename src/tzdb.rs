//! Time zones backed by TZif data.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536]. Parsing is handled by the `tzif` [crate][tzif-crate];
//! this module resolves UTC offsets from the parsed transition table and,
//! past the last transition, from the POSIX TZ string footer.
//!
//! Zone data is looked up by IANA identifier in the bundled `jiff-tzdb`
//! database, falling back to the host's zoneinfo directory.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use std::path::Path;
#[cfg(not(target_os = "windows"))]
use std::path::PathBuf;

use alloc::string::ToString;

use combine::Parser;
use date_equations::gregorian;
use num_traits::ToPrimitive;
use tzif::data::{
    posix::{PosixTzString, TransitionDay},
    time::Seconds,
    tzif::{DataBlock, TzifData},
};

use crate::{
    date_assert, error::ErrorMessage, tz::LocalTimeZone, DateError, DateResult, DateUnwrap,
    MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_DAY, MS_PER_SECOND,
};

#[cfg(not(target_os = "windows"))]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

const SECONDS_PER_DAY: i64 = 86_400;

/// A time zone resolved from TZif data.
///
/// ```rust
/// use datewise::{DateTime, TzifTimeZone};
///
/// let new_york = TzifTimeZone::from_identifier("America/New_York").unwrap();
/// let dt = DateTime::from_local_fields(1995, 11, 17, 3, 24, 0, 0, &new_york).unwrap();
/// assert_eq!(dt.to_string(), "1995-12-17T08:24:00.000Z");
/// ```
#[derive(Debug, Clone)]
pub struct TzifTimeZone {
    data_block: DataBlock,
    footer: Option<PosixTzString>,
}

impl TryFrom<TzifData> for TzifTimeZone {
    type Error = DateError;

    fn try_from(value: TzifData) -> Result<Self, Self::Error> {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;

        // Version 2+ files repeat the table with 64-bit transition times.
        let data_block = data_block2.unwrap_or(data_block1);

        let records = data_block.local_time_type_records.len();
        let valid_table = records > 0
            && data_block.transition_times.len() == data_block.transition_types.len()
            && data_block.transition_types.iter().all(|idx| *idx < records);
        let valid_footer = footer
            .as_ref()
            .and_then(|footer| footer.dst_info.as_ref())
            .map_or(true, |dst| {
                is_valid_transition_day(&dst.start_date.day)
                    && is_valid_transition_day(&dst.end_date.day)
            });
        if !valid_table || !valid_footer {
            return Err(illformed());
        }

        Ok(Self { data_block, footer })
    }
}

impl TzifTimeZone {
    /// Parses a time zone from the contents of a TZif file.
    pub fn from_bytes(data: &[u8]) -> DateResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(illformed());
        };
        Self::try_from(parse_result)
    }

    /// Reads and parses a TZif file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> DateResult<Self> {
        tzif::parse_tzif_file(path.as_ref())
            .map_err(|e| DateError::general(e.to_string()))
            .and_then(Self::try_from)
    }

    /// Loads the time zone for an IANA identifier, such as `Europe/Paris`.
    pub fn from_identifier(identifier: &str) -> DateResult<Self> {
        if let Some((_, data)) = jiff_tzdb::get(identifier) {
            return Self::from_bytes(data);
        }

        #[cfg(not(target_os = "windows"))]
        if is_relative_identifier(identifier) {
            let mut path = PathBuf::from(ZONEINFO_DIR);
            path.push(identifier);
            if path.is_file() {
                #[cfg(feature = "log")]
                log::debug!("Loading `{identifier}` from {}", path.display());
                return Self::from_path(&path);
            }
        }

        Err(DateError::range().with_message("Time zone identifier does not exist."))
    }

    /// Returns the POSIX TZ string footer, if the data has one.
    #[must_use]
    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    /// Returns the UTC offset of the local time type `idx` in the table.
    fn record_offset(&self, idx: usize) -> DateResult<i64> {
        let record = self.data_block.local_time_type_records.get(idx).date_unwrap()?;
        Ok(record.utoff.0)
    }

    /// Returns the UTC offset of the local time type that starts with the
    /// transition at `idx`.
    fn transition_offset(&self, idx: usize) -> DateResult<i64> {
        let record_idx = self.data_block.transition_types.get(idx).copied().date_unwrap()?;
        self.record_offset(record_idx)
    }

    fn footer_or_last_offset(&self, seconds: i64) -> DateResult<i64> {
        match &self.footer {
            Some(footer) => {
                #[cfg(feature = "log")]
                log::trace!("Resolving epoch second {seconds} with the POSIX TZ string");
                resolve_posix_tz_string(footer, seconds)
            }
            None => match self.data_block.transition_times.len() {
                0 => self.record_offset(0),
                len => self.transition_offset(len - 1),
            },
        }
    }
}

impl LocalTimeZone for TzifTimeZone {
    fn offset_seconds_at(&self, epoch_milliseconds: i64) -> DateResult<i64> {
        // Wall-clock lookups probe up to a day beyond the valid range.
        let limit = MS_MAX_INSTANT + 2 * MS_PER_DAY;
        if !(MS_MIN_INSTANT - 2 * MS_PER_DAY..=limit).contains(&epoch_milliseconds) {
            return Err(DateError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }

        let seconds = epoch_milliseconds.div_euclid(MS_PER_SECOND);
        let transitions = &self.data_block.transition_times;
        if transitions.is_empty() {
            return self.footer_or_last_offset(seconds);
        }

        match transitions.binary_search(&Seconds(seconds)) {
            Ok(idx) => self.transition_offset(idx),
            // Local time type 0 applies before the first transition.
            Err(0) => self.record_offset(0),
            Err(idx) if idx < transitions.len() => self.transition_offset(idx - 1),
            Err(_) => self.footer_or_last_offset(seconds),
        }
    }
}

fn illformed() -> DateError {
    DateError::general(ErrorMessage::IllformedTzif.to_str())
}

#[cfg(not(target_os = "windows"))]
fn is_relative_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .split('/')
            .all(|component| !component.is_empty() && component != "." && component != "..")
}

fn is_valid_transition_day(day: &TransitionDay) -> bool {
    match *day {
        TransitionDay::Mwd(month, week, weekday) => {
            (1..=12).contains(&month) && (1..=5).contains(&week) && weekday <= 6
        }
        TransitionDay::NoLeap(day) => (1..=365).contains(&day),
        TransitionDay::WithLeap(day) => day <= 365,
    }
}

/// Resolves the offset at `seconds` since the epoch from a POSIX TZ string.
///
/// A rule's start time is in standard local time and its end time in
/// daylight local time. The year is taken in standard local time.
fn resolve_posix_tz_string(posix_tz_string: &PosixTzString, seconds: i64) -> DateResult<i64> {
    // POSIX offsets are positive west of Greenwich.
    let std_offset = -posix_tz_string.std_info.offset.0;
    let Some(dst) = &posix_tz_string.dst_info else {
        return Ok(std_offset);
    };
    let dst_offset = -dst.variant_info.offset.0;

    let local_days = (seconds + std_offset).div_euclid(SECONDS_PER_DAY);
    let local_days = local_days
        .to_i32()
        .ok_or_else(|| DateError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
    let (year, _, _) = gregorian::ymd_from_epoch_days(local_days);

    let start =
        transition_epoch_seconds(year, &dst.start_date.day, dst.start_date.time.0)? - std_offset;
    let end = transition_epoch_seconds(year, &dst.end_date.day, dst.end_date.time.0)? - dst_offset;

    // Southern hemisphere rules end before they start within a year.
    let is_dst = if start <= end {
        start <= seconds && seconds < end
    } else {
        !(end <= seconds && seconds < start)
    };

    Ok(if is_dst { dst_offset } else { std_offset })
}

/// Returns the wall-clock epoch seconds of a rule transition in `year`.
fn transition_epoch_seconds(year: i32, day: &TransitionDay, time: i64) -> DateResult<i64> {
    let year_start = i64::from(gregorian::epoch_days_from_ymd(year, 1, 1));
    let epoch_days = match *day {
        // `Jn`: 1-based, February 29th is never counted.
        TransitionDay::NoLeap(day) => {
            let leap_day = i64::from(gregorian::is_leap_year(year) && day > 59);
            year_start + i64::from(day) - 1 + leap_day
        }
        // `n`: 0-based, February 29th is counted.
        TransitionDay::WithLeap(day) => year_start + i64::from(day),
        // `Mm.w.d`: week 5 is the last `d` day of the month.
        TransitionDay::Mwd(month, week, weekday) => {
            let month = month as u8;
            let first = gregorian::epoch_days_from_ymd(year, month, 1);
            let first_weekday = i64::from(gregorian::day_of_week(first));
            let days_in_month = i64::from(gregorian::days_in_month(year, month));

            let mut day_of_month =
                (i64::from(weekday) - first_weekday).rem_euclid(7) + (i64::from(week) - 1) * 7;
            if day_of_month >= days_in_month {
                day_of_month -= 7;
            }
            date_assert!(
                (0..days_in_month).contains(&day_of_month),
                "Transition day {day_of_month} is outside of month {month}"
            );
            i64::from(first) + day_of_month
        }
    };
    Ok(epoch_days * SECONDS_PER_DAY + time)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use date_equations::gregorian;
    use tzif::data::posix::TransitionDay;

    use super::{transition_epoch_seconds, TzifTimeZone};
    use crate::{error::ErrorKind, tz::LocalTimeZone, DateTime};

    fn instant(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> i64 {
        DateTime::from_utc_fields(year, month, day, hour, minute, 0, 0)
            .unwrap()
            .epoch_milliseconds()
    }

    fn epoch_seconds(year: i32, month: u8, day: u8, seconds: i64) -> i64 {
        i64::from(gregorian::epoch_days_from_ymd(year, month, day)) * 86_400 + seconds
    }

    #[test]
    fn new_york_offsets() {
        let new_york = TzifTimeZone::from_identifier("America/New_York").unwrap();
        let at = |ms| new_york.offset_seconds_at(ms).unwrap();

        assert_eq!(at(instant(2017, 0, 15, 12, 0)), -18_000);
        assert_eq!(at(instant(2017, 6, 15, 12, 0)), -14_400);
        // Before the epoch.
        assert_eq!(at(instant(1960, 6, 1, 12, 0)), -14_400);
        // Local mean time before the first transition.
        assert_eq!(at(instant(1800, 0, 1, 0, 0)), -17_762);
        // Resolved from the POSIX TZ string.
        assert_eq!(at(instant(2100, 0, 15, 12, 0)), -18_000);
        assert_eq!(at(instant(2100, 6, 15, 12, 0)), -14_400);
    }

    #[test]
    fn exactly_at_transition() {
        let new_york = TzifTimeZone::from_identifier("America/New_York").unwrap();
        let transition = instant(2017, 2, 12, 7, 0);
        assert_eq!(new_york.offset_seconds_at(transition).unwrap(), -14_400);
        assert_eq!(new_york.offset_seconds_at(transition - 1).unwrap(), -18_000);

        let transition = instant(2100, 2, 14, 7, 0);
        assert_eq!(new_york.offset_seconds_at(transition).unwrap(), -14_400);
        assert_eq!(new_york.offset_seconds_at(transition - 1).unwrap(), -18_000);
    }

    #[test]
    fn new_york_wall_clock() {
        let new_york = TzifTimeZone::from_identifier("America/New_York").unwrap();
        let local = |year, month, day, hour, minute| {
            DateTime::from_local_fields(year, month, day, hour, minute, 0, 0, &new_york)
                .unwrap()
                .to_string()
        };

        assert_eq!(local(1995, 11, 17, 3, 24), "1995-12-17T08:24:00.000Z");
        // 02:30 is skipped when clocks move forward.
        assert_eq!(local(2017, 2, 12, 2, 30), "2017-03-12T07:30:00.000Z");
        // 01:30 happens twice when clocks move back; the earlier wins.
        assert_eq!(local(2017, 10, 5, 1, 30), "2017-11-05T05:30:00.000Z");
        assert_eq!(local(2017, 10, 5, 2, 30), "2017-11-05T07:30:00.000Z");
        // The same cases in the POSIX TZ string range.
        assert_eq!(local(2100, 2, 14, 2, 30), "2100-03-14T07:30:00.000Z");
        assert_eq!(local(2100, 10, 7, 1, 30), "2100-11-07T05:30:00.000Z");

        let dt = DateTime::from_local_fields(2017, 6, 4, 9, 0, 0, 0, &new_york).unwrap();
        let fields = dt.local_fields(&new_york).unwrap();
        assert_eq!((fields.month, fields.day, fields.hour), (6, 4, 9));
    }

    #[test]
    fn sydney_offsets() {
        let sydney = TzifTimeZone::from_identifier("Australia/Sydney").unwrap();
        let at = |ms| sydney.offset_seconds_at(ms).unwrap();

        assert_eq!(at(instant(2017, 0, 15, 0, 0)), 39_600);
        assert_eq!(at(instant(2017, 6, 15, 0, 0)), 36_000);
        assert_eq!(at(instant(2100, 0, 15, 0, 0)), 39_600);
        assert_eq!(at(instant(2100, 6, 15, 0, 0)), 36_000);
        assert_eq!(at(instant(2100, 11, 31, 12, 0)), 39_600);
    }

    #[test]
    fn sydney_wall_clock() {
        let sydney = TzifTimeZone::from_identifier("Australia/Sydney").unwrap();
        // Clocks move forward from 02:00 to 03:00 on 2017-10-01.
        let dt = DateTime::from_local_fields(2017, 9, 1, 2, 30, 0, 0, &sydney).unwrap();
        assert_eq!(dt.to_string(), "2017-09-30T16:30:00.000Z");
        // Clocks move back from 03:00 to 02:00 on 2017-04-02.
        let dt = DateTime::from_local_fields(2017, 3, 2, 2, 30, 0, 0, &sydney).unwrap();
        assert_eq!(dt.to_string(), "2017-04-01T15:30:00.000Z");
    }

    #[test]
    fn posix_transition_days() {
        // M3.2.0: second Sunday of March.
        assert_eq!(
            transition_epoch_seconds(2017, &TransitionDay::Mwd(3, 2, 0), 7_200).unwrap(),
            epoch_seconds(2017, 3, 12, 7_200)
        );
        // M11.5.0: last Sunday of November.
        assert_eq!(
            transition_epoch_seconds(2017, &TransitionDay::Mwd(11, 5, 0), 0).unwrap(),
            epoch_seconds(2017, 11, 26, 0)
        );
        // M10.1.0: first Sunday of October.
        assert_eq!(
            transition_epoch_seconds(2100, &TransitionDay::Mwd(10, 1, 0), 7_200).unwrap(),
            epoch_seconds(2100, 10, 3, 7_200)
        );
        // J60 is March 1st in every year.
        assert_eq!(
            transition_epoch_seconds(2016, &TransitionDay::NoLeap(60), 0).unwrap(),
            epoch_seconds(2016, 3, 1, 0)
        );
        assert_eq!(
            transition_epoch_seconds(2017, &TransitionDay::NoLeap(60), 0).unwrap(),
            epoch_seconds(2017, 3, 1, 0)
        );
        // 59 is February 29th in a leap year.
        assert_eq!(
            transition_epoch_seconds(2016, &TransitionDay::WithLeap(59), 0).unwrap(),
            epoch_seconds(2016, 2, 29, 0)
        );
        assert_eq!(
            transition_epoch_seconds(2017, &TransitionDay::WithLeap(59), -3_600).unwrap(),
            epoch_seconds(2017, 3, 1, -3_600)
        );
    }

    #[test]
    fn unknown_identifiers() {
        let err = TzifTimeZone::from_identifier("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(TzifTimeZone::from_identifier("").is_err());
        assert!(TzifTimeZone::from_identifier("../etc/passwd").is_err());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn from_path_reads_zoneinfo() {
        use std::path::PathBuf;

        let err = TzifTimeZone::from_path("/nonexistent/zoneinfo/Nowhere").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);

        let path = PathBuf::from("/usr/share/zoneinfo/America/New_York");
        if !path.is_file() {
            return;
        }
        let new_york = TzifTimeZone::from_path(&path).unwrap();
        assert_eq!(new_york.offset_seconds_at(instant(2017, 0, 15, 12, 0)).unwrap(), -18_000);
        let new_york = TzifTimeZone::from_path(path).unwrap();
        assert_eq!(new_york.offset_seconds_at(instant(2017, 6, 15, 12, 0)).unwrap(), -14_400);
    }

    #[test]
    fn illformed_data() {
        let err = TzifTimeZone::from_bytes(b"not a tzif file").unwrap_err();
        assert_eq!(err.to_string(), "Error: Illformed TZif data.");
    }

    #[test]
    fn utc_zone() {
        let utc = TzifTimeZone::from_identifier("UTC").unwrap();
        assert_eq!(utc.offset_seconds_at(0).unwrap(), 0);
        assert_eq!(utc.offset_seconds_at(instant(2100, 0, 1, 0, 0)).unwrap(), 0);
    }
}
