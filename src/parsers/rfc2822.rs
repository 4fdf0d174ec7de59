//! RFC 2822 date parsing.

use alloc::vec::Vec;

use super::{month_index, parse_integer, weekday_index};
use crate::{
    error::ErrorMessage, tz::LocalTimeZone, DateError, DateResult, DateTime, Sign,
};

/// Parses an RFC 2822 date, resolving dates without a zone in the host's
/// time zone.
///
/// See [`parse_rfc2822_with_time_zone`] for the accepted forms.
#[cfg(feature = "sys")]
pub fn parse_rfc2822(source: &str) -> DateResult<DateTime> {
    parse_rfc2822_with_time_zone(source, &crate::sys::SystemTimeZone::new())
}

/// Parses an RFC 2822 date.
///
/// Two layouts are accepted:
///
///   - `[<Weekday>,] <Day> <Month> <Year> <HH:MM[:SS]> [<Zone>]`
///   - `<Month> <Day>, <Year> <HH:MM[:SS]> [<Zone>]`
///
/// Month and weekday names are English, full or abbreviated, in any case.
/// The zone may be `GMT`, `UT`, `UTC` or `Z`, a numeric offset such as
/// `+0100`, `-05` or `GMT+01`, or one of the North American zone
/// abbreviations. A trailing parenthesized comment is ignored.
///
/// A date with a zone is an instant; a date without one is wall-clock time
/// in `time_zone`.
///
/// ```rust
/// use datewise::{parse_rfc2822_with_time_zone, FixedOffset, Utc};
///
/// let dt = parse_rfc2822_with_time_zone("Tue, 26 Jan 2016 13:48:02 GMT", &Utc).unwrap();
/// assert_eq!(dt.to_string(), "2016-01-26T13:48:02.000Z");
///
/// let est = FixedOffset::try_from_hours_minutes(-5, 0).unwrap();
/// let dt = parse_rfc2822_with_time_zone("December 17, 1995 03:24:00", &est).unwrap();
/// assert_eq!(dt.to_string(), "1995-12-17T08:24:00.000Z");
/// ```
pub fn parse_rfc2822_with_time_zone(
    source: &str,
    time_zone: &impl LocalTimeZone,
) -> DateResult<DateTime> {
    let tokens: Vec<&str> = source
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .take_while(|token| !token.starts_with('('))
        .collect();

    let layout = Layout::resolve(&tokens)?;
    let fields = layout.fields();
    let zone = Zone::parse(fields.zone)?;

    #[cfg(feature = "log")]
    log::trace!("Resolved RFC 2822 date `{source}` as {layout:?} in {zone:?}");

    let day = parse_integer(fields.day, "day")?;
    let month = month_index(fields.month)
        .ok_or_else(|| DateError::syntax().with_message("Unknown month name."))?;
    let year = parse_year(fields.year)?;
    let (hour, minute, second) = parse_time(fields.time)?;

    match zone {
        Zone::Local => {
            DateTime::from_local_fields(year, month, day, hour, minute, second, 0, time_zone)
        }
        Zone::Offset(offset_minutes) => DateTime::from_utc_fields(
            year,
            month,
            day,
            hour,
            minute.saturating_sub(offset_minutes),
            second,
            0,
        ),
    }
}

/// The token layout of an RFC 2822 date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout<'a> {
    /// `[<Weekday>] <Day> <Month> <Year> <Time> [<Zone>]`
    DayFirst {
        weekday: Option<u8>,
        fields: Fields<'a>,
    },
    /// `<Month> <Day> <Year> <Time> [<Zone>]`
    MonthFirst(Fields<'a>),
}

/// The unparsed fields of an RFC 2822 date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields<'a> {
    day: &'a str,
    month: &'a str,
    year: &'a str,
    time: &'a str,
    zone: &'a [&'a str],
}

impl<'a> Fields<'a> {
    fn new(
        day: &'a str,
        month: &'a str,
        year: &'a str,
        time: &'a str,
        zone: &'a [&'a str],
    ) -> Self {
        Self {
            day,
            month,
            year,
            time,
            zone,
        }
    }
}

impl<'a> Layout<'a> {
    fn resolve(tokens: &'a [&'a str]) -> DateResult<Self> {
        let unknown = || DateError::syntax().with_enum(ErrorMessage::UnknownRfc2822Layout);
        let first = tokens.first().ok_or_else(unknown)?;

        if let Some(weekday) = weekday_index(first) {
            let [day, month, year, time, zone @ ..] = &tokens[1..] else {
                return Err(unknown());
            };
            return Ok(Self::DayFirst {
                weekday: Some(weekday),
                fields: Fields::new(day, month, year, time, zone),
            });
        }

        match tokens {
            [month, day, year, time, zone @ ..] if month_index(month).is_some() => {
                Ok(Self::MonthFirst(Fields::new(day, month, year, time, zone)))
            }
            [day, month, year, time, zone @ ..] if day.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(Self::DayFirst {
                    weekday: None,
                    fields: Fields::new(day, month, year, time, zone),
                })
            }
            _ => Err(unknown()),
        }
    }

    fn fields(&self) -> Fields<'a> {
        match self {
            Self::DayFirst { fields, .. } | Self::MonthFirst(fields) => *fields,
        }
    }
}

/// The zone of an RFC 2822 date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// No zone was given.
    Local,
    /// A UTC offset in minutes east of UTC.
    Offset(i64),
}

impl Zone {
    fn parse(tokens: &[&str]) -> DateResult<Self> {
        match tokens {
            [] => Ok(Self::Local),
            [zone] => parse_zone(zone).map(Self::Offset),
            // `GMT +0100`
            [utc, offset] if strip_utc_name(utc) == Some("") => {
                parse_numeric_offset(offset).map(Self::Offset)
            }
            _ => Err(DateError::syntax().with_enum(ErrorMessage::UnknownZone)),
        }
    }
}

fn strip_utc_name(token: &str) -> Option<&str> {
    ["GMT", "UTC", "UT", "Z"].iter().find_map(|name| {
        let prefix = token.get(..name.len())?;
        prefix
            .eq_ignore_ascii_case(name)
            .then(|| &token[name.len()..])
    })
}

/// Returns the offset of a single zone token in minutes east of UTC.
fn parse_zone(token: &str) -> DateResult<i64> {
    if let Some(rest) = strip_utc_name(token) {
        if rest.is_empty() {
            return Ok(0);
        }
        return parse_numeric_offset(rest);
    }

    if token.starts_with(['+', '-']) {
        return parse_numeric_offset(token);
    }

    const NORTH_AMERICAN: [(&str, i64); 8] = [
        ("EST", -5),
        ("EDT", -4),
        ("CST", -6),
        ("CDT", -5),
        ("MST", -7),
        ("MDT", -6),
        ("PST", -8),
        ("PDT", -7),
    ];
    NORTH_AMERICAN
        .iter()
        .find(|(name, _)| token.eq_ignore_ascii_case(name))
        .map(|(_, hours)| hours * 60)
        .ok_or_else(|| DateError::syntax().with_enum(ErrorMessage::UnknownZone))
}

/// Parses `[+-]HH` or `[+-]HHMM` into minutes east of UTC.
fn parse_numeric_offset(token: &str) -> DateResult<i64> {
    let (sign, digits) = match token.as_bytes().first() {
        Some(b'-') => (Sign::Negative, &token[1..]),
        Some(b'+') => (Sign::Positive, &token[1..]),
        _ => (Sign::Positive, token),
    };
    let invalid = || DateError::syntax().with_enum(ErrorMessage::InvalidOffset);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits, "00"),
        4 => digits.split_at(2),
        _ => return Err(invalid()),
    };
    let hours = parse_integer(hours, "offset hours").map_err(|_| invalid())?;
    let minutes = parse_integer(minutes, "offset minutes").map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    Ok(sign.as_sign_multiplier() * (hours * 60 + minutes))
}

/// Parses a year, widening obsolete two and three digit years.
fn parse_year(token: &str) -> DateResult<i64> {
    let year = parse_integer(token, "year")?;
    Ok(match token.len() {
        2 if year < 50 => year + 2000,
        2 | 3 => year + 1900,
        _ => year,
    })
}

/// Parses `HH:MM` or `HH:MM:SS`.
fn parse_time(token: &str) -> DateResult<(i64, i64, i64)> {
    let invalid = || DateError::syntax().with_enum(ErrorMessage::InvalidTime);
    let mut parts = token.split(':');
    let hour = parts.next().ok_or_else(invalid)?;
    let minute = parts.next().ok_or_else(invalid)?;
    let second = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let second = match second {
        Some(second) => parse_integer(second, "second")?,
        None => 0,
    };
    Ok((
        parse_integer(hour, "hour")?,
        parse_integer(minute, "minute")?,
        second,
    ))
}

#[cfg(test)]
mod tests {
    use super::{parse_numeric_offset, parse_rfc2822_with_time_zone, Layout};
    use crate::{error::ErrorKind, FixedOffset, Utc};

    #[test]
    fn gmt_dates() {
        let dt = parse_rfc2822_with_time_zone("Tue, 26 Jan 2016 13:48:02 GMT", &Utc).unwrap();
        assert_eq!(dt.to_string(), "2016-01-26T13:48:02.000Z");
        assert_eq!(dt.epoch_milliseconds(), 1_453_816_082_000);

        // The local zone does not apply to a date with a zone.
        let cet = FixedOffset::try_from_seconds(3_600).unwrap();
        let in_cet = parse_rfc2822_with_time_zone("Tue, 26 Jan 2016 13:48:02 GMT", &cet).unwrap();
        assert_eq!(in_cet, dt);
    }

    #[test]
    fn numeric_zones() {
        let parse = |s| {
            parse_rfc2822_with_time_zone(s, &Utc)
                .unwrap()
                .to_string()
        };
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 GMT+01"),
            "2016-01-26T12:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 GMT-05"),
            "2016-01-26T18:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 +0130"),
            "2016-01-26T12:18:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 -0500"),
            "2016-01-26T18:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 GMT +0100"),
            "2016-01-26T12:48:02.000Z"
        );
        // The offset can move the date.
        assert_eq!(
            parse("Fri, 01 Jan 2016 00:30:00 +0100"),
            "2015-12-31T23:30:00.000Z"
        );
    }

    #[test]
    fn named_zones() {
        let parse = |s| {
            parse_rfc2822_with_time_zone(s, &Utc)
                .unwrap()
                .to_string()
        };
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 UT"),
            "2016-01-26T13:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 utc"),
            "2016-01-26T13:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 EST"),
            "2016-01-26T18:48:02.000Z"
        );
        assert_eq!(
            parse("Tue, 26 Jan 2016 13:48:02 PDT"),
            "2016-01-26T20:48:02.000Z"
        );
    }

    #[test]
    fn month_first_dates_are_local() {
        let dt = parse_rfc2822_with_time_zone("December 17, 1995 03:24:00", &Utc).unwrap();
        assert_eq!(dt.to_string(), "1995-12-17T03:24:00.000Z");

        let est = FixedOffset::try_from_hours_minutes(-5, 0).unwrap();
        let dt = parse_rfc2822_with_time_zone("December 17, 1995 03:24:00", &est).unwrap();
        assert_eq!(dt.to_string(), "1995-12-17T08:24:00.000Z");
        let local = dt.local_fields(&est).unwrap();
        assert_eq!(
            (local.year, local.month, local.day, local.hour, local.minute),
            (1995, 11, 17, 3, 24)
        );
    }

    #[test]
    fn day_first_dates_without_zone_are_local() {
        let cet = FixedOffset::try_from_seconds(3_600).unwrap();
        let dt = parse_rfc2822_with_time_zone("Tue, 26 Jan 2016 13:48:02", &cet).unwrap();
        assert_eq!(dt.to_string(), "2016-01-26T12:48:02.000Z");
        let local = dt.local_fields(&cet).unwrap();
        assert_eq!((local.day, local.hour, local.minute), (26, 13, 48));

        // Without a weekday.
        let est = FixedOffset::try_from_hours_minutes(-5, 0).unwrap();
        let dt = parse_rfc2822_with_time_zone("26 Jan 2016 13:48:02", &est).unwrap();
        assert_eq!(dt.to_string(), "2016-01-26T18:48:02.000Z");

        // The zone applies across midnight.
        let dt = parse_rfc2822_with_time_zone("Sat, 31 Dec 2016 23:30", &est).unwrap();
        assert_eq!(dt.to_string(), "2017-01-01T04:30:00.000Z");
    }

    #[test]
    fn may_is_a_month() {
        let dt = parse_rfc2822_with_time_zone("May 4, 2016 10:00", &Utc).unwrap();
        assert_eq!(dt.to_string(), "2016-05-04T10:00:00.000Z");
    }

    #[test]
    fn optional_weekday_and_comment() {
        let dt = parse_rfc2822_with_time_zone("26 Jan 2016 13:48:02 GMT", &Utc).unwrap();
        assert_eq!(dt.to_string(), "2016-01-26T13:48:02.000Z");

        let dt =
            parse_rfc2822_with_time_zone("Fri, 21 Nov 1997 09:55:06 -0600 (CST)", &Utc).unwrap();
        assert_eq!(dt.to_string(), "1997-11-21T15:55:06.000Z");

        let dt = parse_rfc2822_with_time_zone("Thursday, 1 january 2015 00:00 gmt", &Utc).unwrap();
        assert_eq!(dt.to_string(), "2015-01-01T00:00:00.000Z");
    }

    #[test]
    fn obsolete_years() {
        let parse = |s| {
            parse_rfc2822_with_time_zone(s, &Utc)
                .unwrap()
                .to_string()
        };
        assert_eq!(
            parse("Fri, 21 Nov 97 09:55:06 GMT"),
            "1997-11-21T09:55:06.000Z"
        );
        assert_eq!(
            parse("Thu, 1 Jan 15 00:00:00 GMT"),
            "2015-01-01T00:00:00.000Z"
        );
        assert_eq!(
            parse("Sat, 1 Jan 100 00:00:00 GMT"),
            "2000-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn layouts() {
        let tokens = ["Tue", "26", "Jan", "2016", "13:48:02", "GMT"];
        assert!(matches!(
            Layout::resolve(&tokens).unwrap(),
            Layout::DayFirst {
                weekday: Some(2),
                ..
            }
        ));
        let tokens = ["Jan", "26", "2016", "13:48:02"];
        let layout = Layout::resolve(&tokens).unwrap();
        assert!(matches!(layout, Layout::MonthFirst(_)));
        assert_eq!(layout.fields().day, "26");
        assert!(layout.fields().zone.is_empty());
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_numeric_offset("+0100").unwrap(), 60);
        assert_eq!(parse_numeric_offset("-0530").unwrap(), -330);
        assert_eq!(parse_numeric_offset("01").unwrap(), 60);
        assert!(parse_numeric_offset("+1").is_err());
        assert!(parse_numeric_offset("+0160").is_err());
        assert!(parse_numeric_offset("+01:00").is_err());
    }

    #[test]
    fn syntax_errors() {
        for source in [
            "",
            "hello world",
            "Tue, 26 Jan 2016",
            "Tue, 26 Foo 2016 13:48:02 GMT",
            "Tue, xx Jan 2016 13:48:02 GMT",
            "Tue, 26 Jan 2016 13-48-02 GMT",
            "Tue, 26 Jan 2016 13:48:02:01 GMT",
            "Tue, 26 Jan 2016 13:48:02 GMT+1",
            "Tue, 26 Jan 2016 13:48:02 XYZ",
            "Tue, 26 Jan 2016 13:48:02 GMT +0100 extra",
        ] {
            let err = parse_rfc2822_with_time_zone(source, &Utc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{source}");
        }
    }

    #[test]
    fn out_of_range_dates() {
        let err = parse_rfc2822_with_time_zone("Tue, 26 Jan 300000 13:48:02 GMT", &Utc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[cfg(feature = "sys")]
    #[test]
    fn host_zone() {
        use crate::{parsers::parse_rfc2822, SystemTimeZone};

        let dt = parse_rfc2822("Tue, 26 Jan 2016 13:48:02 GMT").unwrap();
        assert_eq!(dt.epoch_milliseconds(), 1_453_816_082_000);

        let local = parse_rfc2822("December 17, 1995 03:24:00").unwrap();
        let fields = local.local_fields(&SystemTimeZone::new()).unwrap();
        assert_eq!(
            (fields.year, fields.month, fields.day, fields.hour, fields.minute),
            (1995, 11, 17, 3, 24)
        );
    }
}
