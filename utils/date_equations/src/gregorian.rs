/// Gregorian Date Calculations
///
/// ## Extending Neri-Schneider shift window
///
/// Neri-Schneider calculated their equations for a Rata Die shift of 82,
/// which does not cover the full ECMAScript date range of +/-100,000,000
/// days around the epoch. The shift used here is 680 400-year cycles.
///
/// | Significant Date | Computational Rata Die | Rata Die Shift
/// | -----------------|------------------------|-----------------|
/// | April 19, -271_821 | -99,280,532 | 65,429 |
/// | January 1, 1970 | 719,468 | 100,065,428 |
/// | September 14, 275,760 | 100_719_469 | 200,065,429 |
///
pub mod neri_schneider;

pub use neri_schneider::{
    epoch_days_from_gregorian_date as epoch_days_from_ymd,
    gregorian_ymd_from_epoch_days as ymd_from_epoch_days, rata_die_from_gregorian_date,
};

/// Returns whether `year` is a Gregorian leap year.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Returns the number of days in `month` (1-12) of `year`.
#[must_use]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the day of the week for an epoch day, where 0 is Sunday.
///
/// 1970-01-01 was a Thursday.
#[inline]
#[must_use]
pub const fn day_of_week(epoch_days: i32) -> u8 {
    (epoch_days + 4).rem_euclid(7) as u8
}
