// NOTE: The supported year range is [-271_821, 275_760], which is an
// epoch day range of epoch_days.abs() <= 100_000_001.
//
// Both directions shift into a positive computational calendar before
// applying the equations, since the divisions below truncate.

const EPOCH_COMPUTATIONAL_RATA_DIE: i32 = 719_468;

const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;
const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39 constant
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16 constant

const SHIFTS: i32 = 680;
const YEAR_SHIFT: i32 = 400 * SHIFTS;
const RATA_DIE_SHIFT: i32 = EPOCH_COMPUTATIONAL_RATA_DIE + DAYS_IN_A_400Y_CYCLE as i32 * SHIFTS;

/// Returns the computational Rata Die for a Gregorian date.
///
/// The computational calendar starts on March 1st of year 0, so this is
/// only valid for dates on or after 0000-03-01.
#[must_use]
pub const fn rata_die_from_gregorian_date(year: i32, month: u8, day: u8) -> i32 {
    let j = (month <= 2) as i32;
    let computational_year = year - j;
    let computational_month = month as i32 + 12 * j;
    let computational_day = day as i32 - 1;
    let century = computational_year / 100;

    let y_star = 1461 * computational_year / 4 - century + century / 4;
    let m_star = (979 * computational_month - 2919) / 32;
    y_star + m_star + computational_day
}

/// Returns the number of days since 1970-01-01 for a Gregorian date.
#[must_use]
pub const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i32 {
    rata_die_from_gregorian_date(year + YEAR_SHIFT, month, day) - RATA_DIE_SHIFT
}

/// Returns the Gregorian (year, month, day) for a computational Rata Die.
#[must_use]
pub const fn gregorian_ymd(rata_die: u32) -> (i32, u8, u8) {
    // Century and day of the century.
    let n_one = 4 * rata_die + 3;
    let century = n_one / DAYS_IN_A_400Y_CYCLE;

    // Year of the century and day of the year.
    let n_two = (n_one % DAYS_IN_A_400Y_CYCLE) | 3;
    let year_of_century = ((376_287_347 * n_two as u64) / TWO_POWER_THIRTY_NINE) as u32;
    let day_of_year = (n_two - 1461 * year_of_century) / 4;

    // Month and day in the computational calendar.
    let n_three = 2141 * day_of_year + 197_913;
    let month = n_three / TWO_POWER_SIXTEEN;
    let day = (n_three % TWO_POWER_SIXTEEN) / 2141;

    // Map January and February back into the following Gregorian year.
    let j = (day_of_year >= 306) as u32;
    let year = 100 * century + year_of_century + j;
    ((year as i32), (month - 12 * j) as u8, (day + 1) as u8)
}

/// Returns the Gregorian (year, month, day) for a number of days since
/// 1970-01-01.
#[must_use]
pub const fn gregorian_ymd_from_epoch_days(epoch_days: i32) -> (i32, u8, u8) {
    let (year, month, day) = gregorian_ymd((epoch_days + RATA_DIE_SHIFT) as u32);
    (year - YEAR_SHIFT, month, day)
}
