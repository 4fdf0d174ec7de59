//! The angle between the hands of an analog clock.

use core::f64::consts::PI;

use core_maths::CoreFloat;

use crate::DateTime;

/// Returns the angle, in degrees, between the hour and minute hands of an
/// analog clock showing the UTC time of `date_time`.
///
/// Seconds are ignored. Angles above 180 degrees are measured the other
/// way around the dial; a negative raw angle keeps its magnitude.
#[must_use]
pub fn angle_between_clock_hands_degrees(date_time: &DateTime) -> f64 {
    let fields = date_time.utc_fields();
    let hour = if fields.hour > 12 {
        fields.hour - 12
    } else {
        fields.hour
    };
    let minute = f64::from(fields.minute);

    let raw = (f64::from(hour) + minute / 60.0) * 30.0 - minute * 6.0;
    let angle = if raw > 180.0 { 360.0 - raw } else { raw };
    CoreFloat::abs(angle)
}

/// Returns the angle, in radians, between the hour and minute hands of an
/// analog clock showing the UTC time of `date_time`.
///
/// ```rust
/// use core::f64::consts::PI;
/// use datewise::{angle_between_clock_hands, DateTime};
///
/// let three = DateTime::from_utc_fields(2016, 0, 1, 3, 0, 0, 0).unwrap();
/// assert!((angle_between_clock_hands(&three) - PI / 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn angle_between_clock_hands(date_time: &DateTime) -> f64 {
    angle_between_clock_hands_degrees(date_time) * PI / 180.0
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use core_maths::CoreFloat;

    use super::{angle_between_clock_hands, angle_between_clock_hands_degrees};
    use crate::DateTime;

    const EPSILON: f64 = 1e-9;

    fn at(hour: i64, minute: i64) -> DateTime {
        DateTime::from_utc_fields(2016, 0, 19, hour, minute, 0, 0).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            CoreFloat::abs(actual - expected) < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn quarter_hours() {
        assert_close(angle_between_clock_hands(&at(0, 0)), 0.0);
        assert_close(angle_between_clock_hands(&at(3, 0)), PI / 2.0);
        assert_close(angle_between_clock_hands(&at(18, 0)), PI);
        assert_close(angle_between_clock_hands(&at(21, 0)), PI / 2.0);
    }

    #[test]
    fn noon_keeps_hour_twelve() {
        assert_close(angle_between_clock_hands_degrees(&at(12, 0)), 0.0);
        assert_close(angle_between_clock_hands_degrees(&at(13, 0)), 30.0);
    }

    #[test]
    fn minutes_move_both_hands() {
        // 3:30: the hour hand sits at 105 degrees, the minute hand at 180.
        assert_close(angle_between_clock_hands_degrees(&at(3, 30)), 75.0);
        // 9:00 reflects 270 degrees.
        assert_close(angle_between_clock_hands_degrees(&at(9, 0)), 90.0);
    }

    #[test]
    fn negative_raw_angles_are_not_reflected() {
        // (1 + 50/60) * 30 - 300 = -245
        assert_close(angle_between_clock_hands_degrees(&at(1, 50)), 245.0);
    }

    #[test]
    fn seconds_are_ignored() {
        let dt = DateTime::from_utc_fields(2016, 0, 19, 3, 0, 59, 999).unwrap();
        assert_close(angle_between_clock_hands_degrees(&dt), 90.0);
    }
}
