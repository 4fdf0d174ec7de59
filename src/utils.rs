//! Formatting helpers shared by the `Writeable` implementations.

use writeable::Writeable;

/// Writes `num` with at least two digits.
pub(crate) fn write_padded_2<W: core::fmt::Write + ?Sized>(
    num: u64,
    sink: &mut W,
) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes `num` with at least three digits.
pub(crate) fn write_padded_3<W: core::fmt::Write + ?Sized>(
    num: u64,
    sink: &mut W,
) -> core::fmt::Result {
    if num < 10 {
        sink.write_str("00")?;
    } else if num < 100 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes an ISO 8601 year: four digits within 0..=9999, otherwise a
/// signed six digit extended year.
pub(crate) fn write_year<W: core::fmt::Write + ?Sized>(
    year: i32,
    sink: &mut W,
) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        return write_digits(u64::from(year.unsigned_abs()), 4, sink);
    }
    let sign = if year < 0 { '-' } else { '+' };
    sink.write_char(sign)?;
    write_digits(u64::from(year.unsigned_abs()), 6, sink)
}

fn write_digits<W: core::fmt::Write + ?Sized>(
    num: u64,
    width: u32,
    sink: &mut W,
) -> core::fmt::Result {
    let mut divisor = 10u64.pow(width - 1);
    while divisor > 1 && num < divisor {
        sink.write_char('0')?;
        divisor /= 10;
    }
    num.write_to(sink)
}
