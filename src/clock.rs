//! Wall-clock formatting helpers.

use chrono::{Datelike, NaiveDate};

/// Hour display convention.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HourStyle {
    /// 12-hour clock: 0 shows as 12, 13 as 1, and so on
    H12,
    /// 24-hour clock: hours pass through unchanged
    H24,
}

/// Map a wall-clock hour onto the displayed hour value.
pub fn display_hour(hour: u32, style: HourStyle) -> u32 {
    match style {
        HourStyle::H24 => hour,
        HourStyle::H12 => {
            let h = hour % 12;
            // Converts "0" to "12"
            if h == 0 {
                12
            } else {
                h
            }
        }
    }
}

/// Split a value into its rendered [tens, units] digits. Values of 100 or
/// more render only their last two digits.
pub fn split_digits(value: u32) -> [u8; 2] {
    let v = value % 100;
    [(v / 10) as u8, (v % 10) as u8]
}

/// Format a date as zero-padded `DD/MM` into the caller's buffer.
pub fn format_date(buf: &mut [u8], date: NaiveDate) -> &str {
    format_no_std::show(buf, format_args!("{:02}/{:02}", date.day(), date.month()))
        .unwrap_or_default()
}
