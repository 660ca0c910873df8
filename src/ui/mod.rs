//! UI definitions module

use crate::clock::HourStyle;

mod tileface;

pub use tileface::TileFace;

/// Face configuration, passed in by the embedding.
#[derive(Clone, Copy)]
pub struct Config {
    /// Hour display convention
    pub hour_style: HourStyle,
    /// Local offset from UTC in seconds
    pub utc_offset: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hour_style: HourStyle::H24,
            utc_offset: 3_600,
        }
    }
}

/// Battery state snapshot delivered by the battery service.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BatteryInfo {
    /// Battery percentage
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}
