//! Compiled-in image resources.
//!
//! The bitmap tables are generated by the build script into `OUT_DIR`;
//! this module only maps symbolic identifiers onto them. Out-of-range
//! digit or tile indices resolve to `None` rather than an error.

use embedded_graphics::{image::ImageRaw, pixelcolor::BinaryColor};

/// Number of decorative tiles in the bundle.
pub const TILE_COUNT: usize = 20;

/// Borrowed handle to a compiled-in 1-bpp image.
pub type Bitmap = ImageRaw<'static, BinaryColor>;

/// Symbolic identifier for a bundled image.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResourceId {
    /// Large clock digit, 0-9
    HourDigit(u8),
    /// Small clock digit, 0-9
    MinuteDigit(u8),
    /// Decorative tile, 0-19
    Tile(u8),
    /// Charging status icon
    Charging,
    /// Bluetooth-lost status icon
    NoBluetooth,
    /// Full-screen backdrop
    Background,
    /// Battery gauge bar
    Gauge,
}

/// Raw bitmap entry emitted by the build script.
struct ImageData {
    width: u32,
    data: &'static [u8],
}

include!(concat!(env!("OUT_DIR"), "/bitmaps.rs"));

/// Resolve an identifier to its bitmap.
pub fn load(id: ResourceId) -> Option<Bitmap> {
    let entry = match id {
        ResourceId::HourDigit(d) => HOUR_DIGITS.get(d as usize)?,
        ResourceId::MinuteDigit(d) => MINUTE_DIGITS.get(d as usize)?,
        ResourceId::Tile(t) => TILES.get(t as usize)?,
        ResourceId::Charging => &ICON_CHARGING,
        ResourceId::NoBluetooth => &ICON_NO_BLUETOOTH,
        ResourceId::Background => &BACKGROUND,
        ResourceId::Gauge => &GAUGE,
    };
    Some(ImageRaw::new(entry.data, entry.width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn digits_and_tiles_resolve() {
        for d in 0..10 {
            assert!(load(ResourceId::HourDigit(d)).is_some());
            assert!(load(ResourceId::MinuteDigit(d)).is_some());
        }
        for t in 0..TILE_COUNT as u8 {
            assert!(load(ResourceId::Tile(t)).is_some());
        }
    }

    #[test]
    fn out_of_range_indices_resolve_to_none() {
        assert!(load(ResourceId::HourDigit(10)).is_none());
        assert!(load(ResourceId::MinuteDigit(255)).is_none());
        assert!(load(ResourceId::Tile(20)).is_none());
    }

    #[test]
    fn bitmap_dimensions_match_layout() {
        assert_eq!(load(ResourceId::HourDigit(0)).unwrap().size(), Size::new(20, 28));
        assert_eq!(load(ResourceId::MinuteDigit(0)).unwrap().size(), Size::new(10, 14));
        assert_eq!(load(ResourceId::Tile(0)).unwrap().size(), Size::new(32, 32));
        assert_eq!(load(ResourceId::Background).unwrap().size(), Size::new(144, 168));
        assert_eq!(load(ResourceId::Gauge).unwrap().size(), Size::new(119, 16));
    }
}
