//! Slot bookkeeping for the digit and tile pools.
//!
//! A slot is a fixed on-screen position holding at most one image. The two
//! pools are disjoint: four digit slots (hour tens/units, minute tens/units)
//! and three tile slots along the bottom row. `occupy` silently rejects
//! out-of-range indices, out-of-domain values and already-occupied slots;
//! every value change is a release-then-occupy pair, never an in-place swap.

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::resources::{self, ResourceId, TILE_COUNT};
use crate::screen::{LayerContent, LayerId, Screen};

/// Digit slots: 0,1 hour tens/units; 2,3 minute tens/units.
pub const DIGIT_SLOT_COUNT: usize = 4;
/// Visible tile slots along the bottom row.
pub const TILE_SLOT_COUNT: usize = 3;

/// Occupant of a tile slot. Status markers are their own variants rather
/// than out-of-domain tile indices, so the shuffle can recognize a pinned
/// slot without magic numbers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileOccupant {
    /// Decorative tile, 0-19
    Tile(u8),
    /// Pinned: battery is charging
    Charging,
    /// Pinned: Bluetooth link lost
    NoBluetooth,
}

impl TileOccupant {
    /// Whether this occupant pins its slot against the shuffle.
    pub fn is_status(self) -> bool {
        !matches!(self, TileOccupant::Tile(_))
    }

    fn resource(self) -> ResourceId {
        match self {
            TileOccupant::Tile(t) => ResourceId::Tile(t),
            TileOccupant::Charging => ResourceId::Charging,
            TileOccupant::NoBluetooth => ResourceId::NoBluetooth,
        }
    }
}

/// One slot: occupant value plus the layer holding its bitmap.
/// Invariant: `occupant` is set iff `layer` is set.
struct Slot<T: Copy> {
    occupant: Option<T>,
    layer: Option<LayerId>,
}

impl<T: Copy> Slot<T> {
    const EMPTY: Slot<T> = Slot {
        occupant: None,
        layer: None,
    };
}

/// The four clock digit slots.
pub struct DigitSlots {
    slots: [Slot<u8>; DIGIT_SLOT_COUNT],
}

impl DigitSlots {
    pub fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; DIGIT_SLOT_COUNT],
        }
    }

    /// Load a digit image into a slot and attach it to the screen.
    /// No-op if the slot index or digit is out of range, or the slot is
    /// already occupied.
    pub fn occupy(&mut self, screen: &mut Screen, index: usize, digit: u8) {
        if index >= DIGIT_SLOT_COUNT || digit > 9 {
            return;
        }
        if self.slots[index].occupant.is_some() {
            return;
        }
        let id = if index < 2 {
            ResourceId::HourDigit(digit)
        } else {
            ResourceId::MinuteDigit(digit)
        };
        let Some(bitmap) = resources::load(id) else {
            return;
        };
        let frame = Rectangle::new(digit_origin(index), bitmap.size());
        let Some(layer) = screen.attach(frame, LayerContent::Image(bitmap)) else {
            return;
        };
        self.slots[index] = Slot {
            occupant: Some(digit),
            layer: Some(layer),
        };
    }

    /// Detach and drop a slot's image; no-op on an empty slot.
    pub fn release(&mut self, screen: &mut Screen, index: usize) {
        if index >= DIGIT_SLOT_COUNT {
            return;
        }
        let slot = &mut self.slots[index];
        if let Some(layer) = slot.layer.take() {
            screen.detach(layer);
        }
        slot.occupant = None;
    }

    pub fn release_all(&mut self, screen: &mut Screen) {
        for index in 0..DIGIT_SLOT_COUNT {
            self.release(screen, index);
        }
    }

    pub fn occupant(&self, index: usize) -> Option<u8> {
        self.slots.get(index)?.occupant
    }
}

impl Default for DigitSlots {
    fn default() -> Self {
        Self::new()
    }
}

/// The three decorative/status tile slots.
pub struct TileSlots {
    slots: [Slot<TileOccupant>; TILE_SLOT_COUNT],
}

impl TileSlots {
    pub fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; TILE_SLOT_COUNT],
        }
    }

    /// Load a tile or status image into a slot. Same silent rejection rules
    /// as the digit pool; tile indices must be below [`TILE_COUNT`].
    pub fn occupy(&mut self, screen: &mut Screen, index: usize, occupant: TileOccupant) {
        if index >= TILE_SLOT_COUNT {
            return;
        }
        if let TileOccupant::Tile(t) = occupant {
            if t as usize >= TILE_COUNT {
                return;
            }
        }
        if self.slots[index].occupant.is_some() {
            return;
        }
        let Some(bitmap) = resources::load(occupant.resource()) else {
            return;
        };
        let frame = Rectangle::new(tile_origin(index), bitmap.size());
        let Some(layer) = screen.attach(frame, LayerContent::Image(bitmap)) else {
            return;
        };
        self.slots[index] = Slot {
            occupant: Some(occupant),
            layer: Some(layer),
        };
    }

    /// Detach and drop a slot's image; no-op on an empty slot.
    pub fn release(&mut self, screen: &mut Screen, index: usize) {
        if index >= TILE_SLOT_COUNT {
            return;
        }
        let slot = &mut self.slots[index];
        if let Some(layer) = slot.layer.take() {
            screen.detach(layer);
        }
        slot.occupant = None;
    }

    pub fn release_all(&mut self, screen: &mut Screen) {
        for index in 0..TILE_SLOT_COUNT {
            self.release(screen, index);
        }
    }

    pub fn occupant(&self, index: usize) -> Option<TileOccupant> {
        self.slots.get(index)?.occupant
    }

    /// Whether the slot currently shows a status icon and must be skipped
    /// by the shuffle.
    pub fn is_pinned(&self, index: usize) -> bool {
        matches!(self.occupant(index), Some(occupant) if occupant.is_status())
    }
}

impl Default for TileSlots {
    fn default() -> Self {
        Self::new()
    }
}

/// Digit layout: hour digits on a 24px pitch from x=22, minute digits on a
/// 12px pitch from x=78, one row each.
fn digit_origin(index: usize) -> Point {
    let i = index as i32;
    if index < 2 {
        Point::new(i % 2 * 24 + 22, 9)
    } else {
        Point::new(i % 2 * 12 + 78, 44)
    }
}

/// Tile layout: evenly spaced along the bottom row.
fn tile_origin(index: usize) -> Point {
    Point::new(index as i32 * 48 + 8, 124)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_layout_positions() {
        assert_eq!(digit_origin(0), Point::new(22, 9));
        assert_eq!(digit_origin(1), Point::new(46, 9));
        assert_eq!(digit_origin(2), Point::new(78, 44));
        assert_eq!(digit_origin(3), Point::new(90, 44));
    }

    #[test]
    fn tile_layout_positions() {
        assert_eq!(tile_origin(0), Point::new(8, 124));
        assert_eq!(tile_origin(1), Point::new(56, 124));
        assert_eq!(tile_origin(2), Point::new(104, 124));
    }

    #[test]
    fn occupy_and_release_digits() {
        let mut screen = Screen::new();
        let mut digits = DigitSlots::new();

        digits.occupy(&mut screen, 0, 9);
        assert_eq!(digits.occupant(0), Some(9));
        assert_eq!(screen.layer_count(), 1);

        digits.release(&mut screen, 0);
        assert_eq!(digits.occupant(0), None);
        assert!(screen.is_empty());

        // Releasing an empty slot is a no-op
        digits.release(&mut screen, 0);
        assert!(screen.is_empty());
    }

    #[test]
    fn occupy_rejects_bad_input() {
        let mut screen = Screen::new();
        let mut digits = DigitSlots::new();

        digits.occupy(&mut screen, 4, 1);
        digits.occupy(&mut screen, 0, 10);
        assert!(screen.is_empty());
        assert_eq!(digits.occupant(0), None);
    }

    #[test]
    fn occupied_slot_reentry_is_a_noop() {
        let mut screen = Screen::new();
        let mut digits = DigitSlots::new();

        digits.occupy(&mut screen, 1, 3);
        digits.occupy(&mut screen, 1, 7);
        assert_eq!(digits.occupant(1), Some(3));
        assert_eq!(screen.layer_count(), 1);
    }

    #[test]
    fn tile_slots_track_pins() {
        let mut screen = Screen::new();
        let mut tiles = TileSlots::new();

        tiles.occupy(&mut screen, 0, TileOccupant::Tile(5));
        assert!(!tiles.is_pinned(0));

        tiles.release(&mut screen, 0);
        tiles.occupy(&mut screen, 0, TileOccupant::Charging);
        assert!(tiles.is_pinned(0));
        assert_eq!(tiles.occupant(0), Some(TileOccupant::Charging));

        // Out-of-domain tile index is rejected
        tiles.occupy(&mut screen, 1, TileOccupant::Tile(20));
        assert_eq!(tiles.occupant(1), None);
    }

    #[test]
    fn release_all_empties_the_pools() {
        let mut screen = Screen::new();
        let mut digits = DigitSlots::new();
        let mut tiles = TileSlots::new();

        for i in 0..DIGIT_SLOT_COUNT {
            digits.occupy(&mut screen, i, i as u8);
        }
        for i in 0..TILE_SLOT_COUNT {
            tiles.occupy(&mut screen, i, TileOccupant::Tile(i as u8));
        }
        assert_eq!(screen.layer_count(), 7);

        digits.release_all(&mut screen);
        tiles.release_all(&mut screen);
        assert!(screen.is_empty());
    }
}
