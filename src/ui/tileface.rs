//! The slot-composited watchface.
//!
//! Owns the screen's layer tree, both slot pools and the tile deck, and
//! reacts to minute ticks and battery/Bluetooth events. All state lives in
//! this one struct; handlers take `&mut self` and run to completion, so a
//! single-task embedding needs no further synchronization.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};
use heapless::String;
use log::{debug, info};

use crate::clock;
use crate::haptics::Pulse;
use crate::resources::{self, ResourceId};
use crate::screen::{LayerContent, LayerId, Screen};
use crate::shuffle::TileDeck;
use crate::slots::{DigitSlots, TileOccupant, TileSlots, TILE_SLOT_COUNT};

use super::{BatteryInfo, Config};

/// Resting position of the gauge bar (battery at 0%).
const GAUGE_ORIGIN: Point = Point::new(22, 97);
/// Date text box.
const DATE_ORIGIN: Point = Point::new(28, 84);
const DATE_SIZE: Size = Size::new(30, 10);

const DATE_BUF_LEN: usize = 8;

pub struct TileFace {
    config: Config,
    screen: Screen,
    digits: DigitSlots,
    tiles: TileSlots,
    deck: TileDeck,
    background: Option<LayerId>,
    gauge: Option<LayerId>,
    date: Option<LayerId>,
    /// Last seen Bluetooth link state
    connected: bool,
    /// Last seen plug state
    charging: bool,
}

impl TileFace {
    pub fn new(config: Config, seed: u32) -> Self {
        Self {
            config,
            screen: Screen::new(),
            digits: DigitSlots::new(),
            tiles: TileSlots::new(),
            deck: TileDeck::new(seed),
            background: None,
            gauge: None,
            date: None,
            connected: true,
            charging: false,
        }
    }

    /// Window-load: attach the fixed layers, render the initial time, date
    /// and tiles, and seed device state from the startup poll.
    pub fn load(&mut self, now: NaiveDateTime, battery: BatteryInfo, connected: bool) {
        // Backdrop first so every slot layer stacks above it
        if let Some(bitmap) = resources::load(ResourceId::Background) {
            self.background = self.screen.attach(
                Rectangle::new(Point::zero(), bitmap.size()),
                LayerContent::Image(bitmap),
            );
        }
        if let Some(bitmap) = resources::load(ResourceId::Gauge) {
            self.gauge = self.screen.attach(
                Rectangle::new(GAUGE_ORIGIN, bitmap.size()),
                LayerContent::Image(bitmap),
            );
        }
        self.date = self.screen.attach(
            Rectangle::new(DATE_ORIGIN, DATE_SIZE),
            LayerContent::Text(String::new()),
        );

        self.update_date(now.date());
        self.update_time(now);
        self.shuffle_tiles();

        // Device state polled once at startup; push events take over after
        self.handle_battery(battery);
        let _ = self.handle_bluetooth(connected);
        info!("watchface loaded");
    }

    /// Window-unload: release every slot and detach the fixed layers.
    /// The tree is empty afterwards.
    pub fn unload(&mut self) {
        self.digits.release_all(&mut self.screen);
        self.tiles.release_all(&mut self.screen);
        for layer in [self.background.take(), self.gauge.take(), self.date.take()]
            .into_iter()
            .flatten()
        {
            self.screen.detach(layer);
        }
        info!("watchface unloaded");
    }

    /// Minute tick: re-render the clock digits, reshuffle tiles on the
    /// half hour, refresh the date at midnight.
    pub fn handle_minute_tick(&mut self, now: NaiveDateTime) {
        self.update_time(now);
        if now.minute() % 30 == 0 {
            self.shuffle_tiles();
        }
        if now.hour() == 0 && now.minute() == 0 {
            self.update_date(now.date());
        }
    }

    /// Battery event: slide the gauge to the charge level and pin or
    /// restore tile slot 0 depending on the plug state.
    pub fn handle_battery(&mut self, info: BatteryInfo) {
        if let Some(gauge) = self.gauge {
            if let Some(mut frame) = self.screen.frame(gauge) {
                frame.top_left.x = i32::from(info.percent) * 12 / 10 + GAUGE_ORIGIN.x;
                self.screen.set_frame(gauge, frame);
            }
        }
        if info.charging != self.charging {
            info!(
                "power {}",
                if info.charging { "plugged in" } else { "unplugged" }
            );
        }
        self.charging = info.charging;
        if info.charging {
            self.pin_tile(0, TileOccupant::Charging);
        } else {
            self.unpin_tile(0);
        }
        debug!(
            "battery {}%, {}",
            info.percent,
            if info.charging { "charging" } else { "discharging" }
        );
    }

    /// Bluetooth event: pin or restore tile slot 2 and pick the vibration
    /// pattern. Returns `None` when the link state did not change.
    pub fn handle_bluetooth(&mut self, connected: bool) -> Option<Pulse> {
        if connected == self.connected {
            return None;
        }
        self.connected = connected;
        if connected {
            self.unpin_tile(2);
            info!("bluetooth link restored");
            Some(Pulse::Long)
        } else {
            self.pin_tile(2, TileOccupant::NoBluetooth);
            info!("bluetooth link lost");
            Some(Pulse::Double)
        }
    }

    /// Reselect the visible tiles. Pinned slots keep their status image.
    pub fn shuffle_tiles(&mut self) {
        for position in 0..TILE_SLOT_COUNT {
            if self.tiles.is_pinned(position) {
                continue;
            }
            self.deck.draw_at(position);
            self.tiles.release(&mut self.screen, position);
            self.tiles
                .occupy(&mut self.screen, position, TileOccupant::Tile(self.deck.current(position)));
        }
        debug!("tiles reshuffled");
    }

    /// Compose the whole face onto a render target.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.screen.draw(target)
    }

    /// Digit shown in a clock slot, if any.
    pub fn digit(&self, slot: usize) -> Option<u8> {
        self.digits.occupant(slot)
    }

    /// Occupant of a tile slot, if any.
    pub fn tile(&self, slot: usize) -> Option<TileOccupant> {
        self.tiles.occupant(slot)
    }

    /// Current frame of the gauge bar.
    pub fn gauge_frame(&self) -> Option<Rectangle> {
        self.screen.frame(self.gauge?)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    fn update_time(&mut self, now: NaiveDateTime) {
        self.display_value(clock::display_hour(now.hour(), self.config.hour_style), true);
        self.display_value(now.minute(), false);
    }

    /// Write a 2-digit value into the hour or minute slot pair. Each digit
    /// is a release-then-occupy, never an in-place swap.
    fn display_value(&mut self, value: u32, hour: bool) {
        let digits = clock::split_digits(value);
        let base = if hour { 0 } else { 2 };
        for (position, digit) in digits.iter().enumerate() {
            self.digits.release(&mut self.screen, base + position);
            self.digits.occupy(&mut self.screen, base + position, *digit);
        }
    }

    fn update_date(&mut self, date: NaiveDate) {
        let Some(layer) = self.date else {
            return;
        };
        let mut buf = [0u8; DATE_BUF_LEN];
        let text = clock::format_date(&mut buf, date);
        self.screen.set_text(layer, text);
    }

    /// Force a status icon into a tile slot, bypassing the occupied guard
    /// by releasing first.
    fn pin_tile(&mut self, index: usize, status: TileOccupant) {
        self.tiles.release(&mut self.screen, index);
        self.tiles.occupy(&mut self.screen, index, status);
    }

    /// Put the shuffle-selected tile back into a slot that was pinned.
    /// Slots already showing a tile are left alone.
    fn unpin_tile(&mut self, index: usize) {
        if !self.tiles.is_pinned(index) {
            return;
        }
        self.tiles.release(&mut self.screen, index);
        self.tiles
            .occupy(&mut self.screen, index, TileOccupant::Tile(self.deck.current(index)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::HourStyle;
    use crate::framebuffer::Framebuffer;

    fn h12_config() -> Config {
        Config {
            hour_style: HourStyle::H12,
            utc_offset: 0,
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn loaded_face() -> TileFace {
        let mut face = TileFace::new(h12_config(), 1);
        face.load(
            at(9, 5),
            BatteryInfo {
                percent: 47,
                charging: false,
            },
            true,
        );
        face
    }

    #[test]
    fn renders_initial_time_digits() {
        let face = loaded_face();
        // 09:05, 12-hour mode
        assert_eq!(face.digit(0), Some(0));
        assert_eq!(face.digit(1), Some(9));
        assert_eq!(face.digit(2), Some(0));
        assert_eq!(face.digit(3), Some(5));
    }

    #[test]
    fn gauge_tracks_battery_percent() {
        let mut face = loaded_face();
        // 47 * 1.2 + 22 in integer math
        assert_eq!(face.gauge_frame().unwrap().top_left.x, 78);

        face.handle_battery(BatteryInfo {
            percent: 0,
            charging: false,
        });
        assert_eq!(face.gauge_frame().unwrap().top_left.x, 22);

        face.handle_battery(BatteryInfo {
            percent: 100,
            charging: true,
        });
        assert_eq!(face.gauge_frame().unwrap().top_left.x, 142);
    }

    #[test]
    fn minute_tick_updates_digits() {
        let mut face = loaded_face();
        face.handle_minute_tick(at(13, 37));
        // 13:37 shows as 1:37
        assert_eq!(face.digit(0), Some(0));
        assert_eq!(face.digit(1), Some(1));
        assert_eq!(face.digit(2), Some(3));
        assert_eq!(face.digit(3), Some(7));
    }

    #[test]
    fn tiles_are_distinct_after_shuffle() {
        let mut face = loaded_face();
        for _ in 0..50 {
            face.shuffle_tiles();
            let mut seen = [false; 20];
            for slot in 0..TILE_SLOT_COUNT {
                match face.tile(slot) {
                    Some(TileOccupant::Tile(t)) => {
                        assert!(!seen[t as usize], "duplicate tile in one shuffle");
                        seen[t as usize] = true;
                    }
                    other => panic!("unexpected occupant {:?}", other),
                }
            }
        }
    }

    #[test]
    fn charging_pins_slot_zero() {
        let mut face = loaded_face();
        face.handle_battery(BatteryInfo {
            percent: 50,
            charging: true,
        });
        assert_eq!(face.tile(0), Some(TileOccupant::Charging));

        // Shuffles must not evict the status icon
        for _ in 0..20 {
            face.shuffle_tiles();
            assert_eq!(face.tile(0), Some(TileOccupant::Charging));
        }

        face.handle_battery(BatteryInfo {
            percent: 50,
            charging: false,
        });
        assert!(matches!(face.tile(0), Some(TileOccupant::Tile(_))));
    }

    #[test]
    fn bluetooth_pins_slot_two_and_picks_pulses() {
        let mut face = loaded_face();

        // No transition, no pulse
        assert_eq!(face.handle_bluetooth(true), None);

        assert_eq!(face.handle_bluetooth(false), Some(Pulse::Double));
        assert_eq!(face.tile(2), Some(TileOccupant::NoBluetooth));

        for _ in 0..20 {
            face.shuffle_tiles();
            assert_eq!(face.tile(2), Some(TileOccupant::NoBluetooth));
        }

        assert_eq!(face.handle_bluetooth(true), Some(Pulse::Long));
        assert!(matches!(face.tile(2), Some(TileOccupant::Tile(_))));
    }

    #[test]
    fn concurrent_pins_leave_the_middle_tile_shuffling() {
        let mut face = loaded_face();
        face.handle_battery(BatteryInfo {
            percent: 20,
            charging: true,
        });
        let _ = face.handle_bluetooth(false);

        face.shuffle_tiles();
        assert_eq!(face.tile(0), Some(TileOccupant::Charging));
        assert!(matches!(face.tile(1), Some(TileOccupant::Tile(_))));
        assert_eq!(face.tile(2), Some(TileOccupant::NoBluetooth));
    }

    #[test]
    fn midnight_tick_refreshes_date() {
        let mut face = loaded_face();
        let midnight = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        face.handle_minute_tick(midnight);

        // 12-hour mode: midnight shows as 12
        assert_eq!(face.digit(0), Some(1));
        assert_eq!(face.digit(1), Some(2));

        // The new date renders; just check the face still composes
        let mut fb = Framebuffer::new();
        face.draw(&mut fb).unwrap();
        assert!(fb.pixel(0, 0));
    }

    #[test]
    fn unload_empties_the_tree() {
        let mut face = loaded_face();
        assert!(face.screen().layer_count() > 0);
        face.unload();
        assert!(face.screen().is_empty());
        assert_eq!(face.digit(0), None);
        assert_eq!(face.tile(0), None);
    }

    #[test]
    fn draw_composes_digits_onto_the_framebuffer() {
        let face = loaded_face();
        let mut fb = Framebuffer::new();
        face.draw(&mut fb).unwrap();

        // Hour slot 1 shows "9"; its glyph must light pixels in the slot box
        let mut lit = 0;
        for y in 9..37 {
            for x in 46..66 {
                if fb.pixel(x, y) {
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }
}
