//! Slot-composited watchface engine for a 144x168 1-bit watch screen.
//!
//! The face is built from bitmap "slots": four digit slots for the clock,
//! three tile slots for decorative or status imagery, plus fixed layers for
//! the backdrop, date text and battery gauge. Everything is driven by
//! per-minute timer callbacks and battery/Bluetooth status events; the
//! embedding decides where those come from (see `main.rs` for the host
//! simulator).

#![cfg_attr(not(any(test, feature = "sim")), no_std)]

pub mod clock;
pub mod framebuffer;
pub mod haptics;
pub mod resources;
pub mod screen;
pub mod shuffle;
pub mod slots;
pub mod ui;
