//! Haptic feedback patterns.
//!
//! The face only decides which pattern to fire; driving the actual motor is
//! the embedding's job (the simulator logs instead of buzzing).

/// Vibration pattern fired on Bluetooth transitions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pulse {
    /// Single long pulse: link restored
    Long,
    /// Two short pulses: link lost
    Double,
}

impl Pulse {
    /// Number of motor pulses in the pattern.
    pub fn times(self) -> u8 {
        match self {
            Pulse::Long => 1,
            Pulse::Double => 2,
        }
    }

    /// Length of each pulse in milliseconds.
    pub fn length_ms(self) -> u32 {
        match self {
            Pulse::Long => 400,
            Pulse::Double => 200,
        }
    }
}
