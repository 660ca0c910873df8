//! Randomized tile selection.
//!
//! A 20-entry permutation is mutated in place with single partial
//! Fisher-Yates steps: each visible slot draws uniformly from the tail of
//! the array, which keeps the visible tiles distinct within one shuffle
//! while still allowing repeats across shuffles.

use crate::resources::TILE_COUNT;

/// Linear congruential generator with the glibc constants. Deterministic
/// for a fixed seed; the embedding picks the seed.
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next(&mut self) -> u32 {
        const A: u32 = 1103515245;
        const C: u32 = 12345;
        self.state = A.wrapping_mul(self.state).wrapping_add(C);
        self.state
    }

    /// Uniform draw from `0..max`; returns 0 for `max == 0`.
    pub fn next_below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }
}

/// Permutation of the tile indices 0..19. Positions below
/// [`TILE_SLOT_COUNT`](crate::slots::TILE_SLOT_COUNT) are the visible ones.
pub struct TileDeck {
    order: [u8; TILE_COUNT],
    rng: Lcg,
}

impl TileDeck {
    pub fn new(seed: u32) -> Self {
        Self {
            order: core::array::from_fn(|i| i as u8),
            rng: Lcg::new(seed),
        }
    }

    /// Tile index currently at a position.
    pub fn current(&self, position: usize) -> u8 {
        self.order[position]
    }

    /// One partial Fisher-Yates step: swap `position` with a uniformly
    /// drawn index in `[position, 19]`. Out-of-range positions are ignored.
    pub fn draw_at(&mut self, position: usize) {
        if position >= TILE_COUNT {
            return;
        }
        let j = position + self.rng.next_below((TILE_COUNT - position) as u32) as usize;
        self.order.swap(position, j);
    }

    #[cfg(test)]
    fn order(&self) -> &[u8; TILE_COUNT] {
        &self.order
    }
}
