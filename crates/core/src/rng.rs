//! RNG module - 32-bit xorshift position generator
//!
//! A single signed 32-bit state word stepped with `x ^= x << 13; x ^= x >> 17;
//! x ^= x << 5`. The right shift is arithmetic because the state is signed,
//! so the stream differs from the textbook unsigned xorshift32.
//!
//! A zero state is a fixed point of the generator and doubles as "unseeded":
//! callers seed lazily from a tick counter on first use.

use crate::types::{Position, GRID_HEIGHT, GRID_WIDTH};

/// Source of grid positions for entity placement.
pub trait PositionSource {
    /// Uniformly distributed cell on the grid.
    fn next_position(&mut self) -> Position;

    /// Uniformly distributed index in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Signed xorshift generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XorShift32 {
    state: i32,
}

impl XorShift32 {
    /// Create a generator from an explicit seed.
    ///
    /// A zero seed yields an unseeded generator.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed as i32,
        }
    }

    /// Generator waiting for its first seed.
    pub fn unseeded() -> Self {
        Self::default()
    }

    pub fn is_seeded(&self) -> bool {
        self.state != 0
    }

    /// Seed from `tick` if the state is still zero. A zero tick seeds with 1.
    pub fn seed_if_unset(&mut self, tick: u32) {
        if self.state == 0 {
            self.state = if tick == 0 { 1 } else { tick as i32 };
        }
    }

    /// Current state word (for restarting with the same stream)
    pub fn state(&self) -> i32 {
        self.state
    }

    /// Generate next signed draw
    pub fn next_i32(&mut self) -> i32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Map two consecutive draws onto the grid, correcting negative remainders.
pub fn position_from_draws(x: i32, y: i32) -> Position {
    Position::wrapped(x % GRID_WIDTH, y % GRID_HEIGHT)
}

impl PositionSource for XorShift32 {
    fn next_position(&mut self) -> Position {
        let x = self.next_i32();
        let y = self.next_i32();
        position_from_draws(x, y)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.next_i32().rem_euclid(len as i32) as usize
    }
}
