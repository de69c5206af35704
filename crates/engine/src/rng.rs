//! Lock-guarded random generator shared by the session's spawners.
//!
//! The guard is a plain (non-async) mutex held only for one draw. It nests
//! inside the state lock: callers may hold the state lock while drawing, but
//! nothing ever waits for the state lock while holding this one.

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::core::{PositionSource, XorShift32};
use crate::types::Position;

#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<XorShift32>,
    epoch: Instant,
}

impl SharedRng {
    /// Wrap `rng` in a fresh lock. An unseeded generator is seeded on first
    /// draw from the milliseconds elapsed since `epoch`.
    pub fn new(rng: XorShift32, epoch: Instant) -> Self {
        Self {
            inner: Mutex::new(rng),
            epoch,
        }
    }

    fn tick(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }

    pub fn next_i32(&self) -> i32 {
        let tick = self.tick();
        let mut rng = self.inner.lock();
        rng.seed_if_unset(tick);
        rng.next_i32()
    }

    /// Copy of the generator, to carry the stream into the next session.
    pub fn snapshot(&self) -> XorShift32 {
        *self.inner.lock()
    }
}

impl PositionSource for &SharedRng {
    fn next_position(&mut self) -> Position {
        let x = SharedRng::next_i32(self);
        let y = SharedRng::next_i32(self);
        crate::core::position_from_draws(x, y)
    }

    fn next_index(&mut self, len: usize) -> usize {
        SharedRng::next_i32(self).rem_euclid(len as i32) as usize
    }
}
