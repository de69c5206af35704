//! Entity placement: rejection sampling with a free-cell fallback.
//!
//! Sampling is tried `max_attempts` times; after that the free cells are
//! enumerated explicitly and one is picked at random, so placement always
//! terminates. It only fails when no cell is free, which cannot happen while
//! the snake (at most 50 cells) and the other two entities leave the 144-cell
//! grid partly empty.

use arrayvec::ArrayVec;

use crate::game_state::{EntitySlot, GameState};
use crate::rng::PositionSource;
use crate::types::{Position, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// Cells where `slot` may currently be placed, in row-major order.
pub fn free_cells(state: &GameState, slot: EntitySlot) -> ArrayVec<Position, GRID_CELLS> {
    (0..GRID_HEIGHT)
        .flat_map(|y| (0..GRID_WIDTH).map(move |x| Position::new(x, y)))
        .filter(|&p| state.is_free_for(slot, p))
        .collect()
}

/// Pick a cell for `slot` that is off the snake and off the other entities.
pub fn find_free_cell<S>(
    state: &GameState,
    slot: EntitySlot,
    source: &mut S,
    max_attempts: u32,
) -> Option<Position>
where
    S: PositionSource + ?Sized,
{
    for _ in 0..max_attempts {
        let candidate = source.next_position();
        if state.is_free_for(slot, candidate) {
            return Some(candidate);
        }
    }

    let free = free_cells(state, slot);
    if free.is_empty() {
        return None;
    }
    Some(free[source.next_index(free.len())])
}
