//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the snake rules with no knowledge of tasks, locks,
//! channels or terminals. The session engine wraps these types in its lock
//! discipline; everything here is synchronous and allocation-free on the
//! tick path.
//!
//! # Module Structure
//!
//! - [`game_state`]: snake body, heading, score, entities and the per-tick advance
//! - [`placement`]: collision-free entity placement with a bounded retry fallback
//! - [`rng`]: signed 32-bit xorshift generator and grid position sampling
//!
//! # Tick Rules
//!
//! One call to [`GameState::advance`](game_state::GameState::advance):
//!
//! 1. Moves the head one cell in the current heading, wrapping at the edges
//! 2. Loses on the snake's own body (tail included) or on the enemy
//! 3. Eats a powerup under the new head: +1 length, +1 or +5 score
//! 4. Wins when the body reaches 50 cells
//! 5. Otherwise shifts the body, keeping the old tail on a growth tick
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{AdvanceOutcome, GameState};
//! use tui_snake_types::Position;
//!
//! let mut game = GameState::new();
//! let advance = game.advance();
//!
//! assert!(matches!(advance.outcome, AdvanceOutcome::Moved { tail_removed: true, .. }));
//! assert_eq!(game.head(), Position::new(7, 6));
//! ```

pub mod game_state;
pub mod placement;
pub mod rng;

pub use tui_snake_types as types;

pub use game_state::{Advance, AdvanceOutcome, EntitySlot, GameState, Pickup, SnakeBody};
pub use placement::{find_free_cell, free_cells};
pub use rng::{position_from_draws, PositionSource, XorShift32};
