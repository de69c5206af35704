//! Concurrent session engine.
//!
//! Runs one snake session at a time on `tokio` tasks that share a single
//! [`GameState`](tui_snake_core::GameState) behind an async mutex:
//!
//! - the movement engine ([`movement`]) advances the snake every tick
//! - three spawners ([`spawners`]) place the normal powerup, the special
//!   powerup and the enemy
//! - the clock ([`clock`]) counts elapsed seconds
//!
//! Every state change is announced as a [`RenderEvent`](types::RenderEvent)
//! through the single-slot [`mailbox`], drained by [`render::run_render_loop`]
//! into a [`RenderSink`](render::RenderSink). The [`coordinator`] drives the
//! menu and starts sessions.
//!
//! # Lock order
//!
//! The state lock is taken first, the generator lock (a `parking_lot` mutex
//! inside [`rng::SharedRng`]) only while the state lock is held. Render sends
//! happen with the state lock held, so a slow sink stalls the whole game
//! rather than reordering it.

mod clock;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod mailbox;
mod movement;
pub mod render;
pub mod rng;
pub mod session;
mod spawners;
pub mod stop;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use config::{tick_period, EngineConfig};
pub use coordinator::{next_speed, Coordinator, Phase};
pub use error::EngineError;
pub use input::InputPort;
pub use mailbox::{RenderReceiver, RenderSender};
pub use render::{run_render_loop, RecordingSink, RenderSink};
pub use session::{ActiveSession, SessionContext, SessionReport};
