//! Terminal input module (engine-facing).
//!
//! The engine reads a plain byte stream (`w a s d` to steer, `e` to start).
//! This crate maps `crossterm` key events onto those bytes so the terminal
//! binary can feed the engine's input port, and decides which keys quit.

pub mod map;

pub use tui_snake_types as types;

pub use map::{handle_key_event, key_to_byte, should_quit};
