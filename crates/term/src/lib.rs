//! Terminal render sink.
//!
//! Draws render events straight onto the terminal with cursor addressing,
//! the same way a serial console would: the board is drawn once per session
//! and every later event touches only the cells it names.
//!
//! Screen layout (zero-based columns/rows):
//!
//! ```text
//! row 0        ##############
//! rows 1..=12  #            #   cell (x, y) at column x+1, row y+1
//! row 13       ##############
//! row 14       Score:000  Time:000
//! row 15       (cursor parks here)
//! ```

pub mod renderer;

pub use tui_snake_engine as engine;
pub use tui_snake_types as types;

pub use renderer::{encode_event_into, TerminalGuard, TerminalSink};
