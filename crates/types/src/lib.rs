//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, the session engine, terminal rendering).
//!
//! # Grid
//!
//! The playfield is a 12x12 toroidal grid:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 12 rows (indexed 0-11)
//! - Moving off one edge re-enters on the opposite edge.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SNAKE_LENGTH` | 4 | Length at session start |
//! | `MAX_SNAKE_LENGTH` | 50 | Reaching this length wins the session |
//! | `INITIAL_SNAKE_SPEED` | 60 | Moves per minute after a loss |
//! | `SPECIAL_POWERUP_PERIOD_MS` | 5000 | Special powerup spawner period |
//! | `SPECIAL_POWERUP_FREQ` | 10 | 1-in-N chance of a special powerup per period |
//! | `ENEMY_PERIOD_MS` | 5000 | Enemy relocation period |
//! | `CLOCK_PERIOD_MS` | 1000 | Elapsed-time counter period |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Command, Direction, Position, GRID_WIDTH};
//!
//! // Wraparound on the right edge
//! let head = Position::new(GRID_WIDTH - 1, 3);
//! assert_eq!(head.step(Direction::Right), Position::new(0, 3));
//!
//! // No direct reversal
//! assert_eq!(Direction::Right.turn(Direction::Left), Direction::Right);
//! assert_eq!(Direction::Right.turn(Direction::Up), Direction::Up);
//!
//! // Byte commands
//! assert_eq!(Command::from_byte(b'w'), Some(Command::Turn(Direction::Up)));
//! assert_eq!(Command::from_byte(b'e'), Some(Command::Start));
//! ```

/// Grid width in cells (12 columns)
pub const GRID_WIDTH: i32 = 12;

/// Grid height in cells (12 rows)
pub const GRID_HEIGHT: i32 = 12;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Snake length at session start
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// Body capacity; reaching it wins the session
pub const MAX_SNAKE_LENGTH: usize = 50;

/// Moves per minute of a fresh session
pub const INITIAL_SNAKE_SPEED: u32 = 60;

/// Special powerup spawner period (milliseconds)
pub const SPECIAL_POWERUP_PERIOD_MS: u64 = 5000;

/// `N` in the 1/N chance that a special powerup appears each period
pub const SPECIAL_POWERUP_FREQ: u32 = 10;

/// Enemy spawner period (milliseconds)
pub const ENEMY_PERIOD_MS: u64 = 5000;

/// How long the end message stays on screen (milliseconds)
pub const END_MESSAGE_DELAY_MS: u64 = 5000;

/// Elapsed-time counter period (milliseconds)
pub const CLOCK_PERIOD_MS: u64 = 1000;

/// Largest score/time value the header can display
pub const DISPLAY_MAX: u32 = 999;

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wrap arbitrary coordinates onto the grid.
    pub fn wrapped(x: i32, y: i32) -> Self {
        Self {
            x: x.rem_euclid(GRID_WIDTH),
            y: y.rem_euclid(GRID_HEIGHT),
        }
    }

    /// The neighbouring cell in `direction`, wrapping each axis independently.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::wrapped(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }
}

/// Heading of the snake. `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Apply a requested heading; only perpendicular turns are accepted.
    pub fn turn(self, requested: Direction) -> Direction {
        if self.is_perpendicular(requested) {
            requested
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Commands recognized on the byte input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Leave the menu and start a session (`e`).
    Start,
}

impl Command {
    /// Decode one input byte. Unknown bytes are ignored.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'w' => Some(Command::Turn(Direction::Up)),
            b'a' => Some(Command::Turn(Direction::Left)),
            b's' => Some(Command::Turn(Direction::Down)),
            b'd' => Some(Command::Turn(Direction::Right)),
            b'e' => Some(Command::Start),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Command::Turn(Direction::Up) => b'w',
            Command::Turn(Direction::Left) => b'a',
            Command::Turn(Direction::Down) => b's',
            Command::Turn(Direction::Right) => b'd',
            Command::Start => b'e',
        }
    }
}

/// The two edible entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    Normal,
    Special,
}

impl PowerupKind {
    /// Score awarded when the snake eats this powerup.
    pub fn score(self) -> u32 {
        match self {
            PowerupKind::Normal => 1,
            PowerupKind::Special => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Normal => "normal",
            PowerupKind::Special => "special",
        }
    }
}

/// Why a session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    SelfCollision,
    EnemyCollision,
}

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lost(LossCause),
    Won,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won)
    }
}

/// Semantic drawing instructions handed to the render sink, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Menu,
    /// Draw a fresh board with the initial snake (head first).
    SessionStart {
        snake: Vec<Position>,
    },
    SnakeAdvance {
        head: Position,
        /// `false` on the tick the snake grew; the old tail stays drawn.
        tail_removed: bool,
        tail: Position,
    },
    PowerupPlaced {
        kind: PowerupKind,
        pos: Position,
    },
    PowerupCleared {
        kind: PowerupKind,
        pos: Position,
    },
    EnemyPlaced(Position),
    EnemyCleared(Position),
    Loss,
    Win,
    ScoreChanged(u32),
    TimeChanged(u32),
}

impl RenderEvent {
    /// Loss and Win end a session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderEvent::Loss | RenderEvent::Win)
    }
}

impl From<Outcome> for RenderEvent {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Lost(_) => RenderEvent::Loss,
            Outcome::Won => RenderEvent::Win,
        }
    }
}
