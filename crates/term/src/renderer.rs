//! TerminalSink: encodes render events as crossterm commands.
//!
//! Encoding is kept separate from writing so it can be checked byte for byte
//! without a terminal.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::engine::RenderSink;
use crate::types::{Position, PowerupKind, RenderEvent, DISPLAY_MAX, GRID_HEIGHT, GRID_WIDTH};

const WELCOME: &str = "Welcome to Snake Game, Press e to start the game";
const MOVE_HELP: &str = "Use WASD keys for movement";
const SYMBOL_HELP: &str =
    "Your snake is o, normal powerups are +, special powerups are *, enemies are x";
const HEADER: &str = "Score:000  Time:000";
const LOSS_MESSAGE: &str = "You Lost!";
const WIN_MESSAGE: &str = "You Won!";

const BORDER: char = '#';
const SNAKE: char = 'o';
const EMPTY: char = ' ';
const ENEMY: char = 'x';

const HEADER_ROW: u16 = GRID_HEIGHT as u16 + 2;
const SCORE_COL: u16 = 6;
const TIME_COL: u16 = 16;
const BOTTOM_ROW: u16 = HEADER_ROW + 1;

fn powerup_symbol(kind: PowerupKind) -> char {
    match kind {
        PowerupKind::Normal => '+',
        PowerupKind::Special => '*',
    }
}

/// Encode one event into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_event_into(event: &RenderEvent, out: &mut Vec<u8>) -> io::Result<()> {
    match event {
        RenderEvent::Menu => {
            clear_into(out)?;
            for line in [WELCOME, MOVE_HELP, SYMBOL_HELP] {
                out.queue(Print(line))?;
                out.queue(Print("\r\n"))?;
            }
        }
        RenderEvent::SessionStart { snake } => {
            clear_into(out)?;
            encode_board_into(out)?;
            for &pos in snake {
                cell_into(out, pos, SNAKE)?;
            }
            park_into(out)?;
        }
        RenderEvent::SnakeAdvance {
            head,
            tail_removed,
            tail,
        } => {
            cell_into(out, *head, SNAKE)?;
            if *tail_removed {
                cell_into(out, *tail, EMPTY)?;
            }
            park_into(out)?;
        }
        RenderEvent::PowerupPlaced { kind, pos } => {
            cell_into(out, *pos, powerup_symbol(*kind))?;
            park_into(out)?;
        }
        RenderEvent::PowerupCleared { pos, .. } | RenderEvent::EnemyCleared(pos) => {
            cell_into(out, *pos, EMPTY)?;
            park_into(out)?;
        }
        RenderEvent::EnemyPlaced(pos) => {
            cell_into(out, *pos, ENEMY)?;
            park_into(out)?;
        }
        RenderEvent::Loss => {
            clear_into(out)?;
            out.queue(Print(LOSS_MESSAGE))?;
        }
        RenderEvent::Win => {
            clear_into(out)?;
            out.queue(Print(WIN_MESSAGE))?;
        }
        RenderEvent::ScoreChanged(score) => {
            counter_into(out, SCORE_COL, *score)?;
            park_into(out)?;
        }
        RenderEvent::TimeChanged(seconds) => {
            counter_into(out, TIME_COL, *seconds)?;
            park_into(out)?;
        }
    }
    Ok(())
}

fn clear_into(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    Ok(())
}

/// Border, empty interior and the zeroed header.
fn encode_board_into(out: &mut Vec<u8>) -> io::Result<()> {
    let width = GRID_WIDTH as usize;
    let edge: String = std::iter::repeat(BORDER).take(width + 2).collect();
    let row = format!("{}{}{}", BORDER, " ".repeat(width), BORDER);

    out.queue(Print(&edge))?;
    out.queue(Print("\r\n"))?;
    for _ in 0..GRID_HEIGHT {
        out.queue(Print(&row))?;
        out.queue(Print("\r\n"))?;
    }
    out.queue(Print(&edge))?;
    out.queue(Print("\r\n"))?;
    out.queue(Print(HEADER))?;
    Ok(())
}

fn cell_into(out: &mut Vec<u8>, pos: Position, ch: char) -> io::Result<()> {
    out.queue(cursor::MoveTo(pos.x as u16 + 1, pos.y as u16 + 1))?;
    out.queue(Print(ch))?;
    Ok(())
}

fn counter_into(out: &mut Vec<u8>, col: u16, value: u32) -> io::Result<()> {
    out.queue(cursor::MoveTo(col, HEADER_ROW))?;
    out.queue(Print(format!("{:03}", value.min(DISPLAY_MAX))))?;
    Ok(())
}

fn park_into(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, BOTTOM_ROW))?;
    Ok(())
}

/// Render sink writing to any byte stream (stdout in the binary).
pub struct TerminalSink<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, event: &RenderEvent) -> io::Result<()> {
        self.buf.clear();
        encode_event_into(event, &mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

/// Raw mode and alternate screen for the lifetime of the guard.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut buf = Vec::new();
        buf.queue(terminal::EnterAlternateScreen)?;
        buf.queue(cursor::Hide)?;
        buf.queue(terminal::DisableLineWrap)?;
        write_stdout(&buf)?;
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failures.
    pub fn exit(mut self) -> Result<()> {
        self.active = false;
        restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = restore();
        }
    }
}

fn restore() -> Result<()> {
    let mut buf = Vec::new();
    buf.queue(ResetColor)?;
    buf.queue(SetAttribute(Attribute::Reset))?;
    buf.queue(terminal::EnableLineWrap)?;
    buf.queue(cursor::Show)?;
    buf.queue(terminal::LeaveAlternateScreen)?;
    write_stdout(&buf)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn write_stdout(buf: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(buf)?;
    stdout.flush()
}
