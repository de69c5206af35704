//! Terminal snake runner (default binary).
//!
//! The engine runs on a single-threaded tokio runtime. A plain thread reads
//! crossterm key events and feeds the engine's byte input; the render loop
//! draws onto stdout.

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_snake::engine::input::Offered;
use tui_snake::engine::{self, run_render_loop, Coordinator, EngineConfig};
use tui_snake::input::{key_to_byte, should_quit};
use tui_snake::term::{TerminalGuard, TerminalSink};

const INPUT_BUFFER: usize = 2;
const KEY_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    init_logging()?;
    let config = EngineConfig::from_env();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let guard = TerminalGuard::enter()?;
    let result = runtime.block_on(run(config));

    // Always try to restore terminal state.
    let restored = guard.exit();
    result.and(restored)
}

/// Log to the `SNAKE_LOG` file if set; the terminal itself is the game screen.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("SNAKE_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    let level = std::env::var("SNAKE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(config: EngineConfig) -> Result<()> {
    let (mailbox_tx, mailbox_rx) = engine::mailbox::channel();
    let (input_tx, input) = engine::input::channel(INPUT_BUFFER);
    let (quit_tx, quit_rx) = oneshot::channel();

    std::thread::spawn(move || {
        if let Err(e) = read_keys(input_tx, quit_tx) {
            warn!("key reader stopped: {}", e);
        }
    });

    let render = tokio::spawn(run_render_loop(
        mailbox_rx,
        TerminalSink::new(io::stdout()),
        config.end_message_delay,
    ));

    let mut coordinator = Coordinator::new(config, mailbox_tx, input);
    let result = tokio::select! {
        finished = coordinator.run() => finished.context("session engine failed"),
        _ = quit_rx => {
            info!("quit requested");
            Ok(())
        }
    };

    // A session may still be running; dropping the runtime cancels it.
    render.abort();
    result
}

/// Forward key presses as command bytes until quit or the engine goes away.
///
/// Never blocks on the engine, so quit keys are seen immediately.
fn read_keys(input: mpsc::Sender<u8>, quit: oneshot::Sender<()>) -> io::Result<()> {
    while !input.is_closed() {
        if !event::poll(KEY_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            let _ = quit.send(());
            return Ok(());
        }
        if let Some(byte) = key_to_byte(key) {
            match engine::input::offer(&input, byte) {
                Offered::Queued => {}
                Offered::Dropped => debug!(byte, "input full, key dropped"),
                Offered::Closed => break,
            }
        }
    }
    Ok(())
}
