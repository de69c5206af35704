//! Session coordinator: the menu/session state machine.
//!
//! ```text
//!   MENU --start byte--> ACTIVE --Loss/Win--> MENU
//! ```
//!
//! Only one session runs at a time. The coordinator owns the input port while
//! the menu is shown and lends it to the movement engine for the session; it
//! comes back in the [`SessionReport`] once every worker has been joined.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::info;

use crate::config::EngineConfig;
use crate::core::{GameState, XorShift32};
use crate::error::EngineError;
use crate::input::InputPort;
use crate::mailbox::RenderSender;
use crate::session::{ActiveSession, SessionContext, SessionReport};
use crate::types::{Outcome, RenderEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Active,
}

/// Speed of the next session: scaled by 1.5 after a win, reset otherwise.
pub fn next_speed(previous: u32, last: Option<Outcome>, initial: u32) -> u32 {
    match last {
        Some(Outcome::Won) => previous.saturating_mul(3) / 2,
        _ => initial,
    }
}

pub struct Coordinator {
    config: Arc<EngineConfig>,
    mailbox: RenderSender,
    input: Option<InputPort>,
    rng: XorShift32,
    epoch: Instant,
    speed: u32,
    last_outcome: Option<Outcome>,
    phase: Phase,
}

impl Coordinator {
    pub fn new(config: EngineConfig, mailbox: RenderSender, input: InputPort) -> Self {
        let rng = match config.seed {
            Some(seed) => XorShift32::new(seed),
            None => XorShift32::unseeded(),
        };
        let speed = config.initial_speed;
        Self {
            config: Arc::new(config),
            mailbox,
            input: Some(input),
            rng,
            epoch: Instant::now(),
            speed,
            last_outcome: None,
            phase: Phase::Menu,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Speed of the most recent session (initial speed before the first).
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Show the menu and play sessions until the input stream closes.
    pub async fn run(&mut self) -> Result<(), EngineError> {
        loop {
            self.phase = Phase::Menu;
            self.mailbox.send(RenderEvent::Menu).await?;

            let input = self
                .input
                .as_mut()
                .ok_or(EngineError::SessionAlreadyActive)?;
            if !input.wait_for_start().await {
                info!("input closed, leaving menu");
                return Ok(());
            }

            self.play_session().await?;
        }
    }

    /// Run one session to its end and record the outcome.
    pub async fn play_session(&mut self) -> Result<Outcome, EngineError> {
        self.play_session_from(GameState::new()).await
    }

    /// Run one session starting from `state` instead of the initial snake.
    pub async fn play_session_from(&mut self, state: GameState) -> Result<Outcome, EngineError> {
        let input = self.input.take().ok_or(EngineError::SessionAlreadyActive)?;
        let speed = next_speed(self.speed, self.last_outcome, self.config.initial_speed);

        self.mailbox
            .send(RenderEvent::SessionStart {
                snake: state.body().to_vec(),
            })
            .await?;

        info!(
            speed,
            seeded = self.rng.is_seeded(),
            rng_state = self.rng.state(),
            "starting session"
        );
        let ctx = SessionContext::new(
            state,
            self.rng,
            self.epoch,
            speed,
            self.mailbox.clone(),
            Arc::clone(&self.config),
        );
        self.phase = Phase::Active;
        self.speed = speed;

        let SessionReport {
            outcome,
            score,
            input,
            rng,
        } = ActiveSession::start(ctx, input).finished().await?;

        info!(?outcome, score, "back to menu");
        self.input = Some(input);
        self.rng = rng;
        self.last_outcome = Some(outcome);
        self.phase = Phase::Menu;
        Ok(outcome)
    }
}
