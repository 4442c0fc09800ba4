use std::mem;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::game::{RenderCommand, RoundContext, RoundPhase, RoundState};
use crate::input::InputSnapshot;

/// Owns the round state machine and the logical clock.
///
/// Logical time only moves through `update`, by the frame delta clamped to
/// `max_delta_us`, so a stalled frame cannot skip display steps.
pub struct Game {
    state: RoundState,
    round: RoundContext,
    now_us: u64,
    running: bool,
    max_delta_us: u64,
}

impl Game {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_context(
            RoundContext::from_config(config.play.clone()),
            config.timing.max_frame_delta_us(),
        )
    }

    pub fn with_context(round: RoundContext, max_delta_us: u64) -> Self {
        Self {
            state: RoundState::MainMenu,
            round,
            now_us: 0,
            running: true,
            max_delta_us,
        }
    }

    /// Advance by one frame.
    ///
    /// Returns the `(from, to)` phases when the active state changed.
    pub fn update(&mut self, dt_us: u64, input: &InputSnapshot) -> Option<(RoundPhase, RoundPhase)> {
        if !self.running {
            return None;
        }

        let dt_us = if self.max_delta_us > 0 {
            dt_us.min(self.max_delta_us)
        } else {
            dt_us
        };
        self.now_us = self.now_us.saturating_add(dt_us);

        if input.quit_requested() {
            info!(phase = %self.state.phase(), "quit requested");
            self.running = false;
            return None;
        }

        let from = self.state.phase();
        let state = mem::take(&mut self.state);
        self.state = state.update(&mut self.round, self.now_us, input);
        let to = self.state.phase();

        if from == to {
            return None;
        }
        info!(%from, %to, level = self.round.level(), "state transition");
        if to == RoundPhase::Win {
            debug!(level = self.round.level(), len = self.round.sequence().len(), "round won");
        }
        Some((from, to))
    }

    pub fn render_command(&self) -> RenderCommand {
        self.state.render(&self.round, self.now_us)
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    pub fn round(&self) -> &RoundContext {
        &self.round
    }

    /// Logical time in microseconds.
    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }
}
