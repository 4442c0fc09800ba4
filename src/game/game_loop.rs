use tracing::{trace, warn};

use crate::config::AppConfig;
use crate::game::Game;
use crate::input::InputSnapshot;
use crate::render::{FrameStats, PlayFieldRenderer};
use crate::traits::{InputProvider, RenderBackend, TimeProvider};
use crate::util::GameError;

/// Fixed-rate frame scheduling on the wall clock.
///
/// A frame that finishes early waits out the rest of its interval; a late
/// frame starts the next one immediately.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval_us: u64,
    last_frame_us: Option<u64>,
}

impl FramePacer {
    pub fn new(interval_us: u64) -> Self {
        Self {
            interval_us,
            last_frame_us: None,
        }
    }

    pub fn interval_us(&self) -> u64 {
        self.interval_us
    }

    /// How long to wait at `now_us` before the next frame is due.
    pub fn wait_us(&self, now_us: u64) -> u64 {
        self.next_deadline_us(now_us).saturating_sub(now_us)
    }

    /// Wall-clock time at which the next frame is due.
    pub fn next_deadline_us(&self, now_us: u64) -> u64 {
        match self.last_frame_us {
            Some(last) => last.saturating_add(self.interval_us),
            None => now_us,
        }
    }

    /// Mark a frame as started and return the delta since the previous one.
    pub fn begin_frame(&mut self, now_us: u64) -> u64 {
        let dt = self
            .last_frame_us
            .map_or(0, |last| now_us.saturating_sub(last));
        self.last_frame_us = Some(now_us);
        dt
    }
}

/// One iteration: poll input, update the round, render.
pub struct GameLoop<I: InputProvider, T: TimeProvider> {
    game: Game,
    input: I,
    time: T,
    pacer: FramePacer,
    snapshot: InputSnapshot,
    play_field: PlayFieldRenderer,
    frames: u64,
}

impl<I: InputProvider, T: TimeProvider> GameLoop<I, T> {
    pub fn new(config: &AppConfig, input: I, time: T) -> Result<Self, GameError> {
        let play_field = PlayFieldRenderer::new(config.render.clone())?;
        Ok(Self::with_parts(
            Game::new(config),
            input,
            time,
            FramePacer::new(config.timing.frame_interval_us()),
            play_field,
        ))
    }

    pub fn with_parts(
        game: Game,
        input: I,
        time: T,
        pacer: FramePacer,
        play_field: PlayFieldRenderer,
    ) -> Self {
        Self {
            game,
            input,
            time,
            pacer,
            snapshot: InputSnapshot::new(),
            play_field,
            frames: 0,
        }
    }

    /// Run one iteration against `backend`. Returns false once the game has
    /// stopped. Render failures are logged and do not stop the loop.
    pub fn iterate<R: RenderBackend>(&mut self, backend: &mut R) -> bool {
        if !self.game.is_running() {
            return false;
        }

        let now = self.time.now_us();
        let dt = self.pacer.begin_frame(now);
        self.snapshot.rebuild(self.input.poll_events());
        self.game.update(dt, &self.snapshot);
        self.frames += 1;

        if !self.game.is_running() {
            return false;
        }

        let command = self.game.render_command();
        match self.play_field.render(backend, &command) {
            Ok(FrameStats { skipped, .. }) if skipped > 0 => {
                trace!(frame = self.frames, skipped, "frame rendered with skipped geometry");
            }
            Ok(_) => {}
            Err(e) => warn!(frame = self.frames, "render failed: {e:#}"),
        }
        true
    }

    /// Microseconds until the next iteration is due.
    pub fn wait_us(&self) -> u64 {
        self.pacer.wait_us(self.time.now_us())
    }

    pub fn next_deadline_us(&self) -> u64 {
        self.pacer.next_deadline_us(self.time.now_us())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn play_field(&self) -> &PlayFieldRenderer {
        &self.play_field
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RoundPhase;
    use crate::input::{Buttons, ScriptedInput};
    use crate::render::CommandRecorder;
    use crate::traits::{MockTimeProvider, RawInputEvent};

    #[test]
    fn test_pacer_first_frame_is_due() {
        let pacer = FramePacer::new(16_666);
        assert_eq!(pacer.wait_us(5_000), 0);
    }

    #[test]
    fn test_pacer_early_frame_waits_remainder() {
        let mut pacer = FramePacer::new(16_666);
        assert_eq!(pacer.begin_frame(1_000), 0);
        assert_eq!(pacer.wait_us(6_000), 11_666);
        assert_eq!(pacer.next_deadline_us(6_000), 17_666);
    }

    #[test]
    fn test_pacer_late_frame_does_not_wait() {
        let mut pacer = FramePacer::new(16_666);
        pacer.begin_frame(0);
        assert_eq!(pacer.wait_us(40_000), 0);
        assert_eq!(pacer.begin_frame(40_000), 40_000);
    }

    fn game_loop(script: ScriptedInput) -> GameLoop<ScriptedInput, MockTimeProvider> {
        let mut config = AppConfig::default();
        config.play.seed = Some(3);
        GameLoop::new(&config, script, MockTimeProvider::new()).unwrap()
    }

    #[test]
    fn test_iterate_renders_each_frame() {
        let mut gl = game_loop(ScriptedInput::new());
        let mut recorder = CommandRecorder::new(800, 640);
        for _ in 0..3 {
            assert!(gl.iterate(&mut recorder));
            gl.time().advance_us(16_666);
        }
        assert_eq!(recorder.frame_count(), 3);
        assert_eq!(gl.frames(), 3);
        assert_eq!(gl.game().now_us(), 2 * 16_666);
    }

    #[test]
    fn test_close_request_stops_loop() {
        let mut script = ScriptedInput::new();
        script.push_frame(vec![RawInputEvent::CloseRequested]);
        let mut gl = game_loop(script);
        let mut recorder = CommandRecorder::new(800, 640);
        assert!(!gl.iterate(&mut recorder));
        assert!(!gl.iterate(&mut recorder));
        assert_eq!(recorder.frame_count(), 0);
    }

    #[test]
    fn test_render_failure_keeps_running() {
        let mut script = ScriptedInput::new();
        script.push_frame(vec![RawInputEvent::Pressed(Buttons::START)]);
        let mut gl = game_loop(script);
        let mut recorder = CommandRecorder::new(800, 640);
        recorder.set_fail_draws(true);

        assert!(gl.iterate(&mut recorder));
        assert_eq!(gl.game().phase(), RoundPhase::DisplaySequence);
        assert_eq!(recorder.geometry_count(), 0);
        assert_eq!(recorder.frame_count(), 1);
    }
}
