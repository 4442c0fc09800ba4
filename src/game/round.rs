use tracing::{debug, error, info, warn};

use crate::config::{MismatchPolicy, PlayConfig};
use crate::game::{
    Highlights, Quadrant, RenderCommand, RoundPhase, RoundTimer, Sequence, SequenceGenerator,
};
use crate::input::{Buttons, InputSnapshot};
use crate::util::GameError;

/// Order in which simultaneous directional presses are matched.
const INPUT_ORDER: [Quadrant; Quadrant::COUNT] =
    [Quadrant::Up, Quadrant::Right, Quadrant::Down, Quadrant::Left];

/// Data shared by every round state: rules, RNG, current level and sequence.
pub struct RoundContext {
    config: PlayConfig,
    generator: SequenceGenerator,
    sequence: Sequence,
    level: u8,
}

impl RoundContext {
    pub fn new(config: PlayConfig, generator: SequenceGenerator) -> Self {
        let sequence = Sequence::with_capacity(config.max_sequence_len);
        let level = config.start_level;
        Self {
            config,
            generator,
            sequence,
            level,
        }
    }

    /// Context whose generator is seeded from `config.seed`.
    pub fn from_config(config: PlayConfig) -> Self {
        let generator = SequenceGenerator::from_seed(
            config.seed,
            config.quadrants_per_level,
            config.max_sequence_len,
        );
        Self::new(config, generator)
    }

    /// Context already holding `sequence` at the configured start level.
    #[cfg(test)]
    pub(crate) fn with_sequence(config: PlayConfig, sequence: Sequence) -> Self {
        let mut ctx = Self::from_config(config);
        ctx.sequence = sequence;
        ctx
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Generate a fresh sequence for `level` and make it current.
    /// On failure the previous level and an empty sequence remain.
    fn begin_round(&mut self, level: u8) -> Result<(), GameError> {
        self.sequence.clear();
        self.sequence = self.generator.generate(level)?;
        self.level = level;
        Ok(())
    }

    fn reset(&mut self) {
        self.sequence.clear();
        self.level = self.config.start_level;
    }

    fn display_duration_us(&self) -> u64 {
        self.config.display_duration_us(self.level)
    }
}

/// The round state machine. Each variant owns the data of its phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundState {
    #[default]
    MainMenu,
    /// Flashing `sequence[cursor]` until `timer` runs out.
    DisplaySequence { cursor: usize, timer: RoundTimer },
    /// Waiting for the player to press `sequence[cursor]`.
    AwaitInput {
        cursor: usize,
        timer: RoundTimer,
        highlights: Highlights,
    },
    Win,
    GameOver,
}

impl RoundState {
    pub fn phase(&self) -> RoundPhase {
        match self {
            Self::MainMenu => RoundPhase::MainMenu,
            Self::DisplaySequence { .. } => RoundPhase::DisplaySequence,
            Self::AwaitInput { .. } => RoundPhase::AwaitInput,
            Self::Win => RoundPhase::Win,
            Self::GameOver => RoundPhase::GameOver,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match *self {
            Self::DisplaySequence { cursor, .. } | Self::AwaitInput { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    /// Enter the display phase at the first element.
    fn display(ctx: &RoundContext, now_us: u64) -> Self {
        let mut timer = RoundTimer::new();
        timer.start(now_us, ctx.display_duration_us());
        Self::DisplaySequence { cursor: 0, timer }
    }

    /// Enter the input phase: cursor back to 0, nothing lit.
    fn await_input(ctx: &RoundContext, now_us: u64) -> Self {
        let mut timer = RoundTimer::new();
        if let Some(window) = ctx.config.input_window_us() {
            timer.start(now_us, window);
        }
        Self::AwaitInput {
            cursor: 0,
            timer,
            highlights: Highlights::none(),
        }
    }

    /// Start a round at `level`, falling back to the menu if it cannot start.
    fn start_round(ctx: &mut RoundContext, level: u8, now_us: u64) -> Self {
        match ctx.begin_round(level) {
            Ok(()) => {
                info!(level, len = ctx.sequence.len(), "round started");
                Self::display(ctx, now_us)
            }
            Err(e) => {
                error!("round at level {level} not started: {e}");
                ctx.reset();
                Self::MainMenu
            }
        }
    }

    /// Advance this state by one frame and return the next one.
    pub fn update(self, ctx: &mut RoundContext, now_us: u64, input: &InputSnapshot) -> Self {
        match self {
            Self::MainMenu => {
                if input.just_pressed(Buttons::START) {
                    let level = ctx.level;
                    Self::start_round(ctx, level, now_us)
                } else {
                    self
                }
            }
            Self::DisplaySequence { cursor, timer } => {
                Self::update_display(ctx, cursor, timer, now_us)
            }
            Self::AwaitInput { cursor, timer, .. } => {
                Self::update_await_input(ctx, cursor, timer, now_us, input)
            }
            Self::Win => {
                if !input.just_pressed(Buttons::START) {
                    return self;
                }
                match ctx.level.checked_add(1) {
                    Some(next) if next <= ctx.config.max_level() => {
                        Self::start_round(ctx, next, now_us)
                    }
                    _ => {
                        info!(level = ctx.level, "final level cleared, back to menu");
                        ctx.reset();
                        Self::MainMenu
                    }
                }
            }
            Self::GameOver => {
                if input.just_pressed(Buttons::START) {
                    ctx.reset();
                    Self::MainMenu
                } else {
                    self
                }
            }
        }
    }

    fn update_display(
        ctx: &RoundContext,
        mut cursor: usize,
        mut timer: RoundTimer,
        now_us: u64,
    ) -> Self {
        if !timer.is_done(now_us) {
            return Self::DisplaySequence { cursor, timer };
        }

        // Next element starts where this one ended, not at frame time.
        let expired_at = timer.deadline();
        timer.stop();
        cursor += 1;

        if cursor >= ctx.sequence.len() {
            return Self::await_input(ctx, now_us);
        }

        timer.start(expired_at, ctx.display_duration_us());
        debug!(cursor, quadrant = ?ctx.sequence.get(cursor), "showing next element");
        Self::DisplaySequence { cursor, timer }
    }

    fn update_await_input(
        ctx: &RoundContext,
        mut cursor: usize,
        mut timer: RoundTimer,
        now_us: u64,
        input: &InputSnapshot,
    ) -> Self {
        let mut highlights = Highlights::none();

        for quadrant in INPUT_ORDER {
            if !input.just_pressed(Buttons::for_quadrant(quadrant)) {
                continue;
            }
            highlights.set(quadrant);

            let Some(expected) = ctx.sequence.get(cursor) else {
                warn!(cursor, len = ctx.sequence.len(), "cursor past end of sequence");
                return Self::Win;
            };

            if quadrant == expected {
                cursor += 1;
                debug!(%quadrant, cursor, "correct input");
                if cursor == ctx.sequence.len() {
                    return Self::Win;
                }
                if let Some(window) = ctx.config.input_window_us() {
                    timer.stop();
                    timer.start(now_us, window);
                }
            } else {
                match ctx.config.mismatch_policy {
                    MismatchPolicy::Ignore => {
                        debug!(pressed = %quadrant, %expected, cursor, "wrong input ignored");
                    }
                    MismatchPolicy::GameOver => {
                        info!(pressed = %quadrant, %expected, cursor, "wrong input");
                        return Self::GameOver;
                    }
                }
            }
        }

        if timer.is_running() && timer.is_done(now_us) {
            info!(cursor, "input window expired");
            return Self::GameOver;
        }

        Self::AwaitInput {
            cursor,
            timer,
            highlights,
        }
    }

    /// What the renderer should show for this state at logical time `now_us`.
    ///
    /// A displayed element goes dark for the tail of its slot, so two equal
    /// quadrants in a row show as two flashes.
    pub fn render(&self, ctx: &RoundContext, now_us: u64) -> RenderCommand {
        let len = ctx.sequence.len();
        let (highlights, progress) = match *self {
            Self::DisplaySequence { cursor, timer } => {
                let gap_us = ctx.config.display_gap_us(timer.lifetime());
                let lit = timer.remaining(now_us) > gap_us;
                let highlights = match ctx.sequence.get(cursor) {
                    Some(quadrant) if lit => Highlights::only(quadrant),
                    _ => Highlights::none(),
                };
                (highlights, Some((cursor, len)))
            }
            Self::AwaitInput {
                cursor, highlights, ..
            } => (highlights, Some((cursor, len))),
            _ => (Highlights::none(), None),
        };

        RenderCommand {
            highlights,
            phase: self.phase(),
            level: ctx.level,
            progress,
        }
    }
}
