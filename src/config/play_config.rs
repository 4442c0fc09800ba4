use serde::{Deserialize, Serialize};

use crate::util::GameError;

/// What a wrong directional press does during the input phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Keep waiting for the expected quadrant; the cursor does not move.
    #[default]
    Ignore,
    /// End the round.
    GameOver,
}

/// Round rules: sequence length, pacing and failure policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Level the first round starts at (1-based).
    pub start_level: u8,
    /// Sequence entries added per level.
    pub quadrants_per_level: usize,
    /// Fixed capacity of the sequence buffer.
    pub max_sequence_len: usize,
    /// Display time of one element at level 1, divided by the level.
    pub base_display_ms: u64,
    /// Unlit pause at the end of each displayed element, so repeats read
    /// as separate flashes. Capped at a quarter of the element time.
    pub display_gap_ms: u64,
    pub mismatch_policy: MismatchPolicy,
    /// Time allowed per input step. `None` waits forever.
    pub input_window_ms: Option<u64>,
    /// Fixed RNG seed for reproducible sequences.
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            quadrants_per_level: 4,
            max_sequence_len: 100,
            base_display_ms: 2_000,
            display_gap_ms: 150,
            mismatch_policy: MismatchPolicy::Ignore,
            input_window_ms: None,
            seed: None,
        }
    }
}

impl PlayConfig {
    /// Per-element display time in microseconds: `base_display_ms / level`.
    pub fn display_duration_us(&self, level: u8) -> u64 {
        let level = u64::from(level.max(1));
        self.base_display_ms.saturating_mul(1_000) / level
    }

    /// Unlit tail of an element displayed for `element_us`.
    pub fn display_gap_us(&self, element_us: u64) -> u64 {
        self.display_gap_ms.saturating_mul(1_000).min(element_us / 4)
    }

    /// Input window per step in microseconds, if enabled.
    pub fn input_window_us(&self) -> Option<u64> {
        self.input_window_ms
            .filter(|&ms| ms > 0)
            .map(|ms| ms.saturating_mul(1_000))
    }

    /// Highest level whose sequence still fits the buffer.
    pub fn max_level(&self) -> u8 {
        let per_level = self.quadrants_per_level.max(1);
        u8::try_from(self.max_sequence_len / per_level).unwrap_or(u8::MAX)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.start_level == 0 {
            return Err(GameError::InvalidConfig(
                "start_level must be at least 1".to_string(),
            ));
        }
        if self.quadrants_per_level == 0 {
            return Err(GameError::InvalidConfig(
                "quadrants_per_level must be at least 1".to_string(),
            ));
        }
        let longest = usize::from(u8::MAX).saturating_mul(self.quadrants_per_level);
        if self.max_sequence_len == 0 || self.max_sequence_len > longest {
            return Err(GameError::InvalidConfig(format!(
                "max_sequence_len must be between 1 and {longest}"
            )));
        }
        if self.base_display_ms == 0 {
            return Err(GameError::InvalidConfig(
                "base_display_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
