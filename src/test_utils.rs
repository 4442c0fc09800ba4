//! Test utilities for building round contexts and simulating inputs.
//!
//! This module provides helpers for creating test fixtures in a fluent manner.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PlayConfig;
use crate::game::{Quadrant, RoundContext, Sequence, SequenceGenerator};
use crate::input::{Buttons, InputSnapshot};
use crate::traits::RawInputEvent;

pub use builders::SnapshotBuilder;

/// Round context whose generator is seeded with a fixed value.
pub fn seeded_ctx(config: PlayConfig) -> RoundContext {
    let generator = SequenceGenerator::new(
        StdRng::seed_from_u64(0x5eed),
        config.quadrants_per_level,
        config.max_sequence_len,
    );
    RoundContext::new(config, generator)
}

/// Round context already holding `quadrants` as its sequence.
pub fn ctx_with_sequence(quadrants: &[Quadrant], config: PlayConfig) -> RoundContext {
    let sequence: Sequence = quadrants.iter().copied().collect();
    RoundContext::with_sequence(config, sequence)
}

/// Snapshot in which `buttons` were pressed this frame.
pub fn press(buttons: Buttons) -> InputSnapshot {
    SnapshotBuilder::new().press(buttons).build()
}

pub mod builders {
    use super::*;

    /// Builder for a two-frame input history: what was held last frame and
    /// what happened this frame.
    #[derive(Debug, Default, Clone)]
    pub struct SnapshotBuilder {
        held: Buttons,
        events: Vec<RawInputEvent>,
    }

    impl SnapshotBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Buttons already down before this frame.
        pub fn held(mut self, buttons: Buttons) -> Self {
            self.held |= buttons;
            self
        }

        pub fn press(mut self, buttons: Buttons) -> Self {
            self.events.push(RawInputEvent::Pressed(buttons));
            self
        }

        pub fn release(mut self, buttons: Buttons) -> Self {
            self.events.push(RawInputEvent::Released(buttons));
            self
        }

        pub fn close(mut self) -> Self {
            self.events.push(RawInputEvent::CloseRequested);
            self
        }

        pub fn build(self) -> InputSnapshot {
            let mut snapshot = InputSnapshot::new();
            if !self.held.is_empty() {
                snapshot.rebuild([RawInputEvent::Pressed(self.held)]);
            }
            snapshot.rebuild(self.events);
            snapshot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_rising_edge() {
        let snap = press(Buttons::LEFT);
        assert!(snap.just_pressed(Buttons::LEFT));
        assert!(snap.is_down(Buttons::LEFT));
    }

    #[test]
    fn test_held_is_not_rising_edge() {
        let snap = SnapshotBuilder::new()
            .held(Buttons::UP)
            .press(Buttons::DOWN)
            .build();
        assert!(!snap.just_pressed(Buttons::UP));
        assert!(snap.just_pressed(Buttons::DOWN));
        assert!(snap.is_down(Buttons::UP | Buttons::DOWN));
    }

    #[test]
    fn test_release_and_close() {
        let snap = SnapshotBuilder::new()
            .held(Buttons::START)
            .release(Buttons::START)
            .close()
            .build();
        assert_eq!(snap.released(), Buttons::START);
        assert!(snap.quit_requested());
    }

    #[test]
    fn test_ctx_with_sequence() {
        let ctx = ctx_with_sequence(&[Quadrant::Up, Quadrant::Left], PlayConfig::default());
        assert_eq!(ctx.sequence().as_slice(), &[Quadrant::Up, Quadrant::Left]);
        assert_eq!(ctx.level(), 1);
    }
}
