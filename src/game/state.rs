use std::fmt;

use super::Quadrant;

/// Fieldless view of the active round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    MainMenu,
    DisplaySequence,
    AwaitInput,
    Win,
    GameOver,
}

impl RoundPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MainMenu => "main_menu",
            Self::DisplaySequence => "display_sequence",
            Self::AwaitInput => "await_input",
            Self::Win => "win",
            Self::GameOver => "game_over",
        }
    }

    /// Whether the circular field is drawn in this phase.
    pub const fn shows_play_field(self) -> bool {
        matches!(self, Self::DisplaySequence | Self::AwaitInput)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which quadrants are lit this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlights([bool; Quadrant::COUNT]);

impl Highlights {
    pub const fn none() -> Self {
        Self([false; Quadrant::COUNT])
    }

    pub fn only(quadrant: Quadrant) -> Self {
        let mut h = Self::none();
        h.set(quadrant);
        h
    }

    pub fn set(&mut self, quadrant: Quadrant) {
        self.0[quadrant.index()] = true;
    }

    pub const fn is_lit(&self, quadrant: Quadrant) -> bool {
        self.0[quadrant.index()]
    }

    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&lit| lit).count()
    }

    pub const fn as_array(&self) -> [bool; Quadrant::COUNT] {
        self.0
    }
}

/// Everything the rendering collaborator needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCommand {
    pub highlights: Highlights,
    pub phase: RoundPhase,
    pub level: u8,
    /// Cursor into the sequence and its length, during a round.
    pub progress: Option<(usize, usize)>,
}

impl RenderCommand {
    /// One-line status for the window title or overlay.
    pub fn status_text(&self) -> String {
        match self.phase {
            RoundPhase::MainMenu => format!("Level {}. Press <space> to start", self.level),
            RoundPhase::DisplaySequence => match self.progress {
                Some((cursor, len)) => {
                    format!("Level {}. Watch ({}/{})", self.level, cursor + 1, len)
                }
                None => format!("Level {}. Watch", self.level),
            },
            RoundPhase::AwaitInput => match self.progress {
                Some((cursor, len)) => format!("Level {}. Repeat ({cursor}/{len})", self.level),
                None => format!("Level {}. Repeat", self.level),
            },
            RoundPhase::Win => format!(
                "Level {} cleared. Press <space> for the next level, or <escape> to quit",
                self.level
            ),
            RoundPhase::GameOver => {
                "Game over. Press <space> to start again, or <escape> to quit".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights() {
        let mut h = Highlights::none();
        assert_eq!(h.lit_count(), 0);
        h.set(Quadrant::Up);
        h.set(Quadrant::Up);
        h.set(Quadrant::Left);
        assert!(h.is_lit(Quadrant::Up));
        assert!(h.is_lit(Quadrant::Left));
        assert!(!h.is_lit(Quadrant::Down));
        assert_eq!(h.lit_count(), 2);
        assert_eq!(
            Highlights::only(Quadrant::Right).as_array(),
            [false, false, false, true]
        );
    }

    #[test]
    fn test_play_field_phases() {
        assert!(RoundPhase::DisplaySequence.shows_play_field());
        assert!(RoundPhase::AwaitInput.shows_play_field());
        assert!(!RoundPhase::MainMenu.shows_play_field());
        assert!(!RoundPhase::Win.shows_play_field());
        assert!(!RoundPhase::GameOver.shows_play_field());
    }

    #[test]
    fn test_status_text() {
        let cmd = RenderCommand {
            highlights: Highlights::none(),
            phase: RoundPhase::AwaitInput,
            level: 2,
            progress: Some((3, 8)),
        };
        assert_eq!(cmd.status_text(), "Level 2. Repeat (3/8)");

        let cmd = RenderCommand {
            phase: RoundPhase::DisplaySequence,
            progress: Some((0, 4)),
            level: 1,
            ..cmd
        };
        assert_eq!(cmd.status_text(), "Level 1. Watch (1/4)");
    }
}
