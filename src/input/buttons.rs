use bitflags::bitflags;

use crate::game::Quadrant;

bitflags! {
    /// Logical buttons the game reacts to, independent of device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const START = 1 << 4;
        const QUIT = 1 << 5;

        const DIRECTIONS = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Buttons {
    /// Directional button that selects `quadrant`.
    pub const fn for_quadrant(quadrant: Quadrant) -> Self {
        match quadrant {
            Quadrant::Down => Self::DOWN,
            Quadrant::Left => Self::LEFT,
            Quadrant::Up => Self::UP,
            Quadrant::Right => Self::RIGHT,
        }
    }
}
