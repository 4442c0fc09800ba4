use std::fmt;

/// One of the four sectors of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    Down = 0,
    Left = 1,
    Up = 2,
    Right = 3,
}

impl Quadrant {
    pub const COUNT: usize = 4;

    pub const ALL: [Quadrant; Self::COUNT] =
        [Quadrant::Down, Quadrant::Left, Quadrant::Up, Quadrant::Right];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Quadrant::Down),
            1 => Some(Quadrant::Left),
            2 => Some(Quadrant::Up),
            3 => Some(Quadrant::Right),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Quadrant::Down => "down",
            Quadrant::Left => "left",
            Quadrant::Up => "up",
            Quadrant::Right => "right",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
