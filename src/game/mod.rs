mod game_loop;
mod quadrant;
mod round;
mod sequence;
mod session;
mod state;
mod timer;

pub use game_loop::{FramePacer, GameLoop};
pub use quadrant::Quadrant;
pub use round::{RoundContext, RoundState};
pub use sequence::{Sequence, SequenceGenerator};
pub use session::Game;
pub use state::{Highlights, RenderCommand, RoundPhase};
pub use timer::RoundTimer;
