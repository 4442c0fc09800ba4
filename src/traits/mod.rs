//! Seams between the game core and its host collaborators.

pub mod input;
pub mod render;
pub mod time;

pub use input::{InputProvider, RawInputEvent};
pub use render::{Color, RenderBackend, Vertex};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
