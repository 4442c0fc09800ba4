pub mod arena;
pub mod color;
pub mod command_recorder;
pub mod config;
pub mod play_field;
pub mod shader;
pub mod wgpu_renderer;
pub mod window;

pub use arena::{ArenaScope, ScratchArena};
pub use command_recorder::{CommandRecorder, DrawCommand};
pub use config::PlayFieldConfig;
pub use play_field::{FrameStats, PlayFieldRenderer};
pub use wgpu_renderer::WgpuRenderer;
pub use window::{FrameHandler, run_app};
