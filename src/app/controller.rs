use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use winit::event::KeyEvent;
use winit::window::Window;

use crate::config::AppConfig;
use crate::game::GameLoop;
use crate::input::InputManager;
use crate::render::{FrameHandler, WgpuRenderer};
use crate::traits::{RawInputEvent, RenderBackend, SystemTimeProvider};

/// Main application controller: owns the game loop and the GPU renderer.
pub struct MainController {
    game_loop: GameLoop<InputManager, SystemTimeProvider>,
    renderer: Option<WgpuRenderer>,
}

impl MainController {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let game_loop = GameLoop::new(config, InputManager::new(), SystemTimeProvider::new())?;
        Ok(Self {
            game_loop,
            renderer: None,
        })
    }

    pub fn frames(&self) -> u64 {
        self.game_loop.frames()
    }
}

impl FrameHandler for MainController {
    fn init(&mut self, window: Arc<Window>) -> Result<()> {
        let renderer = pollster::block_on(WgpuRenderer::new(window))?;
        let (width, height) = renderer.screen_size();
        info!(
            width,
            height,
            gamepads = self.game_loop.input_mut().connected_gamepad_count(),
            "renderer ready"
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_key(&mut self, event: &KeyEvent) {
        self.game_loop.input_mut().on_key_event(event);
    }

    fn on_close_requested(&mut self) {
        self.game_loop.input_mut().push(RawInputEvent::CloseRequested);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
    }

    fn frame(&mut self) -> bool {
        match self.renderer.as_mut() {
            Some(renderer) => self.game_loop.iterate(renderer),
            None => true,
        }
    }

    fn next_frame_at(&self) -> Instant {
        let deadline = self.game_loop.next_deadline_us();
        self.game_loop.time().instant_at(deadline)
    }
}
