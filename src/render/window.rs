use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use tracing::{debug, error};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::WindowConfig;

/// Bridges winit events to a frame-driven controller.
/// Implementors are passed to [`run_app`].
pub trait FrameHandler {
    /// Called once when the window exists. An error aborts the event loop.
    fn init(&mut self, window: Arc<Window>) -> Result<()>;
    /// Keyboard input for the window.
    fn on_key(&mut self, event: &KeyEvent);
    /// The user asked to close the window.
    fn on_close_requested(&mut self);
    fn on_resize(&mut self, width: u32, height: u32);
    /// Run one loop iteration. Returning false ends the event loop.
    fn frame(&mut self) -> bool;
    /// Wall-clock instant at which the next frame is due.
    fn next_frame_at(&self) -> Instant;
}

struct App<H: FrameHandler> {
    handler: H,
    config: WindowConfig,
    window: Option<Arc<Window>>,
    failure: Option<anyhow::Error>,
}

impl<H: FrameHandler> App<H> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl<H: FrameHandler> ApplicationHandler for App<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow!("failed to create window: {e}"));
                return;
            }
        };

        if let Err(e) = self.handler.init(window.clone()) {
            self.fail(event_loop, e.context("failed to initialize game"));
            return;
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.handler.on_close_requested();
            }
            WindowEvent::Resized(size) => {
                self.handler.on_resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handler.on_key(&event);
            }
            WindowEvent::RedrawRequested => {
                if !self.handler.frame() {
                    debug!("frame handler stopped the loop");
                    event_loop.exit();
                    return;
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.handler.next_frame_at()));
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        let due = self.handler.next_frame_at();
        if Instant::now() >= due {
            window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(due));
        }
    }
}

/// Create the window and drive `handler` until it stops or the loop fails.
pub fn run_app<H: FrameHandler>(config: &WindowConfig, handler: H) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;

    let mut app = App {
        handler,
        config: config.clone(),
        window: None,
        failure: None,
    };

    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop error: {e}"))?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
