use gilrs::{EventType, Gilrs};
use tracing::{debug, warn};
use winit::event::KeyEvent;

use crate::input::gamepad::GamepadInput;
use crate::input::keyboard::translate_key_event;
use crate::traits::{InputProvider, RawInputEvent};

/// Unified input manager for keyboard and gamepad.
///
/// Keyboard events are pushed in by the window as they arrive; gamepad events
/// are pulled from gilrs when the frame polls.
pub struct InputManager {
    gilrs: Option<Gilrs>,
    gamepads: Vec<GamepadInput>,
    pending: Vec<RawInputEvent>,
}

impl InputManager {
    /// Create the manager. Gamepad support is optional; a failure to open
    /// gilrs is logged and keyboard input keeps working.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                warn!("Failed to initialize gamepad support: {}", e);
                None
            }
        };

        Self {
            gilrs,
            gamepads: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Manager without gamepad support.
    pub fn keyboard_only() -> Self {
        Self {
            gilrs: None,
            gamepads: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Queue a keyboard event received by the window.
    pub fn on_key_event(&mut self, event: &KeyEvent) {
        if let Some(raw) = translate_key_event(event) {
            self.pending.push(raw);
        }
    }

    /// Queue a raw event directly (close requests, synthetic input).
    pub fn push(&mut self, event: RawInputEvent) {
        self.pending.push(event);
    }

    pub fn connected_gamepad_count(&self) -> usize {
        self.gamepads.len()
    }

    fn pump_gamepads(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => {
                    if !self.gamepads.iter().any(|g| g.gamepad_id() == event.id) {
                        self.gamepads.push(GamepadInput::new(event.id));
                        debug!("Gamepad connected: {:?}", event.id);
                    }
                }
                EventType::Disconnected => {
                    self.gamepads.retain(|g| g.gamepad_id() != event.id);
                    debug!("Gamepad disconnected: {:?}", event.id);
                }
                ref other => {
                    if !self.gamepads.iter().any(|g| g.gamepad_id() == event.id) {
                        // Pads already plugged in at startup never send Connected.
                        self.gamepads.push(GamepadInput::new(event.id));
                    }
                    if let Some(pad) = self
                        .gamepads
                        .iter_mut()
                        .find(|g| g.gamepad_id() == event.id)
                    {
                        self.pending.extend(pad.process_event(other));
                    }
                }
            }
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for InputManager {
    fn poll_events(&mut self) -> Vec<RawInputEvent> {
        self.pump_gamepads();
        std::mem::take(&mut self.pending)
    }
}
