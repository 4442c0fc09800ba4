//! Input handling for keyboard (winit) and gamepad (gilrs).
//!
//! This module provides:
//! - [`Buttons`]: device-independent button bitmask
//! - [`InputSnapshot`]: per-frame held/rising-edge state
//! - [`InputManager`]: production [`InputProvider`](crate::traits::InputProvider)
//! - [`ScriptedInput`]: replayed input for tests and demos

mod buttons;
mod gamepad;
mod input_manager;
mod keyboard;
mod scripted;
mod snapshot;

pub use buttons::Buttons;
pub use gamepad::button_to_buttons;
pub use input_manager::InputManager;
pub use keyboard::{key_to_buttons, translate_key, translate_key_event};
pub use scripted::ScriptedInput;
pub use snapshot::InputSnapshot;
