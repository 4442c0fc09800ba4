use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::Buttons;
use crate::traits::RawInputEvent;

/// Fixed keyboard bindings.
pub fn key_to_buttons(code: KeyCode) -> Option<Buttons> {
    match code {
        KeyCode::ArrowUp => Some(Buttons::UP),
        KeyCode::ArrowDown => Some(Buttons::DOWN),
        KeyCode::ArrowLeft => Some(Buttons::LEFT),
        KeyCode::ArrowRight => Some(Buttons::RIGHT),
        KeyCode::Space => Some(Buttons::START),
        KeyCode::Escape | KeyCode::KeyQ => Some(Buttons::QUIT),
        _ => None,
    }
}

/// Translate a physical key transition into a raw input event.
pub fn translate_key(code: KeyCode, state: ElementState) -> Option<RawInputEvent> {
    let buttons = key_to_buttons(code)?;
    Some(match state {
        ElementState::Pressed => RawInputEvent::Pressed(buttons),
        ElementState::Released => RawInputEvent::Released(buttons),
    })
}

/// Translate a winit keyboard event. OS key repeats are dropped.
pub fn translate_key_event(event: &KeyEvent) -> Option<RawInputEvent> {
    if event.repeat {
        return None;
    }
    match event.physical_key {
        PhysicalKey::Code(code) => translate_key(code, event.state),
        PhysicalKey::Unidentified(_) => None,
    }
}
