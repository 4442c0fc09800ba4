use gilrs::{Axis, Button, EventType, GamepadId};

use crate::input::Buttons;
use crate::traits::RawInputEvent;

/// Stick deflection at which a direction counts as pressed.
const AXIS_PRESS_THRESHOLD: f32 = 0.5;
/// Deflection below which a pressed stick direction is released again.
const AXIS_RELEASE_THRESHOLD: f32 = 0.3;

/// Fixed gamepad bindings: D-pad for directions, South/Start to start.
pub fn button_to_buttons(button: Button) -> Option<Buttons> {
    match button {
        Button::DPadUp => Some(Buttons::UP),
        Button::DPadDown => Some(Buttons::DOWN),
        Button::DPadLeft => Some(Buttons::LEFT),
        Button::DPadRight => Some(Buttons::RIGHT),
        Button::South | Button::Start => Some(Buttons::START),
        Button::Select => Some(Buttons::QUIT),
        _ => None,
    }
}

/// Left stick treated as a second D-pad, with hysteresis per axis.
#[derive(Debug, Default)]
struct StickState {
    x: Option<Buttons>,
    y: Option<Buttons>,
}

impl StickState {
    fn update(&mut self, axis: Axis, value: f32) -> Vec<RawInputEvent> {
        let (slot, negative, positive) = match axis {
            Axis::LeftStickX => (&mut self.x, Buttons::LEFT, Buttons::RIGHT),
            // gilrs reports up as positive Y.
            Axis::LeftStickY => (&mut self.y, Buttons::DOWN, Buttons::UP),
            _ => return Vec::new(),
        };

        let wanted = if value >= AXIS_PRESS_THRESHOLD {
            Some(positive)
        } else if value <= -AXIS_PRESS_THRESHOLD {
            Some(negative)
        } else if value.abs() < AXIS_RELEASE_THRESHOLD {
            None
        } else {
            // Dead band between the thresholds keeps the current state.
            *slot
        };

        if wanted == *slot {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(old) = slot.take() {
            events.push(RawInputEvent::Released(old));
        }
        if let Some(new) = wanted {
            events.push(RawInputEvent::Pressed(new));
        }
        *slot = wanted;
        events
    }
}

/// Gamepad input handler using gilrs.
pub struct GamepadInput {
    gamepad_id: GamepadId,
    stick: StickState,
}

impl GamepadInput {
    pub fn new(gamepad_id: GamepadId) -> Self {
        Self {
            gamepad_id,
            stick: StickState::default(),
        }
    }

    pub fn gamepad_id(&self) -> GamepadId {
        self.gamepad_id
    }

    /// Translate one gilrs event for this pad into raw input events.
    pub fn process_event(&mut self, event: &EventType) -> Vec<RawInputEvent> {
        match *event {
            EventType::ButtonPressed(button, _) => button_to_buttons(button)
                .map(RawInputEvent::Pressed)
                .into_iter()
                .collect(),
            EventType::ButtonReleased(button, _) => button_to_buttons(button)
                .map(RawInputEvent::Released)
                .into_iter()
                .collect(),
            EventType::AxisChanged(axis, value, _) => self.stick.update(axis, value),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpad_bindings() {
        assert_eq!(button_to_buttons(Button::DPadUp), Some(Buttons::UP));
        assert_eq!(button_to_buttons(Button::DPadDown), Some(Buttons::DOWN));
        assert_eq!(button_to_buttons(Button::DPadLeft), Some(Buttons::LEFT));
        assert_eq!(button_to_buttons(Button::DPadRight), Some(Buttons::RIGHT));
        assert_eq!(button_to_buttons(Button::South), Some(Buttons::START));
        assert_eq!(button_to_buttons(Button::Select), Some(Buttons::QUIT));
        assert_eq!(button_to_buttons(Button::North), None);
    }

    #[test]
    fn test_stick_press_and_release() {
        let mut stick = StickState::default();
        assert_eq!(
            stick.update(Axis::LeftStickY, 0.9),
            vec![RawInputEvent::Pressed(Buttons::UP)]
        );
        // Still deflected: nothing new.
        assert!(stick.update(Axis::LeftStickY, 0.8).is_empty());
        // Inside the dead band: stays pressed.
        assert!(stick.update(Axis::LeftStickY, 0.4).is_empty());
        assert_eq!(
            stick.update(Axis::LeftStickY, 0.0),
            vec![RawInputEvent::Released(Buttons::UP)]
        );
    }

    #[test]
    fn test_stick_flip_releases_first() {
        let mut stick = StickState::default();
        stick.update(Axis::LeftStickX, -1.0);
        assert_eq!(
            stick.update(Axis::LeftStickX, 1.0),
            vec![
                RawInputEvent::Released(Buttons::LEFT),
                RawInputEvent::Pressed(Buttons::RIGHT),
            ]
        );
    }

    #[test]
    fn test_other_axes_ignored() {
        let mut stick = StickState::default();
        assert!(stick.update(Axis::RightStickX, 1.0).is_empty());
    }
}
