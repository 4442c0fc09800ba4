use crate::input::Buttons;

/// Raw device event, already translated from the backend's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputEvent {
    /// One or more buttons went down.
    Pressed(Buttons),
    /// One or more buttons went up.
    Released(Buttons),
    /// The host asked the window to close.
    CloseRequested,
}

/// Abstraction over input sources.
/// Implementations: InputManager (keyboard/gamepad), ScriptedInput (testing).
pub trait InputProvider {
    /// Drain the events received since the last call.
    fn poll_events(&mut self) -> Vec<RawInputEvent>;
}
