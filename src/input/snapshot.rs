use crate::input::Buttons;
use crate::traits::RawInputEvent;

/// Per-frame button state with rising-edge detection.
///
/// `down` is rebuilt from raw events every frame and `previous` keeps last
/// frame's mask. A press that is released again before the frame ends is
/// still reported through `latched`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    down: Buttons,
    previous: Buttons,
    latched: Buttons,
    close_requested: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the current mask into the previous one and drop per-frame state.
    pub fn begin_frame(&mut self) {
        self.previous = self.down;
        self.latched = Buttons::empty();
        self.close_requested = false;
    }

    /// Fold a single raw event into the current frame.
    pub fn apply(&mut self, event: RawInputEvent) {
        match event {
            RawInputEvent::Pressed(buttons) => {
                // Auto-repeat of a held button is not a new press.
                self.latched |= buttons.difference(self.down);
                self.down |= buttons;
            }
            RawInputEvent::Released(buttons) => {
                self.down.remove(buttons);
            }
            RawInputEvent::CloseRequested => {
                self.close_requested = true;
            }
        }
    }

    /// Start a new frame and apply every event received since the last one.
    pub fn rebuild<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = RawInputEvent>,
    {
        self.begin_frame();
        for event in events {
            self.apply(event);
        }
    }

    /// Buttons that went down this frame.
    pub fn pressed(&self) -> Buttons {
        self.latched | self.down.difference(self.previous)
    }

    /// Buttons that went up this frame.
    pub fn released(&self) -> Buttons {
        self.previous.difference(self.down)
    }

    /// Buttons currently held.
    pub fn held(&self) -> Buttons {
        self.down
    }

    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.pressed().intersects(buttons)
    }

    pub fn is_down(&self, buttons: Buttons) -> bool {
        self.down.intersects(buttons)
    }

    /// Quit key held or pressed, or the window was asked to close.
    pub fn quit_requested(&self) -> bool {
        self.close_requested || self.is_down(Buttons::QUIT) || self.just_pressed(Buttons::QUIT)
    }
}
