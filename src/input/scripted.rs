use std::collections::VecDeque;

use crate::input::Buttons;
use crate::traits::{InputProvider, RawInputEvent};

/// Input provider that replays a fixed script, one batch per poll.
///
/// Once the script runs out every poll returns no events.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<RawInputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered by the next unused poll.
    pub fn push_frame(&mut self, events: Vec<RawInputEvent>) {
        self.frames.push_back(events);
    }

    /// Queue `count` polls with no events.
    pub fn push_idle(&mut self, count: usize) {
        self.frames
            .extend(std::iter::repeat_with(Vec::new).take(count));
    }

    /// Queue a press on one frame and the release on the next.
    pub fn push_tap(&mut self, buttons: Buttons) {
        self.push_frame(vec![RawInputEvent::Pressed(buttons)]);
        self.push_frame(vec![RawInputEvent::Released(buttons)]);
    }

    /// Polls left before the script is exhausted.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputProvider for ScriptedInput {
    fn poll_events(&mut self) -> Vec<RawInputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
