//! Keyboard mapping and the input event queue
//!
//! Events are queued as they arrive and handed to the game between ticks.
//! A detached queue drops everything; reattaching starts clean.

use std::collections::VecDeque;

use crate::sim::state::{Action, Direction, InputEvent};

/// Map a key name (browser `KeyboardEvent.key` style) to an input event
pub fn key_to_input(key: &str) -> Option<InputEvent> {
    let event = match key {
        "ArrowUp" | "w" | "W" => InputEvent::Direction(Direction::Up),
        "ArrowDown" | "s" | "S" => InputEvent::Direction(Direction::Down),
        "ArrowLeft" | "a" | "A" => InputEvent::Direction(Direction::Left),
        "ArrowRight" | "d" | "D" => InputEvent::Direction(Direction::Right),
        " " | "Space" | "Enter" => InputEvent::Action(Action::Start),
        "p" | "P" | "Escape" => InputEvent::Action(Action::Pause),
        _ => return None,
    };
    Some(event)
}

#[derive(Debug, Clone)]
pub struct InputQueue {
    attached: bool,
    queue: VecDeque<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    /// New queue, attached
    pub fn new() -> Self {
        Self {
            attached: true,
            queue: VecDeque::new(),
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening and forget anything not yet dispatched
    pub fn detach(&mut self) {
        self.attached = false;
        self.queue.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queue an event; false when detached
    pub fn push(&mut self, event: InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        self.queue.push_back(event);
        true
    }

    /// Queue a key press; false for unmapped keys or when detached
    pub fn push_key(&mut self, key: &str) -> bool {
        match key_to_input(key) {
            Some(event) => self.push(event),
            None => {
                log::debug!("Ignoring unmapped key {key:?}");
                false
            }
        }
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
