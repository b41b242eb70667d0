//! Buffered player input.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::ActionBuffer;
use crate::states::player::PlayerAction;

#[derive(Debug)]
struct Inner {
    window: f32,
    entries: VecDeque<(PlayerAction, f32)>,
}

/// Input buffer whose presses expire after a fixed window.
///
/// Cloning yields another handle to the same queue, so the host keeps one
/// handle for pressing buttons while the controller owns the other.
#[derive(Debug, Clone)]
pub struct InputQueue {
    inner: Rc<RefCell<Inner>>,
}

impl InputQueue {
    pub const DEFAULT_WINDOW: f32 = 0.25;

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Creates a queue keeping presses for `window` seconds.
    pub fn with_window(window: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                window,
                entries: VecDeque::new(),
            })),
        }
    }

    /// Buffers `action` pressed at `now`.
    pub fn press(&self, action: PlayerAction, now: f32) {
        self.inner.borrow_mut().entries.push_back((action, now));
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionBuffer for InputQueue {
    fn has_buffered(&self, action: PlayerAction) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|(buffered, _)| *buffered == action)
    }

    fn consume_buffered(&mut self, action: PlayerAction) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.entries.iter().position(|(buffered, _)| *buffered == action) {
            Some(index) => {
                inner.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn expire(&mut self, now: f32) {
        let mut inner = self.inner.borrow_mut();
        let window = inner.window;
        inner.entries.retain(|(_, at)| now - at <= window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_expire_after_window() {
        let host = InputQueue::with_window(0.2);
        let mut buffer = host.clone();

        host.press(PlayerAction::Parry, 1.0);
        buffer.expire(1.1);
        assert!(buffer.has_buffered(PlayerAction::Parry));

        buffer.expire(1.3);
        assert!(!buffer.has_buffered(PlayerAction::Parry));
        assert!(host.is_empty());
    }

    #[test]
    fn consume_removes_one_press() {
        let mut queue = InputQueue::new();
        queue.press(PlayerAction::LightAttack, 0.0);
        queue.press(PlayerAction::LightAttack, 0.1);
        assert!(queue.consume_buffered(PlayerAction::LightAttack));
        assert_eq!(queue.len(), 1);
        assert!(!queue.consume_buffered(PlayerAction::Dodge));
    }
}
