//! Keyboard input
//!
//! Hosts push raw key codes (DOM `KeyboardEvent.code` names) into an
//! [`InputBus`]. Anything interested subscribes and gets a [`Subscription`]
//! back; dropping it is the only way to unsubscribe.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a match with this many human players
    Start(u8),
    Quit,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Command {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Digit0" => Command::Start(0),
            "Digit1" => Command::Start(1),
            "Digit2" => Command::Start(2),
            "Escape" => Command::Quit,
            "KeyQ" => Command::LeftUp,
            "KeyA" => Command::LeftDown,
            "KeyP" => Command::RightUp,
            "KeyL" => Command::RightDown,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Press,
    Release,
}

/// A key going down or up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub edge: Edge,
    pub code: String,
}

impl KeyEvent {
    pub fn press(code: impl Into<String>) -> Self {
        Self {
            edge: Edge::Press,
            code: code.into(),
        }
    }

    pub fn release(code: impl Into<String>) -> Self {
        Self {
            edge: Edge::Release,
            code: code.into(),
        }
    }
}

type Handler = Box<dyn FnMut(&KeyEvent)>;

#[derive(Default)]
struct Handlers {
    next_id: u64,
    entries: Vec<(u64, Handler)>,
}

/// Fan-out of key events to scoped subscribers
#[derive(Default, Clone)]
pub struct InputBus {
    handlers: Rc<RefCell<Handlers>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every event until the returned guard is dropped.
    ///
    /// Handlers must not subscribe or drop subscriptions while being called.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl FnMut(&KeyEvent) + 'static) -> Subscription {
        let mut handlers = self.handlers.borrow_mut();
        let id = handlers.next_id;
        handlers.next_id += 1;
        handlers.entries.push((id, Box::new(handler)));
        Subscription {
            id,
            handlers: Rc::downgrade(&self.handlers),
        }
    }

    pub fn dispatch(&self, event: &KeyEvent) {
        for (_, handler) in self.handlers.borrow_mut().entries.iter_mut() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a handler registered on an [`InputBus`]
pub struct Subscription {
    id: u64,
    handlers: Weak<RefCell<Handlers>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(handlers) = self.handlers.upgrade() else {
            return;
        };
        match handlers.try_borrow_mut() {
            Ok(mut handlers) => handlers.entries.retain(|(id, _)| *id != self.id),
            Err(_) => log::warn!("Subscription {} dropped during dispatch", self.id),
        };
    }
}
