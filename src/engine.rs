//! Variable-timestep loop driver
//!
//! The host calls [`Engine::frame`] on its own schedule (an interval timer,
//! `requestAnimationFrame`, a sleep loop). Each frame measures the time since
//! the previous one, hands it to the game as `dt`, then draws.
//!
//! Keys arrive through an [`InputBus`] the engine listens on. They are
//! queued by the subscription and handed to the game by
//! [`Engine::pump_input`], so the game is never borrowed from inside a
//! bus callback.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::input::{Edge, InputBus, KeyEvent, Subscription};
use crate::render::{Color, Surface};

/// Anything the engine can drive
pub trait Game {
    /// Called once when the engine first starts
    fn init(&mut self) {}
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn start(&mut self, players: u8);
    fn stop(&mut self);
    fn update(&mut self, dt: f64);
    fn draw(&self, surface: &mut dyn Surface);
    /// A key went down; the game may ask the engine for an interaction
    fn on_key_down(&mut self, code: &str) -> Option<Request> {
        let _ = code;
        None
    }
    fn on_key_up(&mut self, code: &str) {
        let _ = code;
    }
}

/// Something only the engine can do for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Ask the user before abandoning the running match
    ConfirmStop,
}

/// Milliseconds from some fixed origin
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Blocking user dialogs
pub trait Prompt {
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
}

/// Timing of the most recent frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frame counter, wraps at the target fps
    pub count: u32,
    pub fps: f64,
    /// Milliseconds spent updating (at least 1)
    pub update: f64,
    /// Milliseconds spent drawing (at least 1)
    pub draw: f64,
    pub frame: f64,
}

pub struct Engine<G, C> {
    game: G,
    clock: C,
    fps: u32,
    running: bool,
    initialized: bool,
    last_frame: f64,
    show_stats: bool,
    stats: FrameStats,
    pending_keys: Rc<RefCell<VecDeque<KeyEvent>>>,
    /// Dropped with the engine, which leaves the bus
    subscription: Option<Subscription>,
}

impl<G: Game, C: Clock> Engine<G, C> {
    pub fn new(game: G, clock: C, fps: u32, show_stats: bool) -> Self {
        Self {
            game,
            clock,
            fps: fps.max(1),
            running: false,
            initialized: false,
            last_frame: 0.0,
            show_stats,
            stats: FrameStats::default(),
            pending_keys: Rc::default(),
            subscription: None,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Milliseconds between frames at the target rate
    pub fn interval(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn show_stats(&mut self, show: bool) {
        self.show_stats = show;
    }

    /// Begin ticking. The next frame measures from now.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if !self.initialized {
            self.game.init();
            self.initialized = true;
        }
        self.last_frame = self.clock.now_ms();
        self.running = true;
        log::debug!("Loop started");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::debug!("Loop stopped");
    }

    /// Run one update and draw. Returns false when the loop is stopped.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.running {
            return false;
        }
        let start = self.clock.now_ms();
        self.game.update((start - self.last_frame) / 1000.0);

        let middle = self.clock.now_ms();
        surface.clear(self.game.width(), self.game.height());
        self.game.draw(surface);
        self.draw_stats(surface);

        let end = self.clock.now_ms();
        self.update_stats(middle - start, end - middle);
        self.last_frame = start;
        true
    }

    /// Ask a yes/no question with the loop paused so the wait does not
    /// turn into one enormous `dt`.
    pub fn confirm(&mut self, prompt: &mut dyn Prompt, message: &str) -> bool {
        let was_running = self.running;
        self.stop();
        let answer = prompt.confirm(message);
        if was_running {
            self.start();
        }
        answer
    }

    pub fn alert(&mut self, prompt: &mut dyn Prompt, message: &str) {
        let was_running = self.running;
        self.stop();
        prompt.alert(message);
        if was_running {
            self.start();
        }
    }

    /// Queue every key event published on `bus` from now on, replacing any
    /// earlier subscription
    pub fn listen(&mut self, bus: &InputBus) {
        let queue = Rc::clone(&self.pending_keys);
        self.subscription = Some(bus.subscribe(move |event| {
            queue.borrow_mut().push_back(event.clone());
        }));
    }

    /// Stop receiving keys; anything already queued is discarded
    pub fn unlisten(&mut self) {
        self.subscription = None;
        self.pending_keys.borrow_mut().clear();
    }

    /// Hand queued keys to the game in arrival order
    pub fn pump_input(&mut self, prompt: &mut dyn Prompt) {
        loop {
            let next = self.pending_keys.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            self.handle_key(&event, prompt);
        }
    }

    /// Forward a key to the game and carry out anything it asks for
    pub fn handle_key(&mut self, event: &KeyEvent, prompt: &mut dyn Prompt) {
        match event.edge {
            Edge::Press => match self.game.on_key_down(&event.code) {
                Some(Request::ConfirmStop) => {
                    if self.confirm(prompt, "Abandon game in progress ?") {
                        self.game.stop();
                    }
                }
                None => {}
            },
            Edge::Release => self.game.on_key_up(&event.code),
        }
    }

    fn update_stats(&mut self, update: f64, draw: f64) {
        if !self.show_stats {
            return;
        }
        let stats = &mut self.stats;
        stats.update = update.max(1.0);
        stats.draw = draw.max(1.0);
        stats.frame = stats.update + stats.draw;
        stats.count = if stats.count == self.fps { 0 } else { stats.count + 1 };
        stats.fps = (self.fps as f64).min(1000.0 / stats.frame);
    }

    fn draw_stats(&self, surface: &mut dyn Surface) {
        if !self.show_stats {
            return;
        }
        let x = self.game.width() - 100.0;
        let y = self.game.height();
        let s = &self.stats;
        surface.fill_text(&format!("frame: {}", s.count), x, y - 60.0, Color::Stats);
        surface.fill_text(&format!("fps: {:.0}", s.fps), x, y - 50.0, Color::Stats);
        surface.fill_text(&format!("update: {:.0}ms", s.update), x, y - 40.0, Color::Stats);
        surface.fill_text(&format!("draw: {:.0}ms", s.draw), x, y - 30.0, Color::Stats);
    }
}
