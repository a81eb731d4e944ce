//! Retro Pong - classic two-paddle Pong with an adaptive AI opponent
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, collisions, paddles, AI, match state)
//! - `engine`: Variable-timestep loop driver
//! - `render`: Drawing contract and court layout
//! - `input`: Key mapping and scoped subscriptions
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Data-driven game configuration

pub mod engine;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use engine::{Clock, Engine, FrameStats, Game, Prompt, Request};
pub use settings::{Settings, SettingsError};
pub use sim::{GameEvent, Match, Player};
