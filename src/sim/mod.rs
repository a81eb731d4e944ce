//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, everything scales by `dt`
//! - Randomness only through an injected [`RandomSource`]
//! - Drawing only through the [`Surface`](crate::render::Surface) trait

pub mod ball;
pub mod game;
pub mod intersect;
pub mod kinematics;
pub mod level;
pub mod paddle;
pub mod rng;

pub use ball::{Ball, MAX_FOOTPRINTS};
pub use game::{GameEvent, Match, PaddleSnapshot, Phase, Player, Snapshot, Sound};
pub use intersect::{Bounds, Intercept, Segment, Side, intersect};
pub use kinematics::{Motion, accelerate};
pub use level::{EVEN_LEVEL_INDEX, LEVELS, Level, MAX_LEVEL_INDEX};
pub use paddle::{Paddle, PaddleSide, Prediction};
pub use rng::{FixedRandom, GameRng, RandomSource};
