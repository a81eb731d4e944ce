//! Constant-acceleration motion
//!
//! Objects always speed up along their current direction of travel on each
//! axis independently; nothing in the game ever decelerates.

use glam::DVec2;

/// Result of advancing a body by one variable timestep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Raw movement vector for this step (`position - start`), used for
    /// collision probing before any wall or paddle correction
    pub displacement: DVec2,
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Direction of travel on one axis. A stationary axis gets no acceleration.
#[inline]
fn travel_sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Advance `position`/`velocity` by `dt` seconds under an acceleration of
/// magnitude `accel` pointing along the current velocity on each axis.
pub fn accelerate(position: DVec2, velocity: DVec2, accel: f64, dt: f64) -> Motion {
    let accel = DVec2::new(accel * travel_sign(velocity.x), accel * travel_sign(velocity.y));
    let next = position + velocity * dt + accel * (0.5 * dt * dt);
    Motion {
        displacement: next - position,
        position: next,
        velocity: velocity + accel * dt,
    }
}
