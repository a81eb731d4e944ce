//! The ball: motion, wall bounces, paddle collisions and the footprint trail

use std::collections::VecDeque;

use glam::DVec2;

use super::game::Player;
use super::intersect::{Bounds, Intercept, Segment, Side, intersect};
use super::kinematics::accelerate;
use super::paddle::Paddle;
use super::rng::RandomSource;
use crate::render::{Color, Surface};
use crate::settings::{Settings, SettingsError};

/// Maximum number of footprints kept for the trail
pub const MAX_FOOTPRINTS: usize = 50;

/// Updates between footprints while the ball keeps its heading
const FOOTPRINT_INTERVAL: u32 = 5;

/// Vertical speed multiplier when a moving paddle pushes the ball along
const SPIN_WITH: f64 = 1.5;
/// Vertical speed multiplier when a moving paddle cuts against the ball
const SPIN_AGAINST: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Ball {
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    /// Serve speed on each axis
    speed: f64,
    accel: f64,
    dx_changed: bool,
    dy_changed: bool,
    /// Oldest first
    footprints: VecDeque<DVec2>,
    footprint_countdown: u32,
    show_footprints: bool,
}

impl Ball {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let radius = settings.ball_radius;
        let min_x = radius;
        let max_x = settings.width - radius;
        let min_y = settings.wall_width + radius;
        let max_y = settings.height - settings.wall_width - radius;
        Ok(Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            radius,
            min_x,
            max_x,
            min_y,
            max_y,
            speed: (max_x - min_x) / settings.ball_speed,
            accel: settings.ball_accel,
            dx_changed: false,
            dy_changed: false,
            footprints: VecDeque::with_capacity(MAX_FOOTPRINTS + 1),
            footprint_countdown: 0,
            show_footprints: settings.show_footprints,
        })
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn left(&self) -> f64 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.radius
    }

    /// Range the ball centre may occupy vertically
    pub fn vertical_bounds(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    pub fn footprints(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.footprints.iter().copied()
    }

    pub fn footprint_count(&self) -> usize {
        self.footprints.len()
    }

    pub fn set_show_footprints(&mut self, show: bool) {
        self.show_footprints = show;
    }

    /// Serve from the scorer's edge (left edge when nobody scored yet)
    /// toward the other side, at a random height.
    pub fn reset(&mut self, scorer: Option<Player>, rng: &mut dyn RandomSource) {
        self.footprints.clear();
        let from_right = scorer == Some(Player::Right);
        let x = if from_right { self.max_x } else { self.min_x };
        let y = rng.between(self.min_y, self.max_y);
        self.set_position(x, y);
        let dx = if from_right { -self.speed } else { self.speed };
        self.set_velocity(dx, self.speed);
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.pos = DVec2::new(x, y);
    }

    pub fn set_velocity(&mut self, dx: f64, dy: f64) {
        self.dx_changed = (self.vel.x < 0.0) != (dx < 0.0);
        self.dy_changed = (self.vel.y < 0.0) != (dy < 0.0);
        self.vel = DVec2::new(dx, dy);
    }

    /// Sample the trail on a direction change or every few updates
    pub fn record_footprint(&mut self) {
        if self.footprint_countdown == 0 || self.dx_changed || self.dy_changed {
            self.footprints.push_back(self.pos);
            if self.footprints.len() > MAX_FOOTPRINTS {
                self.footprints.pop_front();
            }
            self.footprint_countdown = FOOTPRINT_INTERVAL;
        } else {
            self.footprint_countdown -= 1;
        }
    }

    /// Where the path `pos -> pos + (dx, dy)` first touches `rect`, treating
    /// the rectangle as grown by the ball radius. Faces facing the ball's
    /// horizontal travel win over top/bottom edges.
    pub fn test_paddle_intercept(&self, rect: &Bounds, dx: f64, dy: f64) -> Option<Intercept> {
        let r = self.radius;
        let path = Segment::new(self.pos, self.pos + DVec2::new(dx, dy));

        let horizontal = if dx < 0.0 {
            intersect(
                path,
                Segment::from_coords(rect.right + r, rect.top - r, rect.right + r, rect.bottom + r),
                Side::Right,
            )
        } else if dx > 0.0 {
            intersect(
                path,
                Segment::from_coords(rect.left - r, rect.top - r, rect.left - r, rect.bottom + r),
                Side::Left,
            )
        } else {
            None
        };
        if horizontal.is_some() {
            return horizontal;
        }

        if dy < 0.0 {
            intersect(
                path,
                Segment::from_coords(rect.left - r, rect.bottom + r, rect.right + r, rect.bottom + r),
                Side::Bottom,
            )
        } else if dy > 0.0 {
            intersect(
                path,
                Segment::from_coords(rect.left - r, rect.top - r, rect.right + r, rect.top - r),
                Side::Top,
            )
        } else {
            None
        }
    }

    pub fn update(&mut self, dt: f64, left: &Paddle, right: &Paddle) {
        let motion = accelerate(self.pos, self.vel, self.accel, dt);
        let mut pos = motion.position;
        let mut vel = motion.velocity;

        if vel.y > 0.0 && pos.y > self.max_y {
            pos.y = self.max_y;
            vel.y = -vel.y;
        } else if vel.y < 0.0 && pos.y < self.min_y {
            pos.y = self.min_y;
            vel.y = -vel.y;
        }

        let paddle = if vel.x < 0.0 { left } else { right };
        if let Some(hit) =
            self.test_paddle_intercept(&paddle.bounds(), motion.displacement.x, motion.displacement.y)
        {
            if hit.side.is_horizontal() {
                pos.x = hit.point.x;
                vel.x = -vel.x;
            } else {
                pos.y = hit.point.y;
                vel.y = -vel.y;
            }
            vel.y = spin(paddle, vel.y);
        }

        // Top/bottom paddle hits can snap just outside the wall band
        pos.y = pos.y.clamp(self.min_y, self.max_y);

        self.set_position(pos.x, pos.y);
        self.set_velocity(vel.x, vel.y);
        self.record_footprint();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let side = self.radius * 2.0;
        surface.fill_rect(self.pos.x - self.radius, self.pos.y - self.radius, side, side, Color::Ball);
        if self.show_footprints {
            for p in &self.footprints {
                surface.stroke_rect(p.x - self.radius, p.y - self.radius, side, side, Color::Footprint);
            }
        }
    }
}

/// Steeper return when the paddle moves with the ball, shallower against it
fn spin(paddle: &Paddle, dy: f64) -> f64 {
    if paddle.is_moving_up() {
        dy * if dy < 0.0 { SPIN_WITH } else { SPIN_AGAINST }
    } else if paddle.is_moving_down() {
        dy * if dy > 0.0 { SPIN_WITH } else { SPIN_AGAINST }
    } else {
        dy
    }
}
