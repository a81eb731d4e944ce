//! Paddles and the AI that drives them in autoplay
//!
//! The AI never simulates the ball. It casts the ball's current heading
//! toward its own face, mirrors the crossing point back into the court to
//! account for wall bounces, and then aims at a deliberately noisy version
//! of that point. How often it looks again and how noisy the guess is both
//! come from the current [`Level`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::intersect::{Bounds, Side};
use super::level::Level;
use super::rng::RandomSource;
use crate::render::{Color, Surface};
use crate::settings::{Settings, SettingsError};

/// Distance (pixels) either side of the paddle centre the AI treats as
/// close enough
const DEAD_ZONE: f64 = 5.0;

/// The prediction probe travels this many court widths horizontally, so it
/// always reaches the paddle plane whatever the ball speed
const LOOKAHEAD_COURTS: f64 = 2.0;

/// Which end of the court a paddle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
}

/// Where the AI expects the ball to cross its face
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Ball velocity when the prediction was made
    pub velocity: DVec2,
    /// Aim point including the level's error
    pub point: DVec2,
    /// Folded crossing point without error
    pub exact: DVec2,
    /// Seconds since the prediction was made
    pub since: f64,
    pub side: Side,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    side: PaddleSide,
    /// Top-left corner
    pos: DVec2,
    width: f64,
    height: f64,
    court_width: f64,
    court_height: f64,
    min_y: f64,
    max_y: f64,
    /// Pixels per second at full intent
    speed: f64,
    up: f64,
    down: f64,
    auto: bool,
    level: Level,
    prediction: Option<Prediction>,
    show_predictions: bool,
}

impl Paddle {
    pub fn new(settings: &Settings, side: PaddleSide) -> Result<Self, SettingsError> {
        settings.validate()?;
        let min_y = settings.wall_width;
        let max_y = settings.height - settings.wall_width - settings.paddle_height;
        let x = match side {
            PaddleSide::Left => 0.0,
            PaddleSide::Right => settings.width - settings.paddle_width,
        };
        Ok(Self {
            side,
            pos: DVec2::new(x, min_y + (max_y - min_y) / 2.0),
            width: settings.paddle_width,
            height: settings.paddle_height,
            court_width: settings.width,
            court_height: settings.height,
            min_y,
            max_y,
            speed: (max_y - min_y) / settings.paddle_speed,
            up: 0.0,
            down: 0.0,
            auto: false,
            level: Level::default(),
            prediction: None,
            show_predictions: settings.show_predictions,
        })
    }

    pub fn side(&self) -> PaddleSide {
        self.side
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.left(),
            right: self.right(),
            top: self.top(),
            bottom: self.bottom(),
        }
    }

    /// Range the top edge may occupy
    pub fn vertical_bounds(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn is_moving_up(&self) -> bool {
        self.up > 0.0
    }

    pub fn is_moving_down(&self) -> bool {
        self.down > 0.0
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn set_show_predictions(&mut self, show: bool) {
        self.show_predictions = show;
    }

    /// Turn autoplay on at `level`, or off. Turning it on needs a level;
    /// turning it off drops any movement and prediction.
    pub fn set_auto(&mut self, on: bool, level: Option<i32>) {
        if on && !self.auto {
            if let Some(level) = level {
                self.auto = true;
                self.set_level(level);
            }
        } else if !on && self.auto {
            self.auto = false;
            self.stop_moving_up();
            self.stop_moving_down();
            self.prediction = None;
        }
    }

    /// Change difficulty; only meaningful while autoplaying
    pub fn set_level(&mut self, index: i32) {
        if self.auto {
            self.level = Level::from_index(index);
            log::debug!("{:?} paddle level {index}: {:?}", self.side, self.level);
        }
    }

    /// Intent is exclusive: moving one way cancels the other
    pub fn move_up(&mut self) {
        self.down = 0.0;
        self.up = 1.0;
    }

    pub fn move_down(&mut self) {
        self.up = 0.0;
        self.down = 1.0;
    }

    pub fn stop_moving_up(&mut self) {
        self.up = 0.0;
    }

    pub fn stop_moving_down(&mut self) {
        self.down = 0.0;
    }

    pub fn update(&mut self, dt: f64, ball: &Ball, rng: &mut dyn RandomSource) {
        if self.auto {
            self.ai(dt, ball, rng);
        }

        let amount = self.down - self.up;
        if amount != 0.0 {
            self.pos.y = (self.pos.y + amount * dt * self.speed).clamp(self.min_y, self.max_y);
        }
    }

    /// Steer toward the predicted crossing point
    pub fn ai(&mut self, dt: f64, ball: &Ball, rng: &mut dyn RandomSource) {
        let x = ball.position().x;
        let dx = ball.velocity().x;
        if (x < self.left() && dx < 0.0) || (x > self.right() && dx > 0.0) {
            // Already past us and leaving
            self.stop_moving_up();
            self.stop_moving_down();
            return;
        }

        self.predict(dt, ball, rng);
        let Some(target) = self.prediction.map(|p| p.point.y) else {
            return;
        };
        let centre = self.pos.y + self.height / 2.0;
        if target < centre - DEAD_ZONE {
            self.move_up();
        } else if target > centre + DEAD_ZONE {
            self.move_down();
        } else {
            self.stop_moving_up();
            self.stop_moving_down();
        }
    }

    /// Refresh the prediction unless the ball kept its heading and the
    /// level's reaction delay has not yet passed.
    pub fn predict(&mut self, dt: f64, ball: &Ball, rng: &mut dyn RandomSource) {
        let vel = ball.velocity();
        if let Some(prediction) = self.prediction.as_mut() {
            if prediction.velocity.x * vel.x > 0.0
                && prediction.velocity.y * vel.y > 0.0
                && prediction.since < self.level.reaction_delay
            {
                prediction.since += dt;
                return;
            }
        }

        self.prediction = self.forecast(ball, rng);
        if let Some(p) = &self.prediction {
            log::trace!(
                "{:?} paddle predicts y={:.1} (exact {:.1})",
                self.side,
                p.point.y,
                p.exact.y
            );
        }
    }

    fn forecast(&self, ball: &Ball, rng: &mut dyn RandomSource) -> Option<Prediction> {
        let vel = ball.velocity();
        if vel.x == 0.0 {
            return None;
        }

        let horizon = LOOKAHEAD_COURTS * self.court_width / vel.x.abs();
        let probe = vel * horizon;
        // Tall enough that the probe can only leave through the paddle plane
        let reach = probe.y.abs() + self.court_height;
        let column = Bounds {
            left: self.left(),
            right: self.right(),
            top: -reach,
            bottom: self.court_height + reach,
        };
        let hit = ball.test_paddle_intercept(&column, probe.x, probe.y)?;

        let radius = ball.radius();
        let exact_y = fold(hit.point.y, self.min_y + radius, self.max_y + self.height - radius);
        let exact = DVec2::new(hit.point.x, exact_y);

        let distance = if vel.x < 0.0 {
            ball.position().x - self.right()
        } else {
            self.left() - ball.position().x
        };
        let error = (self.level.error_magnitude * distance / self.court_width).abs();
        let point = DVec2::new(exact.x, exact.y + rng.between(-error, error));

        Some(Prediction {
            velocity: vel,
            point,
            exact,
            since: 0.0,
            side: hit.side,
            radius,
        })
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.pos.x, self.pos.y, self.width, self.height, Color::Walls);
        if !self.show_predictions {
            return;
        }
        if let Some(p) = &self.prediction {
            let side = p.radius * 2.0;
            let x = p.point.x - p.radius;
            surface.stroke_rect(x, p.exact.y - p.radius, side, side, Color::PredictionExact);
            surface.stroke_rect(x, p.point.y - p.radius, side, side, Color::PredictionGuess);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: f64) {
        self.pos.y = y.clamp(self.min_y, self.max_y);
    }
}

/// Mirror `y` back into `[top, bottom]` as if it had bounced off both edges
fn fold(y: f64, top: f64, bottom: f64) -> f64 {
    let span = bottom - top;
    if span <= 0.0 {
        return top;
    }
    let period = 2.0 * span;
    let offset = (y - top).rem_euclid(period);
    top + if offset > span { period - offset } else { offset }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LEVELS;
    use crate::sim::rng::{FixedRandom, GameRng};

    fn setup(side: PaddleSide) -> (Paddle, Ball) {
        let settings = Settings::default();
        (
            Paddle::new(&settings, side).unwrap(),
            Ball::new(&settings).unwrap(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_new_places_paddles_at_court_ends() {
        let (left, _) = setup(PaddleSide::Left);
        let (right, _) = setup(PaddleSide::Right);
        assert_eq!(left.position(), DVec2::new(0.0, 210.0));
        assert_eq!(right.position(), DVec2::new(628.0, 210.0));
        assert_eq!(right.right(), 640.0);
        assert_eq!(left.vertical_bounds(), (12.0, 408.0));
    }

    #[test]
    fn test_new_rejects_oversized_paddle() {
        let settings = Settings {
            paddle_height: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            Paddle::new(&settings, PaddleSide::Left),
            Err(SettingsError::PaddleTooLarge)
        ));
    }

    #[test]
    fn test_manual_movement_is_clamped() {
        let (mut paddle, ball) = setup(PaddleSide::Left);
        let mut rng = FixedRandom(0.0);
        paddle.move_up();
        paddle.update(0.00007, &ball, &mut rng);
        // 198 px/s for 70µs
        assert!(approx(paddle.top(), 209.98614));

        paddle.update(1.0, &ball, &mut rng);
        assert_eq!(paddle.top(), 12.0);

        paddle.stop_moving_up();
        paddle.move_down();
        paddle.update(100.0, &ball, &mut rng);
        assert_eq!(paddle.top(), 408.0);
    }

    #[test]
    fn test_latest_intent_wins() {
        let (mut paddle, ball) = setup(PaddleSide::Left);
        paddle.move_up();
        paddle.move_down();
        assert!(paddle.is_moving_down() && !paddle.is_moving_up());
        paddle.update(0.5, &ball, &mut FixedRandom(0.0));
        assert_eq!(paddle.top(), 309.0);

        paddle.move_up();
        assert!(paddle.is_moving_up() && !paddle.is_moving_down());
        paddle.update(0.5, &ball, &mut FixedRandom(0.0));
        assert_eq!(paddle.top(), 210.0);
    }

    #[test]
    fn test_set_auto_toggles_and_applies_level() {
        let (mut paddle, _) = setup(PaddleSide::Right);
        assert!(!paddle.is_auto());

        // No level, no autoplay
        paddle.set_auto(true, None);
        assert!(!paddle.is_auto());

        paddle.set_auto(true, Some(3));
        assert!(paddle.is_auto());
        assert_eq!(paddle.level(), LEVELS[3]);

        paddle.move_up();
        paddle.set_auto(false, None);
        assert!(!paddle.is_auto());
        assert!(!paddle.is_moving_up());
        assert!(!paddle.is_moving_down());
    }

    #[test]
    fn test_set_level_only_while_auto() {
        let (mut paddle, _) = setup(PaddleSide::Right);
        paddle.set_level(0);
        assert_eq!(paddle.level(), LEVELS[8]);
        paddle.set_auto(true, Some(8));
        paddle.set_level(12);
        assert_eq!(paddle.level(), LEVELS[12]);
        paddle.set_level(40);
        assert_eq!(paddle.level(), LEVELS[16]);
    }

    #[test]
    fn test_ai_idles_when_ball_leaves() {
        let (mut paddle, mut ball) = setup(PaddleSide::Left);
        let mut rng = FixedRandom(0.0);
        paddle.move_up();
        paddle.move_down();

        ball.set_position(-1.0, 240.0);
        ball.set_velocity(-1.0, 1.0);
        paddle.ai(0.0, &ball, &mut rng);
        assert!(!paddle.is_moving_up() && !paddle.is_moving_down());
        assert!(paddle.prediction().is_none());

        paddle.move_up();
        ball.set_position(13.0, 240.0);
        ball.set_velocity(1.0, 1.0);
        paddle.ai(0.0, &ball, &mut rng);
        assert!(!paddle.is_moving_up() && !paddle.is_moving_down());
    }

    #[test]
    fn test_ai_steers_toward_prediction_with_dead_zone() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);
        let mut rng = FixedRandom(0.0);

        // Fresh prediction with the ball's heading is kept for the delay
        let fixed = |y: f64| Prediction {
            velocity: DVec2::new(1.0, 1.0),
            point: DVec2::new(623.0, y),
            exact: DVec2::new(623.0, y),
            since: 0.0,
            side: Side::Left,
            radius: 5.0,
        };

        // Centre is 240
        paddle.prediction = Some(fixed(230.0));
        paddle.ai(0.0, &ball, &mut rng);
        assert!(paddle.is_moving_up() && !paddle.is_moving_down());

        paddle.prediction = Some(fixed(250.0));
        paddle.ai(0.0, &ball, &mut rng);
        assert!(paddle.is_moving_down() && !paddle.is_moving_up());

        paddle.prediction = Some(fixed(240.0));
        paddle.ai(0.0, &ball, &mut rng);
        assert!(!paddle.is_moving_up() && !paddle.is_moving_down());
    }

    #[test]
    fn test_predict_folds_off_bottom_wall() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);

        paddle.predict(0.016, &ball, &mut FixedRandom(0.0));
        let p = paddle.prediction().expect("ball is heading our way");
        assert_eq!(p.side, Side::Left);
        assert!(approx(p.exact.x, 623.0));
        // Would cross at 543, 80 past the band bottom of 463
        assert!(approx(p.exact.y, 383.0));
        assert!(approx(p.point.y, p.exact.y));
        assert_eq!(p.since, 0.0);
    }

    #[test]
    fn test_predict_folds_off_top_wall() {
        let (mut paddle, mut ball) = setup(PaddleSide::Left);
        paddle.set_auto(true, Some(8));
        ball.set_position(320.0, 240.0);
        ball.set_velocity(-157.5, -157.5);

        paddle.predict(0.016, &ball, &mut FixedRandom(0.0));
        let p = paddle.prediction().expect("ball is heading our way");
        assert_eq!(p.side, Side::Right);
        assert!(approx(p.exact.x, 17.0));
        assert!(approx(p.exact.y, 97.0));
    }

    #[test]
    fn test_predict_skips_within_reaction_delay() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        let mut rng = FixedRandom(0.0);
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);
        paddle.predict(0.1, &ball, &mut rng);
        let first = *paddle.prediction().unwrap();

        // Ball moved on but kept its heading: keep the stale guess
        ball.set_position(400.0, 320.0);
        paddle.predict(0.1, &ball, &mut rng);
        let p = paddle.prediction().unwrap();
        assert!(approx(p.since, 0.1));
        assert_eq!(p.exact, first.exact);
    }

    #[test]
    fn test_predict_recomputes_after_bounce() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        let mut rng = FixedRandom(0.0);
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);
        paddle.predict(0.1, &ball, &mut rng);

        ball.set_velocity(157.5, -157.5);
        paddle.predict(0.1, &ball, &mut rng);
        let p = paddle.prediction().unwrap();
        assert_eq!(p.since, 0.0);
        assert_eq!(p.velocity, DVec2::new(157.5, -157.5));
    }

    #[test]
    fn test_predict_recomputes_after_reaction_delay() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(0)); // 0.2 s
        let mut rng = FixedRandom(0.0);
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);
        paddle.predict(0.0, &ball, &mut rng);
        paddle.predict(0.25, &ball, &mut rng);
        assert!(approx(paddle.prediction().unwrap().since, 0.25));

        // since (0.25) is no longer below the delay
        ball.set_position(350.0, 200.0);
        paddle.predict(0.01, &ball, &mut rng);
        let p = paddle.prediction().unwrap();
        assert_eq!(p.since, 0.0);
        // Crosses at 473, folded 10 back inside the band
        assert!(approx(p.exact.y, 453.0));
    }

    #[test]
    fn test_predict_clears_without_horizontal_travel() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        ball.set_position(320.0, 240.0);
        ball.set_velocity(157.5, 157.5);
        paddle.predict(0.0, &ball, &mut FixedRandom(0.0));
        assert!(paddle.prediction().is_some());

        ball.set_velocity(0.0, 157.5);
        paddle.predict(0.0, &ball, &mut FixedRandom(0.0));
        assert!(paddle.prediction().is_none());
    }

    #[test]
    fn test_prediction_error_scales_with_distance() {
        let (mut paddle, mut ball) = setup(PaddleSide::Right);
        paddle.set_auto(true, Some(8));
        ball.set_velocity(157.5, 157.5);
        let mut rng = GameRng::new(2024);

        for x in [20.0, 320.0, 600.0] {
            ball.set_position(x, 240.0);
            // 120 px of error across the whole court
            let bound = 120.0 * (628.0 - x) / 640.0;
            for _ in 0..50 {
                ball.set_velocity(157.5, -157.5);
                paddle.predict(0.0, &ball, &mut rng);
                ball.set_velocity(157.5, 157.5);
                paddle.predict(0.0, &ball, &mut rng);
                let p = paddle.prediction().unwrap();
                assert!((p.point.y - p.exact.y).abs() <= bound + 1e-9);
            }
        }
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold(100.0, 17.0, 463.0), 100.0);
        assert!(approx(fold(543.0, 17.0, 463.0), 383.0));
        assert!(approx(fold(-63.0, 17.0, 463.0), 97.0));
        // Two bounces: down past the bottom, then back past the top
        assert!(approx(fold(463.0 + 446.0 + 10.0, 17.0, 463.0), 27.0));
        assert_eq!(fold(5.0, 10.0, 10.0), 10.0);
    }
}
