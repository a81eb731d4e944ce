//! Match state: scores, the Idle/Playing machine and adaptive difficulty
//!
//! A [`Match`] owns both paddles and the ball. Each update moves the
//! paddles, then (while playing) the ball, and finally checks whether the
//! ball has left the court. Difficulty follows the score: a player who is
//! ahead faces a sharper opponent.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::level::EVEN_LEVEL_INDEX;
use super::paddle::{Paddle, PaddleSide, Prediction};
use super::rng::RandomSource;
use crate::engine::{Game, Request};
use crate::input::Command;
use crate::render::{Court, Menu, MenuImages, Surface};
use crate::settings::{Settings, SettingsError};

/// One of the two sides of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Left,
    Right,
}

impl Player {
    /// Index into score arrays
    pub fn index(self) -> usize {
        match self {
            Player::Left => 0,
            Player::Right => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Left => Player::Right,
            Player::Right => Player::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Playing,
}

/// Sound cues; playback belongs to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Ball turned toward the left player
    Ping,
    /// Ball turned toward the right player
    Pong,
    Wall,
    Goal,
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(Sound),
    Winner(Player),
}

/// Serializable view of a paddle
#[derive(Debug, Clone, Serialize)]
pub struct PaddleSnapshot {
    pub position: DVec2,
    pub auto: bool,
    pub prediction: Option<Prediction>,
}

/// Serializable view of the whole match
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub scores: [u32; 2],
    pub levels: [i32; 2],
    pub winner: Option<Player>,
    pub ball_position: DVec2,
    pub ball_velocity: DVec2,
    pub paddles: [PaddleSnapshot; 2],
}

pub struct Match {
    settings: Settings,
    phase: Phase,
    scores: [u32; 2],
    winner: Option<Player>,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    court: Court,
    /// Built once images are loaded
    menu: Option<Menu>,
    rng: Box<dyn RandomSource>,
    events: Vec<GameEvent>,
}

impl Match {
    pub fn new(settings: Settings, mut rng: Box<dyn RandomSource>) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut ball = Ball::new(&settings)?;
        let left = Paddle::new(&settings, PaddleSide::Left)?;
        let right = Paddle::new(&settings, PaddleSide::Right)?;
        let court = Court::new(settings.width, settings.height, settings.wall_width);
        ball.reset(None, rng.as_mut());
        Ok(Self {
            settings,
            phase: Phase::Idle,
            scores: [0, 0],
            winner: None,
            left,
            right,
            ball,
            court,
            menu: None,
            rng,
            events: Vec::new(),
        })
    }

    /// Finish construction once the menu images are available
    pub fn resources_ready(&mut self, images: MenuImages) {
        let mut menu = Menu::new(images, self.settings.width, self.settings.wall_width);
        if let Some(winner) = self.winner {
            menu.declare_winner(winner);
        }
        self.menu = Some(menu);
        log::debug!("Menu ready");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::Left => &self.left,
            Player::Right => &self.right,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Begin a match with `players` humans (0 = demo, 1 = left human,
    /// 2 = both human). Ignored while a match is running.
    pub fn start(&mut self, players: u8) {
        if self.is_playing() {
            return;
        }
        log::info!("Starting match with {players} player(s)");
        self.scores = [0, 0];
        self.winner = None;
        self.phase = Phase::Playing;
        let left_level = self.level(Player::Left);
        let right_level = self.level(Player::Right);
        self.left.set_auto(players < 1, Some(left_level));
        self.right.set_auto(players < 2, Some(right_level));
        self.ball.reset(None, self.rng.as_mut());
        if let Some(menu) = self.menu.as_mut() {
            menu.clear_winner();
        }
    }

    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        log::info!("Match stopped at {}-{}", self.scores[0], self.scores[1]);
        self.phase = Phase::Idle;
        self.left.set_auto(false, None);
        self.right.set_auto(false, None);
    }

    /// Difficulty index for `player`'s paddle: 8 when the scores are even,
    /// one step per point of lead. Not clamped here.
    pub fn level(&self, player: Player) -> i32 {
        let own = self.scores[player.index()] as i32;
        let other = self.scores[player.opponent().index()] as i32;
        EVEN_LEVEL_INDEX + (own - other)
    }

    pub fn goal(&mut self, player: Player) {
        self.sound(Sound::Goal);
        self.scores[player.index()] += 1;
        log::debug!(
            "{player:?} scores: {}-{}",
            self.scores[0],
            self.scores[1]
        );

        if self.scores[player.index()] == self.settings.win_score {
            log::info!("{player:?} wins");
            self.winner = Some(player);
            if let Some(menu) = self.menu.as_mut() {
                menu.declare_winner(player);
            }
            self.events.push(GameEvent::Winner(player));
            self.stop();
        } else {
            self.ball.reset(Some(player), self.rng.as_mut());
            let left_level = self.level(Player::Left);
            let right_level = self.level(Player::Right);
            self.left.set_level(left_level);
            self.right.set_level(right_level);
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.left.update(dt, &self.ball, self.rng.as_mut());
        self.right.update(dt, &self.ball, self.rng.as_mut());
        if !self.is_playing() {
            return;
        }

        let before = self.ball.velocity();
        self.ball.update(dt, &self.left, &self.right);
        let after = self.ball.velocity();
        // One cue per tick; a paddle return outranks a wall bounce
        if (before.x < 0.0) != (after.x < 0.0) {
            self.sound(if after.x < 0.0 { Sound::Ping } else { Sound::Pong });
        } else if (before.y < 0.0) != (after.y < 0.0) {
            self.sound(Sound::Wall);
        }

        if self.ball.right() < 0.0 {
            self.goal(Player::Right);
        } else if self.ball.left() > self.settings.width {
            self.goal(Player::Left);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.court.draw(surface, self.scores);
        self.left.draw(surface);
        self.right.draw(surface);
        if self.is_playing() {
            self.ball.draw(surface);
        } else if let Some(menu) = &self.menu {
            menu.draw(surface);
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let paddle = |p: &Paddle| PaddleSnapshot {
            position: p.position(),
            auto: p.is_auto(),
            prediction: p.prediction().copied(),
        };
        Snapshot {
            phase: self.phase,
            scores: self.scores,
            levels: [self.level(Player::Left), self.level(Player::Right)],
            winner: self.winner,
            ball_position: self.ball.position(),
            ball_velocity: self.ball.velocity(),
            paddles: [paddle(&self.left), paddle(&self.right)],
        }
    }

    pub fn show_footprints(&mut self, on: bool) {
        self.settings.show_footprints = on;
        self.ball.set_show_footprints(on);
    }

    pub fn show_predictions(&mut self, on: bool) {
        self.settings.show_predictions = on;
        self.left.set_show_predictions(on);
        self.right.set_show_predictions(on);
    }

    pub fn play_sounds(&mut self, on: bool) {
        self.settings.play_sounds = on;
    }

    fn sound(&mut self, sound: Sound) {
        if self.settings.play_sounds {
            self.events.push(GameEvent::Sound(sound));
        }
    }

    /// Manual paddle for a command, unless that paddle is autoplaying
    fn manual_paddle(&mut self, command: Command) -> Option<&mut Paddle> {
        let paddle = match command {
            Command::LeftUp | Command::LeftDown => &mut self.left,
            Command::RightUp | Command::RightDown => &mut self.right,
            _ => return None,
        };
        (!paddle.is_auto()).then_some(paddle)
    }
}

impl Game for Match {
    fn init(&mut self) {
        log::info!(
            "Court {}x{}, first to {}",
            self.settings.width,
            self.settings.height,
            self.settings.win_score
        );
    }

    fn width(&self) -> f64 {
        self.settings.width
    }

    fn height(&self) -> f64 {
        self.settings.height
    }

    fn start(&mut self, players: u8) {
        Match::start(self, players);
    }

    fn stop(&mut self) {
        Match::stop(self);
    }

    fn update(&mut self, dt: f64) {
        Match::update(self, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        Match::draw(self, surface);
    }

    fn on_key_down(&mut self, code: &str) -> Option<Request> {
        let command = Command::from_code(code)?;
        match command {
            Command::Start(players) => {
                Match::start(self, players);
                None
            }
            Command::Quit => self.is_playing().then_some(Request::ConfirmStop),
            Command::LeftUp | Command::RightUp => {
                if let Some(paddle) = self.manual_paddle(command) {
                    paddle.move_up();
                }
                None
            }
            Command::LeftDown | Command::RightDown => {
                if let Some(paddle) = self.manual_paddle(command) {
                    paddle.move_down();
                }
                None
            }
        }
    }

    fn on_key_up(&mut self, code: &str) {
        let Some(command) = Command::from_code(code) else {
            return;
        };
        let up = matches!(command, Command::LeftUp | Command::RightUp);
        if let Some(paddle) = self.manual_paddle(command) {
            if up {
                paddle.stop_moving_up();
            } else {
                paddle.stop_moving_down();
            }
        }
    }
}
