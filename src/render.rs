//! Drawing contract and court layout
//!
//! The game only ever describes rectangles, text and named images; whatever
//! sits behind [`Surface`] (a canvas, a GPU pipeline, a test recorder) turns
//! them into pixels.

use serde::{Deserialize, Serialize};

use crate::sim::Player;

/// Colour roles; the surface picks the actual colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Walls,
    Ball,
    Score,
    Footprint,
    PredictionGuess,
    PredictionExact,
    Stats,
}

/// A loaded image, referenced by name when drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl Image {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);
    fn draw_image(&mut self, image: &Image, x: f64, y: f64);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Color },
    StrokeRect { x: f64, y: f64, width: f64, height: f64, color: Color },
    Text { text: String, x: f64, y: f64, color: Color },
    Image { name: String, x: f64, y: f64 },
}

/// Surface that records every call, for headless runs and tests
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything drawn so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn draw_image(&mut self, image: &Image, x: f64, y: f64) {
        self.commands.push(DrawCommand::Image {
            name: image.name.clone(),
            x,
            y,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Block {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Seven-segment layout per digit:
/// top, top-left, top-right, middle, bottom-left, bottom-right, bottom
const DIGITS: [[bool; 7]; 10] = [
    [true, true, true, false, true, true, true],     // 0
    [false, false, true, false, false, true, false], // 1
    [true, false, true, true, true, false, true],    // 2
    [true, false, true, true, false, true, true],    // 3
    [false, true, true, true, false, true, false],   // 4
    [true, true, false, true, false, true, true],    // 5
    [true, true, false, true, true, true, true],     // 6
    [true, false, true, false, false, true, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, false],    // 9
];

/// Walls, centre net and score digits
#[derive(Debug, Clone)]
pub struct Court {
    wall_width: f64,
    walls: Vec<Block>,
    score_left: Block,
    score_right: Block,
}

impl Court {
    pub fn new(width: f64, height: f64, wall_width: f64) -> Self {
        let mut walls = vec![
            Block {
                x: 0.0,
                y: 0.0,
                width,
                height: wall_width,
            },
            Block {
                x: 0.0,
                y: height - wall_width,
                width,
                height: wall_width,
            },
        ];

        // Dashed net down the middle
        if wall_width > 0.0 {
            let dashes = (height / (wall_width * 2.0)).ceil() as usize;
            for n in 0..dashes {
                walls.push(Block {
                    x: width / 2.0 - wall_width / 2.0,
                    y: wall_width / 2.0 + wall_width * 2.0 * n as f64,
                    width: wall_width,
                    height: wall_width,
                });
            }
        }

        let score_width = 3.0 * wall_width;
        let score_height = 4.0 * wall_width;
        Self {
            wall_width,
            walls,
            score_left: Block {
                x: 0.5 + width / 2.0 - 1.5 * wall_width - score_width,
                y: 2.0 * wall_width,
                width: score_width,
                height: score_height,
            },
            score_right: Block {
                x: 0.5 + width / 2.0 + 1.5 * wall_width,
                y: 2.0 * wall_width,
                width: score_width,
                height: score_height,
            },
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, scores: [u32; 2]) {
        for w in &self.walls {
            surface.fill_rect(w.x, w.y, w.width, w.height, Color::Walls);
        }
        self.draw_digit(surface, scores[0], self.score_left);
        self.draw_digit(surface, scores[1], self.score_right);
    }

    fn draw_digit(&self, surface: &mut dyn Surface, score: u32, at: Block) {
        let Block { x, y, width, height } = at;
        let dw = self.wall_width * 4.0 / 5.0;
        let dh = dw;
        let segments = DIGITS[(score % 10) as usize];
        let half = height / 2.0;

        let rects = [
            (x, y, width, dw),
            (x, y, dw, half),
            (x + width - dw, y, dw, half),
            (x, y + half - dh / 2.0, width, dh),
            (x, y + half, dw, half),
            (x + width - dw, y + half, dw, half),
            (x, y + height - dh, width, dh),
        ];
        for (on, (rx, ry, rw, rh)) in segments.iter().zip(rects) {
            if *on {
                surface.fill_rect(rx, ry, rw, rh, Color::Score);
            }
        }
    }
}

/// Images the menu needs once loading has finished
#[derive(Debug, Clone)]
pub struct MenuImages {
    pub press1: Image,
    pub press2: Image,
    pub winner: Image,
}

/// Start prompts and the winner banner shown while idle
#[derive(Debug, Clone)]
pub struct Menu {
    images: MenuImages,
    press1_at: (f64, f64),
    press2_at: (f64, f64),
    winner_left_at: (f64, f64),
    winner_right_at: (f64, f64),
    winner: Option<Player>,
}

impl Menu {
    pub fn new(images: MenuImages, width: f64, wall_width: f64) -> Self {
        Self {
            press1_at: (10.0, wall_width),
            press2_at: (width - images.press2.width - 10.0, wall_width),
            winner_left_at: (width / 2.0 - images.winner.width - wall_width, 6.0 * wall_width),
            winner_right_at: (width / 2.0 + wall_width, 6.0 * wall_width),
            images,
            winner: None,
        }
    }

    pub fn declare_winner(&mut self, player: Player) {
        self.winner = Some(player);
    }

    pub fn clear_winner(&mut self) {
        self.winner = None;
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(&self.images.press1, self.press1_at.0, self.press1_at.1);
        surface.draw_image(&self.images.press2, self.press2_at.0, self.press2_at.1);
        let banner = match self.winner {
            Some(Player::Left) => Some(self.winner_left_at),
            Some(Player::Right) => Some(self.winner_right_at),
            None => None,
        };
        if let Some((x, y)) = banner {
            surface.draw_image(&self.images.winner, x, y);
        }
    }
}
