//! AI difficulty levels
//!
//! The table is indexed by `8 + (ai score - opponent score)`: an AI that is
//! losing reacts faster and guesses better, one that is winning gets lazier.

use serde::{Deserialize, Serialize};

/// Reaction latency and aiming error for an autoplaying paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Seconds before the AI re-predicts while the ball keeps its heading
    pub reaction_delay: f64,
    /// Maximum random offset (pixels) added to a full-court prediction
    pub error_magnitude: f64,
}

impl Level {
    const fn new(reaction_delay: f64, error_magnitude: f64) -> Self {
        Self {
            reaction_delay,
            error_magnitude,
        }
    }

    /// Look up a difficulty index, clamping out-of-range values to the
    /// nearest end of the table.
    pub fn from_index(index: i32) -> Level {
        let clamped = index.clamp(0, MAX_LEVEL_INDEX);
        if clamped != index {
            log::debug!("Difficulty index {index} out of range, using {clamped}");
        }
        LEVELS[clamped as usize]
    }
}

impl Default for Level {
    fn default() -> Self {
        LEVELS[EVEN_LEVEL_INDEX as usize]
    }
}

/// Index of an even match
pub const EVEN_LEVEL_INDEX: i32 = 8;

/// Highest valid index
pub const MAX_LEVEL_INDEX: i32 = 16;

pub const LEVELS: [Level; 17] = [
    Level::new(0.2, 40.0),  // 0:  ai is losing by 8
    Level::new(0.3, 50.0),  // 1:  ai is losing by 7
    Level::new(0.4, 60.0),  // 2:  ai is losing by 6
    Level::new(0.5, 70.0),  // 3:  ai is losing by 5
    Level::new(0.6, 80.0),  // 4:  ai is losing by 4
    Level::new(0.7, 90.0),  // 5:  ai is losing by 3
    Level::new(0.8, 100.0), // 6:  ai is losing by 2
    Level::new(0.9, 110.0), // 7:  ai is losing by 1
    Level::new(1.0, 120.0), // 8:  tie
    Level::new(1.1, 130.0), // 9:  ai is winning by 1
    Level::new(1.2, 140.0), // 10: ai is winning by 2
    Level::new(1.3, 150.0), // 11: ai is winning by 3
    Level::new(1.4, 160.0), // 12: ai is winning by 4
    Level::new(1.5, 170.0), // 13: ai is winning by 5
    Level::new(1.6, 180.0), // 14: ai is winning by 6
    Level::new(1.7, 190.0), // 15: ai is winning by 7
    Level::new(1.8, 200.0), // 16: ai is winning by 8
];
