/// Simulation settings and the fixed gameplay constants.
use crate::error::{ConfigError, Result};

// ── Gameplay constants ───────────────────────────────────────────────────────

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 64;

/// Scales enemy fire: one shot is attempted with probability `COMPLEXITY / 100`.
pub const COMPLEXITY: u32 = 5;

/// Only one player bullet may be in flight.
pub const PLAYER_BULLETS_MAX: usize = 1;

/// Ticks an outcome animation plays before the engine stops.
pub const TERMINAL_DELAY: u32 = 10;

const MIN_WIDTH: u32 = 40;
const MIN_HEIGHT: u32 = 30;

/// Field dimensions and difficulty for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub complexity: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            complexity: COMPLEXITY,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.complexity) {
            return Err(ConfigError::InvalidComplexity(self.complexity));
        }
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(())
    }

    /// Upper bound (exclusive) of the per-tick enemy fire draw.
    pub fn fire_bound(&self) -> u32 {
        100 / self.complexity
    }
}
