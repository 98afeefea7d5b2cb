use crate::error::GameError;
use crate::grid::MIN_SIDE;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_DENSITY: f64 = 0.02;
pub const DEFAULT_DENSITY_INCREMENT: f64 = 0.01;
pub const DEFAULT_WIN_THRESHOLD: f64 = 80.0;

/// Tunables consumed by the core.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Obstacle density of the first round.
    pub density: f64,
    /// Added to the density after every finished round. Growth is not capped.
    pub density_increment: f64,
    /// Fill percentage needed to win.
    pub win_threshold: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            density: DEFAULT_DENSITY,
            density_increment: DEFAULT_DENSITY_INCREMENT,
            win_threshold: DEFAULT_WIN_THRESHOLD,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows < MIN_SIDE || self.cols < MIN_SIDE {
            return Err(GameError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..1.0).contains(&self.density) {
            return Err(GameError::DensityOutOfRange(self.density));
        }
        if !self.density_increment.is_finite() || self.density_increment < 0.0 {
            return Err(GameError::IncrementOutOfRange(self.density_increment));
        }
        if !(0.0..=100.0).contains(&self.win_threshold) {
            return Err(GameError::ThresholdOutOfRange(self.win_threshold));
        }
        Ok(())
    }
}
