use crate::grid::Pos;

/// Failures raised while configuring or setting up a round.
///
/// Commands issued during play never fail: a blocked or late move comes back
/// as [`crate::round::MoveOutcome::Rejected`] instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("grid must be at least 3x3 to have an interior, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("obstacle density must be in [0, 1), got {0}")]
    DensityOutOfRange(f64),

    #[error("density increment must be finite and non-negative, got {0}")]
    IncrementOutOfRange(f64),

    #[error("win threshold must be a percentage in [0, 100], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("no empty interior cell to start on (obstacle density {density:.2})")]
    NoStartCell { density: f64 },

    #[error("token cannot start on a wall at {0}")]
    TokenOnWall(Pos),

    #[error("token cannot start on an already filled cell at {0}")]
    TokenOnFilled(Pos),

    #[error("token position {0} is outside the grid")]
    TokenOutOfBounds(Pos),
}
