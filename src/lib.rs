//! Longcat: slide a token across a walled grid, filling every cell it leaves
//! behind, and try to cover at least 80% of the interior before it boxes
//! itself in.

pub mod config;
pub mod error;
pub mod grid;
pub mod motion;
pub mod moves;
pub mod round;
pub mod session;

pub use config::GameConfig;
pub use error::GameError;
pub use grid::{Axis, Grid, Pos, Tile};
pub use motion::Motion;
pub use moves::{is_trapped, legal_moves, resolve_path, Direction};
pub use round::{FillStats, MoveOutcome, Outcome, Rejection, Round, RoundResult, RoundState};
pub use session::{RoundSummary, Session};
