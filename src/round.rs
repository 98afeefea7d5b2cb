//! One round of play: the grid, the token, and the rules that move it.
//!
//! A [`Round`] is created either from a freshly generated level
//! ([`Round::start`]) or from an explicit layout ([`Round::with_grid`]). Every
//! accepted move is applied in full before [`Round::request_move`] returns;
//! any on-screen animation is a presentation concern layered on top.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::error::GameError;
use crate::grid::{self, Grid, Pos, Tile};
use crate::moves::{self, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillStats {
    pub filled: usize,
    pub interior: usize,
    pub percentage: f64,
}

impl FillStats {
    pub fn new(filled: usize, interior: usize) -> Self {
        let percentage = if interior == 0 {
            0.0
        } else {
            filled as f64 * 100.0 / interior as f64
        };
        Self {
            filled,
            interior,
            percentage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub stats: FillStats,
}

/// Won at or above `threshold` percent, lost below it.
pub fn score(stats: FillStats, threshold: f64) -> RoundResult {
    let outcome = if stats.percentage >= threshold {
        Outcome::Won
    } else {
        Outcome::Lost
    };
    RoundResult { outcome, stats }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundState {
    Active,
    Over(RoundResult),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing to slide into that way, but another direction is open.
    Blocked,
    /// The round has already ended.
    RoundOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Accepted {
        from: Pos,
        path: Vec<Pos>,
        /// Set when the landing cell leaves the token trapped.
        result: Option<RoundResult>,
    },
    /// The pressed direction was blocked and so was every other one.
    Ended(RoundResult),
    Rejected(Rejection),
}

#[derive(Clone, Debug)]
pub struct Round {
    grid: Grid,
    token: Pos,
    filled: usize,
    threshold: f64,
    state: RoundState,
}

impl Round {
    /// Generates a level and drops the token on a random empty interior cell.
    pub fn start(
        rows: usize,
        cols: usize,
        density: f64,
        threshold: f64,
        rng: &mut impl Rng,
    ) -> Result<Round, GameError> {
        if rows < grid::MIN_SIDE || cols < grid::MIN_SIDE {
            return Err(GameError::GridTooSmall { rows, cols });
        }
        let grid = grid::generate(rows, cols, density, rng);
        let Some(token) = grid::choose_start(&grid, rng) else {
            warn!(rows, cols, density, "generated level has no empty interior cell");
            return Err(GameError::NoStartCell { density });
        };
        info!(rows, cols, density, start = %token, "round started");
        Round::with_grid(grid, token, threshold)
    }

    /// Starts from a fixed layout. Tiles already filled in `grid` count toward
    /// the score; the token itself must sit on an empty cell.
    pub fn with_grid(grid: Grid, token: Pos, threshold: f64) -> Result<Round, GameError> {
        match grid.get(token) {
            None => return Err(GameError::TokenOutOfBounds(token)),
            Some(Tile::Wall) => return Err(GameError::TokenOnWall(token)),
            Some(tile) if tile.is_filled() => return Err(GameError::TokenOnFilled(token)),
            Some(_) => {}
        }
        let filled = grid.count_filled();
        Ok(Round {
            grid,
            token,
            filled,
            threshold,
            state: RoundState::Active,
        })
    }

    #[instrument(level = "debug", skip(self), fields(token = %self.token))]
    pub fn request_move(&mut self, dir: Direction) -> MoveOutcome {
        if !self.is_active() {
            debug!("move requested after round end");
            return MoveOutcome::Rejected(Rejection::RoundOver);
        }

        let path = moves::resolve_path(&self.grid, self.token, dir);
        let Some(&landing) = path.last() else {
            if moves::is_trapped(&self.grid, self.token) {
                return MoveOutcome::Ended(self.finish());
            }
            debug!("blocked");
            return MoveOutcome::Rejected(Rejection::Blocked);
        };

        let from = self.token;
        let fill = Tile::filled(dir.axis());
        self.grid.set(from, fill);
        for cell in &path[..path.len() - 1] {
            self.grid.set(*cell, fill);
        }
        self.filled += path.len();
        self.token = landing;
        debug!(to = %landing, cells = path.len(), "slid");

        let result = if moves::is_trapped(&self.grid, landing) {
            Some(self.finish())
        } else {
            None
        };
        MoveOutcome::Accepted { from, path, result }
    }

    fn finish(&mut self) -> RoundResult {
        let result = score(self.compute_fill_stats(), self.threshold);
        info!(
            outcome = ?result.outcome,
            filled = result.stats.filled,
            percentage = result.stats.percentage,
            "round over"
        );
        self.state = RoundState::Over(result);
        result
    }

    pub fn current_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_position(&self) -> Pos {
        self.token
    }

    pub fn compute_fill_stats(&self) -> FillStats {
        FillStats::new(self.filled, self.grid.interior_count())
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }

    pub fn result(&self) -> Option<RoundResult> {
        match self.state {
            RoundState::Active => None,
            RoundState::Over(result) => Some(result),
        }
    }
}
