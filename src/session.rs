use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::round::{Outcome, Round, RoundResult};

/// A finished round as remembered by the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSummary {
    pub number: u32,
    pub density: f64,
    pub result: RoundResult,
}

/// Carries state between rounds: the obstacle density, the random source and
/// an in-memory record of finished rounds.
pub struct Session<R> {
    config: GameConfig,
    rng: R,
    density: f64,
    round_number: u32,
    history: Vec<RoundSummary>,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            density: config.density,
            config,
            rng,
            round_number: 1,
            history: Vec::new(),
        })
    }

    /// Generates the next level at the current density.
    pub fn start_round(&mut self) -> Result<Round, GameError> {
        Round::start(
            self.config.rows,
            self.config.cols,
            self.density,
            self.config.win_threshold,
            &mut self.rng,
        )
    }

    /// Records a finished round and raises the density for the next one.
    pub fn finish_round(&mut self, result: RoundResult) {
        self.history.push(RoundSummary {
            number: self.round_number,
            density: self.density,
            result,
        });
        self.density += self.config.density_increment;
        self.round_number += 1;
        info!(
            round = self.round_number,
            density = self.density,
            "density raised for next round"
        );
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn wins(&self) -> usize {
        self.history
            .iter()
            .filter(|s| s.result.outcome == Outcome::Won)
            .count()
    }

    /// Highest fill percentage reached so far.
    pub fn best(&self) -> Option<f64> {
        self.history
            .iter()
            .map(|s| s.result.stats.percentage)
            .reduce(f64::max)
    }
}
