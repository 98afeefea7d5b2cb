//! Cosmetic interpolation of the token between cells.
//!
//! A [`Motion`] is built once from the departure cell and the path an
//! accepted move returned, then stepped once per frame. It keeps its own copy
//! of the path, so it never has to look back at the round while it runs.

use std::collections::VecDeque;

use crate::grid::Pos;

/// Sub-cell units per cell edge.
pub const CELL_UNITS: u32 = 90;
/// Units advanced per frame.
pub const DEFAULT_SPEED: u32 = 7;

#[derive(Clone, Debug)]
pub struct Motion {
    cell: Pos,
    remaining: VecDeque<Pos>,
    /// Distance covered toward `remaining.front()`.
    progress: u32,
    speed: u32,
}

impl Motion {
    pub fn new(from: Pos, path: &[Pos], speed: u32) -> Self {
        Self {
            cell: from,
            remaining: path.iter().copied().collect(),
            progress: 0,
            speed: speed.clamp(1, CELL_UNITS),
        }
    }

    /// Advances one frame. A frame that reaches a cell stops on it, so each
    /// path cell is shown for at least one frame.
    pub fn advance(&mut self) {
        if self.remaining.is_empty() {
            return;
        }
        self.progress += self.speed;
        if self.progress >= CELL_UNITS {
            if let Some(next) = self.remaining.pop_front() {
                self.cell = next;
            }
            self.progress = 0;
        }
    }

    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Cell to draw the token on: the last one it fully reached.
    pub fn cell(&self) -> Pos {
        self.cell
    }

    /// Path cells not reached yet.
    pub fn pending(&self) -> usize {
        self.remaining.len()
    }

    /// Whether `pos` is still ahead of the token on this path.
    pub fn is_ahead(&self, pos: Pos) -> bool {
        self.remaining.contains(&pos)
    }
}
