use crate::grid::{Axis, Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(drow, dcol)` unit step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }
}

fn step(grid: &Grid, pos: Pos, dir: Direction) -> Option<Pos> {
    let (drow, dcol) = dir.delta();
    pos.offset(drow, dcol).filter(|next| grid.contains(*next))
}

/// Cells the token slides through from `from` (exclusive) until the next cell
/// is off-grid or not empty. The last entry is where it comes to rest.
///
/// An empty result means the direction is blocked right away.
pub fn resolve_path(grid: &Grid, from: Pos, dir: Direction) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut pos = from;
    while let Some(next) = step(grid, pos, dir) {
        if !grid.is_empty_at(next) {
            break;
        }
        path.push(next);
        pos = next;
    }
    path
}

/// True when no orthogonal neighbour of `pos` is an empty cell.
pub fn is_trapped(grid: &Grid, pos: Pos) -> bool {
    Direction::ALL
        .iter()
        .filter_map(|dir| step(grid, pos, *dir))
        .all(|next| !grid.is_empty_at(next))
}

/// Directions with a non-empty path from `pos`.
pub fn legal_moves(grid: &Grid, pos: Pos) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| step(grid, pos, *dir).is_some_and(|next| grid.is_empty_at(next)))
        .collect()
}
