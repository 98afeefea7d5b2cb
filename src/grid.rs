use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

/// Minimum extent of either side; anything smaller has no interior.
pub const MIN_SIDE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall,
    FilledHorizontal,
    FilledVertical,
}

impl Tile {
    pub fn is_filled(self) -> bool {
        matches!(self, Tile::FilledHorizontal | Tile::FilledVertical)
    }

    /// The fill stamped on a cell vacated by a move along `axis`.
    pub fn filled(axis: Axis) -> Tile {
        match axis {
            Axis::Horizontal => Tile::FilledHorizontal,
            Axis::Vertical => Tile::FilledVertical,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbour at `(drow, dcol)`, or `None` when it would go negative.
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Pos> {
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        Some(Pos { row, col })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A bordered rectangle of tiles, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    /// An all-empty interior inside a wall ring.
    pub fn bordered(rows: usize, cols: usize) -> Self {
        let mut tiles = vec![vec![Tile::Empty; cols]; rows];
        if rows == 0 || cols == 0 {
            return Self { rows, cols, tiles };
        }
        for row in 0..rows {
            tiles[row][0] = Tile::Wall;
            tiles[row][cols - 1] = Tile::Wall;
        }
        for col in 0..cols {
            tiles[0][col] = Tile::Wall;
            tiles[rows - 1][col] = Tile::Wall;
        }
        Self { rows, cols, tiles }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.tiles.get(pos.row)?.get(pos.col).copied()
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Tile::Empty)
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row + 1 == self.rows || pos.col + 1 == self.cols
    }

    /// Overwrites an interior tile. The border ring is never touched; returns
    /// whether the write happened.
    pub fn set(&mut self, pos: Pos, tile: Tile) -> bool {
        if !self.contains(pos) || self.is_border(pos) {
            return false;
        }
        self.tiles[pos.row][pos.col] = tile;
        true
    }

    pub fn interior_count(&self) -> usize {
        self.rows.saturating_sub(2) * self.cols.saturating_sub(2)
    }

    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        let rows = 1..self.rows.saturating_sub(1);
        rows.flat_map(move |row| (1..self.cols.saturating_sub(1)).map(move |col| Pos { row, col }))
    }

    pub fn empty_interior(&self) -> Vec<Pos> {
        self.interior().filter(|p| self.is_empty_at(*p)).collect()
    }

    pub fn count_filled(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| t.is_filled())
            .count()
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| **t == tile)
            .count()
    }
}

/// Builds a new level: wall ring, then each interior cell independently
/// becomes a wall with probability `density`.
///
/// No reachability pass is made, so open cells may end up in disconnected
/// pockets. A `density` of 1.0 or more walls off the whole interior.
pub fn generate(rows: usize, cols: usize, density: f64, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::bordered(rows, cols);
    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            if rng.gen::<f64>() < density {
                grid.tiles[row][col] = Tile::Wall;
            }
        }
    }
    grid
}

/// Uniform pick among empty interior cells.
pub fn choose_start(grid: &Grid, rng: &mut impl Rng) -> Option<Pos> {
    grid.empty_interior().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_border_is_wall(grid: &Grid) {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let pos = Pos::new(row, col);
                if grid.is_border(pos) {
                    assert_eq!(grid.get(pos), Some(Tile::Wall), "border cell {pos} is open");
                }
            }
        }
    }

    #[test]
    fn border_ring_is_always_wall() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let rows = 3 + (seed as usize % 9);
            let cols = 3 + (seed as usize * 7 % 11);
            let grid = generate(rows, cols, 0.3, &mut rng);
            assert_eq!(grid.rows(), rows);
            assert_eq!(grid.cols(), cols);
            assert_border_is_wall(&grid);
        }
    }

    #[test]
    fn zero_density_leaves_interior_open() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(10, 10, 0.0, &mut rng);
        assert_eq!(grid.empty_interior().len(), 64);
        assert_eq!(grid.count(Tile::Wall), 36);
    }

    #[test]
    fn saturated_density_walls_off_interior() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(6, 5, 1.0, &mut rng);
        assert!(grid.empty_interior().is_empty());
        assert_eq!(choose_start(&grid, &mut rng), None);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate(12, 9, 0.25, &mut StdRng::seed_from_u64(99));
        let b = generate(12, 9, 0.25, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn set_refuses_border_writes() {
        let mut grid = Grid::bordered(4, 4);
        assert!(!grid.set(Pos::new(0, 1), Tile::Empty));
        assert!(!grid.set(Pos::new(9, 9), Tile::Wall));
        assert!(grid.set(Pos::new(1, 1), Tile::FilledVertical));
        assert_eq!(grid.get(Pos::new(1, 1)), Some(Tile::FilledVertical));
        assert_border_is_wall(&grid);
    }

    #[test]
    fn start_is_an_empty_interior_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let grid = generate(8, 8, 0.4, &mut rng);
            if let Some(start) = choose_start(&grid, &mut rng) {
                assert!(!grid.is_border(start));
                assert!(grid.is_empty_at(start));
            }
        }
    }

    #[test]
    fn interior_iterates_every_inner_cell() {
        let grid = Grid::bordered(4, 5);
        let cells: Vec<Pos> = grid.interior().collect();
        assert_eq!(cells.len(), grid.interior_count());
        assert_eq!(cells.first(), Some(&Pos::new(1, 1)));
        assert_eq!(cells.last(), Some(&Pos::new(2, 3)));
    }
}
