//! Round-level behaviour driven through the public API.

use longcat::{
    is_trapped, Direction, GameConfig, Grid, MoveOutcome, Outcome, Pos, Rejection, Round, Session,
    Tile,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn interior_walls(grid: &Grid) -> usize {
    grid.interior()
        .filter(|p| grid.get(*p) == Some(Tile::Wall))
        .count()
}

mod scenario {
    use super::*;

    #[test]
    fn four_by_four_trace() {
        let mut round = Round::with_grid(Grid::bordered(4, 4), Pos::new(1, 1), 80.0).unwrap();

        let outcome = round.request_move(Direction::Right);
        assert_eq!(
            outcome,
            MoveOutcome::Accepted {
                from: Pos::new(1, 1),
                path: vec![Pos::new(1, 2)],
                result: None,
            }
        );
        assert_eq!(round.current_grid().get(Pos::new(1, 1)), Some(Tile::FilledHorizontal));
        assert_eq!(round.current_position(), Pos::new(1, 2));

        // Already against the right wall.
        assert_eq!(
            round.request_move(Direction::Right),
            MoveOutcome::Rejected(Rejection::Blocked)
        );

        let outcome = round.request_move(Direction::Down);
        assert_eq!(
            outcome,
            MoveOutcome::Accepted {
                from: Pos::new(1, 2),
                path: vec![Pos::new(2, 2)],
                result: None,
            }
        );
        assert_eq!(round.current_grid().get(Pos::new(1, 2)), Some(Tile::FilledVertical));
        assert!(!is_trapped(round.current_grid(), Pos::new(2, 2)));

        // Sliding left lands on the last open cell with nowhere to go.
        let MoveOutcome::Accepted { path, result: Some(result), .. } =
            round.request_move(Direction::Left)
        else {
            panic!("last slide should end the round");
        };
        assert_eq!(path, vec![Pos::new(2, 1)]);
        assert_eq!(round.current_grid().get(Pos::new(2, 2)), Some(Tile::FilledHorizontal));
        assert_eq!(result.stats.filled, 3);
        assert_eq!(result.stats.percentage, 75.0);
        assert_eq!(result.outcome, Outcome::Lost);
        assert_eq!(round.result(), Some(result));
    }

    #[test]
    fn exactly_eighty_percent_wins() {
        // 2x5 interior. The lower row starts with four filled cells and a
        // wall, so sliding along the top row ends at 8 of 10.
        let mut grid = Grid::bordered(4, 7);
        for col in 1..=4 {
            grid.set(Pos::new(2, col), Tile::FilledVertical);
        }
        grid.set(Pos::new(2, 5), Tile::Wall);
        let mut round = Round::with_grid(grid, Pos::new(1, 1), 80.0).unwrap();
        let MoveOutcome::Accepted { result: Some(result), .. } =
            round.request_move(Direction::Right)
        else {
            panic!("slide should end the round");
        };
        assert_eq!(result.stats.filled, 8);
        assert_eq!(result.stats.interior, 10);
        assert_eq!(result.stats.percentage, 80.0);
        assert_eq!(result.outcome, Outcome::Won);
    }

    #[test]
    fn just_under_threshold_loses() {
        let mut grid = Grid::bordered(4, 7);
        for col in 1..=3 {
            grid.set(Pos::new(2, col), Tile::FilledVertical);
        }
        grid.set(Pos::new(2, 4), Tile::Wall);
        grid.set(Pos::new(2, 5), Tile::Wall);
        let mut round = Round::with_grid(grid, Pos::new(1, 1), 70.1).unwrap();
        let MoveOutcome::Accepted { result: Some(result), .. } =
            round.request_move(Direction::Right)
        else {
            panic!("slide should end the round");
        };
        assert_eq!(result.stats.percentage, 70.0);
        assert_eq!(result.outcome, Outcome::Lost);
    }
}

mod properties {
    use super::*;

    #[test]
    fn reads_do_not_change_state() {
        let mut rng = StdRng::seed_from_u64(21);
        let round = Round::start(12, 12, 0.1, 80.0, &mut rng).unwrap();
        let grid = round.current_grid().clone();
        let pos = round.current_position();
        let stats = round.compute_fill_stats();
        for _ in 0..10 {
            assert_eq!(round.current_grid(), &grid);
            assert_eq!(round.current_position(), pos);
            assert_eq!(round.compute_fill_stats(), stats);
        }
    }

    #[test]
    fn fill_grows_by_path_length_on_every_accepted_move() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..30 {
            let mut round = Round::start(10, 14, 0.08, 80.0, &mut rng).unwrap();
            let mut guard = 0;
            while round.is_active() && guard < 5_000 {
                guard += 1;
                let dir = *Direction::ALL.choose(&mut rng).unwrap();
                let before = round.compute_fill_stats().filled;
                let from = round.current_position();
                match round.request_move(dir) {
                    MoveOutcome::Accepted { path, .. } => {
                        assert!(!path.is_empty());
                        assert_eq!(round.compute_fill_stats().filled, before + path.len());
                        assert_eq!(Some(&round.current_position()), path.last());
                        assert!(round.current_grid().get(from).is_some_and(Tile::is_filled));
                    }
                    MoveOutcome::Rejected(_) | MoveOutcome::Ended(_) => {
                        assert_eq!(round.compute_fill_stats().filled, before);
                        assert_eq!(round.current_position(), from);
                    }
                }
                assert_eq!(
                    round.compute_fill_stats().filled,
                    round.current_grid().count_filled()
                );
                assert!(round.current_grid().is_empty_at(round.current_position()));
            }
            assert!(!round.is_active(), "round never ended");
        }
    }
}

mod density {
    use super::*;

    fn mean_wall_fraction(session: &mut Session<StdRng>, trials: usize) -> f64 {
        let mut walls = 0;
        let mut cells = 0;
        for _ in 0..trials {
            let round = session.start_round().unwrap();
            walls += interior_walls(round.current_grid());
            cells += round.current_grid().interior_count();
        }
        walls as f64 / cells as f64
    }

    #[test]
    fn next_round_generates_at_raised_density() {
        let config = GameConfig {
            rows: 52,
            cols: 52,
            density: 0.10,
            density_increment: 0.01,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, StdRng::seed_from_u64(2024)).unwrap();

        let first = mean_wall_fraction(&mut session, 100);
        let round = session.start_round().unwrap();
        let result = longcat::round::score(round.compute_fill_stats(), 80.0);
        session.finish_round(result);
        assert!((session.density() - 0.11).abs() < 1e-12);
        let second = mean_wall_fraction(&mut session, 100);

        assert!((first - 0.10).abs() < 0.003, "first density sampled at {first}");
        assert!((second - 0.11).abs() < 0.003, "second density sampled at {second}");
        assert!(second > first);
    }
}
