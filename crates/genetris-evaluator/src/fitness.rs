//! Fitness of a strategy over repeated simulated games.

use genetris_engine::{Driver, Strategy};
use genetris_stats::descriptive;

/// Default number of games per evaluation.
pub const N_SIMULATIONS: usize = 4;
/// Default cap on moves per game.
pub const MAX_SIMULATION_LENGTH: usize = 1000;

/// Runs a strategy through several games and reduces the lines cleared to
/// their median.
///
/// Results are only reproducible when the drivers produced by the factory
/// are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessAggregator {
    pub n_simulations: usize,
    pub max_simulation_length: usize,
}

impl Default for FitnessAggregator {
    fn default() -> Self {
        Self::new(N_SIMULATIONS, MAX_SIMULATION_LENGTH)
    }
}

impl FitnessAggregator {
    #[must_use]
    pub const fn new(n_simulations: usize, max_simulation_length: usize) -> Self {
        Self {
            n_simulations,
            max_simulation_length,
        }
    }

    /// Plays one game until the driver reports game over or the move cap is
    /// reached, and returns the lines cleared.
    pub fn simulate<S, D>(&self, strategy: &S, driver: &mut D) -> usize
    where
        S: Strategy + ?Sized,
        D: Driver,
    {
        for _ in 0..self.max_simulation_length {
            if !driver.play(strategy) {
                break;
            }
        }
        driver.lines_cleared()
    }

    /// Median lines cleared over `n_simulations` games.
    ///
    /// Game `i` is played on the driver returned by `make_driver(i)`. Returns
    /// 0 when `n_simulations` is 0.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate<S, D, F>(&self, strategy: &S, mut make_driver: F) -> f32
    where
        S: Strategy + ?Sized,
        D: Driver,
        F: FnMut(usize) -> D,
    {
        let lines = (0..self.n_simulations).map(|i| {
            let mut driver = make_driver(i);
            self.simulate(strategy, &mut driver) as f32
        });
        descriptive::median(lines).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use genetris_engine::{Action, Field, GameDriver, Piece, PieceSeed, Rotation};

    use super::*;
    use crate::{
        heuristic::{FeatureWeights, HeuristicEvaluator},
        placement_search::PlacementSearch,
    };

    /// Driver that clears a fixed number of lines per move for a fixed
    /// number of moves.
    struct ScriptedDriver {
        moves_left: usize,
        lines_per_move: usize,
        lines: usize,
        plays: usize,
    }

    impl ScriptedDriver {
        fn new(moves: usize, lines_per_move: usize) -> Self {
            Self {
                moves_left: moves,
                lines_per_move,
                lines: 0,
                plays: 0,
            }
        }
    }

    impl Driver for ScriptedDriver {
        fn play<S>(&mut self, _strategy: &S) -> bool
        where
            S: Strategy + ?Sized,
        {
            self.plays += 1;
            if self.moves_left == 0 {
                return false;
            }
            self.moves_left -= 1;
            self.lines += self.lines_per_move;
            true
        }

        fn lines_cleared(&self) -> usize {
            self.lines
        }
    }

    fn idle(_: &Field, _: &Piece, _: Option<&Piece>) -> Option<Action> {
        Some(Action {
            column: 0,
            use_held: false,
            rotation: Rotation::Identity,
        })
    }

    #[test]
    fn test_single_zero_line_game() {
        let aggregator = FitnessAggregator::new(1, MAX_SIMULATION_LENGTH);
        let fitness = aggregator.evaluate(&idle, |_| ScriptedDriver::new(10, 0));
        assert_eq!(fitness, 0.0);
    }

    #[test]
    fn test_no_simulations() {
        let aggregator = FitnessAggregator::new(0, MAX_SIMULATION_LENGTH);
        assert_eq!(aggregator.evaluate(&idle, |_| ScriptedDriver::new(10, 1)), 0.0);
    }

    #[test]
    fn test_move_cap() {
        let aggregator = FitnessAggregator::new(1, 5);
        let mut driver = ScriptedDriver::new(100, 1);
        assert_eq!(aggregator.simulate(&idle, &mut driver), 5);
        assert_eq!(driver.plays, 5);
    }

    #[test]
    fn test_stops_on_game_over() {
        let aggregator = FitnessAggregator::new(1, 100);
        let mut driver = ScriptedDriver::new(3, 2);
        assert_eq!(aggregator.simulate(&idle, &mut driver), 6);
        assert_eq!(driver.plays, 4);
    }

    #[test]
    fn test_median_of_runs() {
        let aggregator = FitnessAggregator::new(4, 100);
        let runs = [1, 7, 3, 100];
        let fitness = aggregator.evaluate(&idle, |i| ScriptedDriver::new(1, runs[i]));
        assert_eq!(fitness, 5.0);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let weights = FeatureWeights::new([0.8, 0.3, 0.2, 0.1, 0.2]);
        let search = PlacementSearch::new(HeuristicEvaluator::new(weights));
        let aggregator = FitnessAggregator::new(2, 50);
        let seed = PieceSeed::from_bytes([3; 16]);
        let make_driver = |i: usize| GameDriver::with_seed(seed.nth(i as u64));
        let first = aggregator.evaluate(&search, make_driver);
        let second = aggregator.evaluate(&search, make_driver);
        assert_eq!(first, second);
    }
}
