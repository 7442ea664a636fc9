//! Genetic training of heuristic feature weights.
//!
//! A [`Chromosome`](chromosome::Chromosome) is a weight vector plus its fitness,
//! the median number of lines its placement search clears over a few
//! simulated games. Training evolves a [`Population`](genetic::Population) of
//! them, one generation at a time.
//!
//! ```text
//! Population
//!     ↓ evaluate_fitness (one thread per chromosome)
//! FitnessAggregator (genetris-evaluator)
//!     ↓ sorted by fitness
//! PopulationEvolver::evolve (elites + tournament / BLX-α / Gaussian mutation)
//!     ↓
//! next Population
//! ```
//!
//! # Example
//!
//! ```
//! use genetris_engine::{GameDriver, PieceSeed};
//! use genetris_evaluator::fitness::FitnessAggregator;
//! use genetris_training::genetic::{Population, PopulationEvolver};
//!
//! let mut rng = rand::rng();
//! let mut population = Population::random(4, &mut rng);
//! let evolver = PopulationEvolver {
//!     elite_count: 1,
//!     max_weight: 1.0,
//!     tournament_size: 2,
//!     mutation_sigma: 0.1,
//!     blx_alpha: 0.5,
//!     mutation_rate: 0.2,
//! };
//! let aggregator = FitnessAggregator::new(1, 20);
//! let seed = PieceSeed::from_bytes([0; 16]);
//!
//! for _ in 0..2 {
//!     let make_driver = |i: usize| GameDriver::with_seed(seed.nth(i as u64));
//!     population.evaluate_fitness(&aggregator, &make_driver);
//!     population = evolver.evolve(&population, &mut rng);
//! }
//! assert_eq!(population.chromosomes().len(), 4);
//! ```

pub mod chromosome;
pub mod genes;
pub mod genetic;
