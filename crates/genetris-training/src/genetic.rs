//! Generational genetic algorithm over feature weights.
//!
//! One generation is:
//!
//! 1. [`Population::evaluate_fitness`] plays games for every chromosome, one
//!    scoped thread each, and sorts the population best first;
//! 2. [`PopulationEvolver::evolve`] keeps the `elite_count` best chromosomes
//!    and fills the rest of the next generation with children of
//!    tournament-selected parents (BLX-α crossover, then Gaussian mutation).
//!
//! Evolution parameters are plain data, so callers can change them between
//! generations (for example, narrowing mutation as training converges).

use std::thread;

use genetris_engine::Driver;
use genetris_evaluator::{features::FEATURE_COUNT, fitness::FitnessAggregator};
use genetris_stats::descriptive::DescriptiveStats;
use rand::{Rng, seq::IndexedRandom};

use crate::{chromosome::Chromosome, genes};

/// A non-empty set of chromosomes.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Creates `count` random chromosomes.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_chromosomes((0..count).map(|_| Chromosome::random(rng)).collect())
    }

    /// # Panics
    ///
    /// Panics if `chromosomes` is empty.
    #[must_use]
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        assert!(!chromosomes.is_empty(), "population must not be empty");
        Self { chromosomes }
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// The fittest chromosome, once the population has been evaluated.
    #[must_use]
    pub fn best(&self) -> &Chromosome {
        &self.chromosomes[0]
    }

    /// Recomputes every chromosome's fitness in parallel, then sorts the
    /// population by fitness, best first.
    ///
    /// `make_driver(i)` creates the driver for each chromosome's `i`-th game,
    /// so a seeded factory gives every chromosome the same piece sequences.
    pub fn evaluate_fitness<D, F>(&mut self, aggregator: &FitnessAggregator, make_driver: &F)
    where
        D: Driver,
        F: Fn(usize) -> D + Sync,
    {
        thread::scope(|s| {
            for chromosome in &mut self.chromosomes {
                s.spawn(move || {
                    chromosome.recalculate_fitness(aggregator, make_driver);
                });
            }
        });

        self.chromosomes
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    #[must_use]
    pub fn compute_fitness_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.chromosomes.iter().map(Chromosome::fitness))
            .expect("population is not empty")
    }

    /// Statistics of each gene across the population, in feature order.
    #[must_use]
    pub fn compute_weight_stats(&self) -> Vec<DescriptiveStats> {
        (0..FEATURE_COUNT)
            .map(|i| {
                let values = self.chromosomes.iter().map(|c| c.weights().as_array()[i]);
                DescriptiveStats::new(values).expect("population is not empty")
            })
            .collect()
    }
}

/// Parameters for producing the next generation.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top chromosomes copied unchanged.
    pub elite_count: usize,
    /// Upper bound of every gene.
    pub max_weight: f32,
    /// Chromosomes drawn per tournament (larger = stronger selection pressure).
    pub tournament_size: usize,
    /// Standard deviation of the mutation noise.
    pub mutation_sigma: f32,
    /// BLX-α widening factor.
    pub blx_alpha: f32,
    /// Per-gene mutation probability.
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Produces a population of the same size as `population`.
    ///
    /// # Panics
    ///
    /// Panics if `population` is not sorted by fitness (call
    /// [`Population::evaluate_fitness`] first) or `tournament_size` is zero.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let parents = &population.chromosomes;
        assert!(
            parents.is_sorted_by(|a, b| a.fitness() >= b.fitness()),
            "population must be sorted by fitness"
        );

        let mut next: Vec<Chromosome> = parents.iter().take(self.elite_count).cloned().collect();
        while next.len() < parents.len() {
            let p1 = tournament_select(parents, self.tournament_size, rng);
            let p2 = tournament_select(parents, self.tournament_size, rng);

            let mut child = genes::blx_alpha(
                p1.weights().as_array(),
                p2.weights().as_array(),
                self.blx_alpha,
                self.max_weight,
                rng,
            );
            genes::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                rng,
            );
            next.push(Chromosome::new(child.into()));
        }

        Population { chromosomes: next }
    }
}

/// Returns the fittest of `tournament_size` distinct chromosomes drawn at
/// random (or of all of them, if there are fewer).
fn tournament_select<'a, R>(
    chromosomes: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Chromosome
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0, "tournament size must be positive");
    chromosomes
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        .expect("population is not empty")
}

#[cfg(test)]
mod tests {
    use genetris_engine::{GameDriver, PieceSeed, Strategy};
    use genetris_evaluator::heuristic::FeatureWeights;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    /// Game that ends immediately with a fixed number of cleared lines.
    struct FixedLines(usize);

    impl Driver for FixedLines {
        fn play<S>(&mut self, _strategy: &S) -> bool
        where
            S: Strategy + ?Sized,
        {
            false
        }

        fn lines_cleared(&self) -> usize {
            self.0
        }
    }

    fn scored(gene: f32, lines: usize) -> Chromosome {
        let mut chromosome = Chromosome::new(FeatureWeights::new([gene; FEATURE_COUNT]));
        chromosome.recalculate_fitness(&FitnessAggregator::new(1, 1), |_| FixedLines(lines));
        chromosome
    }

    fn evolver() -> PopulationEvolver {
        PopulationEvolver {
            elite_count: 2,
            max_weight: 1.0,
            tournament_size: 2,
            mutation_sigma: 0.1,
            blx_alpha: 0.5,
            mutation_rate: 0.2,
        }
    }

    #[test]
    fn test_random_population_size() {
        let population = Population::random(5, &mut Pcg32::seed_from_u64(3));
        assert_eq!(population.chromosomes().len(), 5);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_empty_population_rejected() {
        let _ = Population::from_chromosomes(Vec::new());
    }

    #[test]
    fn test_evaluate_fitness_sorts_descending() {
        let mut population = Population::from_chromosomes(vec![
            Chromosome::new(FeatureWeights::new([0.0; FEATURE_COUNT])),
            Chromosome::new(FeatureWeights::new([0.9, 0.4, 0.3, 0.1, 0.2])),
            Chromosome::new(FeatureWeights::new([0.1, 0.9, 0.0, 0.5, 0.3])),
        ]);
        let seed = PieceSeed::from_bytes([5; 16]);
        population.evaluate_fitness(&FitnessAggregator::new(2, 150), &|i: usize| {
            GameDriver::with_seed(seed.nth(i as u64))
        });
        let fitness: Vec<f32> = population
            .chromosomes()
            .iter()
            .map(Chromosome::fitness)
            .collect();
        assert!(fitness.is_sorted_by(|a, b| a >= b));
        assert_eq!(population.best().fitness(), fitness[0]);
        assert_eq!(population.compute_fitness_stats().max, fitness[0]);
    }

    #[test]
    fn test_evolve_keeps_size_and_elites() {
        let population = Population::from_chromosomes(vec![
            scored(0.9, 40),
            scored(0.7, 30),
            scored(0.5, 20),
            scored(0.3, 10),
            scored(0.1, 0),
        ]);
        let next = evolver().evolve(&population, &mut Pcg32::seed_from_u64(2));
        assert_eq!(next.chromosomes().len(), 5);
        assert_eq!(next.chromosomes()[..2], population.chromosomes()[..2]);
        for chromosome in &next.chromosomes()[2..] {
            assert_eq!(chromosome.fitness(), 0.0);
            assert!(
                chromosome
                    .weights()
                    .as_array()
                    .iter()
                    .all(|g| (0.0..=1.0).contains(g))
            );
        }
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_evolve_requires_sorted_population() {
        let population = Population::from_chromosomes(vec![scored(0.1, 1), scored(0.2, 5)]);
        let _ = evolver().evolve(&population, &mut Pcg32::seed_from_u64(2));
    }

    #[test]
    fn test_tournament_of_whole_population_picks_best() {
        let chromosomes = [scored(0.1, 3), scored(0.2, 8), scored(0.3, 5)];
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..10 {
            let winner = tournament_select(&chromosomes, 5, &mut rng);
            assert_eq!(winner.fitness(), 8.0);
        }
    }

    #[test]
    fn test_weight_stats_per_feature() {
        let population = Population::from_chromosomes(vec![
            Chromosome::new(FeatureWeights::new([0.0, 0.2, 0.4, 0.6, 0.8])),
            Chromosome::new(FeatureWeights::new([1.0, 0.2, 0.4, 0.6, 0.8])),
        ]);
        let stats = population.compute_weight_stats();
        assert_eq!(stats.len(), FEATURE_COUNT);
        assert_eq!(stats[0].mean, 0.5);
        assert_eq!(stats[1].std_dev, 0.0);
    }
}
