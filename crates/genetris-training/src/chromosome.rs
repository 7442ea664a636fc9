use genetris_engine::Driver;
use genetris_evaluator::{
    fitness::FitnessAggregator,
    heuristic::{FeatureWeights, HeuristicEvaluator},
    placement_search::PlacementSearch,
};
use rand::Rng;

use crate::genes;

/// A candidate weight vector and its last measured fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    weights: FeatureWeights,
    fitness: f32,
}

impl Chromosome {
    /// Creates an unevaluated chromosome (fitness 0).
    #[must_use]
    pub fn new(weights: FeatureWeights) -> Self {
        Self {
            weights,
            fitness: 0.0,
        }
    }

    /// Samples every gene uniformly from `[0.0, 1.0)`.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(genes::random(rng, 1.0).into())
    }

    #[must_use]
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Median lines cleared as of the last [`Chromosome::recalculate_fitness`].
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// The placement policy these weights describe.
    #[must_use]
    pub fn strategy(&self) -> PlacementSearch<HeuristicEvaluator> {
        PlacementSearch::new(HeuristicEvaluator::new(self.weights))
    }

    /// Plays fresh games with [`Chromosome::strategy`] and stores the result.
    ///
    /// Unseeded drivers make the result vary between calls.
    pub fn recalculate_fitness<D, F>(
        &mut self,
        aggregator: &FitnessAggregator,
        make_driver: F,
    ) -> f32
    where
        D: Driver,
        F: FnMut(usize) -> D,
    {
        self.fitness = aggregator.evaluate(&self.strategy(), make_driver);
        self.fitness
    }
}
