use std::path::PathBuf;

use anyhow::ensure;
use genetris_engine::{GameDriver, PieceSeed};
use genetris_evaluator::fitness::{FitnessAggregator, MAX_SIMULATION_LENGTH, N_SIMULATIONS};
use genetris_training::genetic::{Population, PopulationEvolver};

use crate::{
    model::AiModel,
    util::{self, Output},
};

const POPULATION_COUNT: usize = 30;
const MAX_GENERATIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum EvolutionPhase {
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    fn from_generation(generation: usize) -> Self {
        match generation {
            0..30 => Self::Exploration,
            30..80 => Self::Transition,
            _ => Self::Convergence,
        }
    }
}

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 2;
const MAX_WEIGHT: f32 = 1.0;
const MUTATION_RATE: f32 = 0.3;
const BLX_ALPHA: f32 = 0.2;

const fn mutation_sigma_by_phase(phase: EvolutionPhase) -> f32 {
    match phase {
        EvolutionPhase::Exploration => 0.1,
        EvolutionPhase::Transition => 0.05,
        EvolutionPhase::Convergence => 0.02,
    }
}

const fn evolver_by_phase(phase: EvolutionPhase) -> PopulationEvolver {
    PopulationEvolver {
        elite_count: ELITE_COUNT,
        tournament_size: TOURNAMENT_SIZE,
        max_weight: MAX_WEIGHT,
        mutation_sigma: mutation_sigma_by_phase(phase),
        blx_alpha: BLX_ALPHA,
        mutation_rate: MUTATION_RATE,
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of chromosomes per generation
    #[arg(long, default_value_t = POPULATION_COUNT)]
    population: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = MAX_GENERATIONS)]
    generations: usize,
    /// Games played per chromosome and generation
    #[arg(long, default_value_t = N_SIMULATIONS)]
    simulations: usize,
    /// Maximum number of moves per game
    #[arg(long, default_value_t = MAX_SIMULATION_LENGTH)]
    max_length: usize,
    /// Piece sequence seed (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Name stored in the model file
    #[arg(long, default_value = "genetris")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        population: population_count,
        generations,
        simulations,
        max_length,
        seed,
        name,
        output,
    } = arg;
    ensure!(*population_count > 0, "population must not be empty");
    ensure!(*generations > 0, "at least one generation is required");

    let seed = util::seed_or_random(*seed);
    let aggregator = FitnessAggregator::new(*simulations, *max_length);

    let mut rng = rand::rng();
    let mut population = Population::random(*population_count, &mut rng);
    for generation in 0..*generations {
        let phase = EvolutionPhase::from_generation(generation);
        eprintln!("Generation #{generation} ({phase}):");

        // Every chromosome of a generation plays the same games.
        let generation_seed = seed.nth((generation * simulations) as u64);
        population.evaluate_fitness(&aggregator, &|i: usize| {
            GameDriver::with_seed(generation_seed.nth(i as u64))
        });

        let weight_stats = population.compute_weight_stats();
        let fitness_stats = population.compute_fitness_stats();

        eprintln!("  Chromosomes:");
        for (i, chromosome) in population.chromosomes().iter().enumerate() {
            eprintln!(
                "  {i:2}: {:.3?} => {:.1}",
                chromosome.weights().as_array(),
                chromosome.fitness()
            );
        }

        eprintln!("  Weights Stats:");
        eprintln!(
            "    Min:    {:.3?}",
            weight_stats.iter().map(|s| s.min).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Max:    {:.3?}",
            weight_stats.iter().map(|s| s.max).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Mean:   {:.3?}",
            weight_stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Stddev: {:.3?}",
            weight_stats.iter().map(|s| s.std_dev).collect::<Vec<_>>(),
        );

        eprintln!("  Fitness Stats:");
        eprintln!("    Min:    {:.1}", fitness_stats.min);
        eprintln!("    Max:    {:.1}", fitness_stats.max);
        eprintln!("    Mean:   {:.1}", fitness_stats.mean);
        eprintln!("    Median: {:.1}", fitness_stats.median);

        if generation + 1 < *generations {
            population = evolver_by_phase(phase).evolve(&population, &mut rng);
        }
    }

    eprintln!("Best Chromosomes:");
    for (i, chromosome) in population.chromosomes().iter().take(5).enumerate() {
        eprintln!(
            "  {i:2}: {:?} => {}",
            chromosome.weights().as_array(),
            chromosome.fitness()
        );
    }

    let model = AiModel::from_chromosome(name, population.best());
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.1}", model.final_fitness);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(EvolutionPhase::from_generation(0), EvolutionPhase::Exploration);
        assert_eq!(EvolutionPhase::from_generation(29), EvolutionPhase::Exploration);
        assert_eq!(EvolutionPhase::from_generation(30), EvolutionPhase::Transition);
        assert_eq!(EvolutionPhase::from_generation(80), EvolutionPhase::Convergence);
    }

    #[test]
    fn test_mutation_narrows_over_phases() {
        let sigmas = [
            EvolutionPhase::Exploration,
            EvolutionPhase::Transition,
            EvolutionPhase::Convergence,
        ]
        .map(|phase| evolver_by_phase(phase).mutation_sigma);
        assert!(sigmas.is_sorted_by(|a, b| a > b));
    }
}
