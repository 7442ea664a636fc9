use std::path::PathBuf;

use genetris_engine::{GameDriver, PieceSeed};
use genetris_evaluator::fitness::{FitnessAggregator, MAX_SIMULATION_LENGTH, N_SIMULATIONS};
use genetris_training::chromosome::Chromosome;
use serde::Serialize;

use crate::{
    model::AiModel,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Path to the model file (JSON format)
    #[arg(long)]
    model: PathBuf,
    /// Number of games to play
    #[arg(long, default_value_t = N_SIMULATIONS)]
    simulations: usize,
    /// Maximum number of moves per game
    #[arg(long, default_value_t = MAX_SIMULATION_LENGTH)]
    max_length: usize,
    /// Piece sequence seed (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
}

#[derive(Debug, Serialize)]
struct Evaluation {
    name: String,
    seed: PieceSeed,
    simulations: usize,
    max_length: usize,
    fitness: f32,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        model,
        simulations,
        max_length,
        seed,
    } = arg;

    let model = AiModel::open(model)?;
    let mut chromosome = Chromosome::new(model.to_weights()?);
    let seed = util::seed_or_random(*seed);
    let aggregator = FitnessAggregator::new(*simulations, *max_length);

    eprintln!("Evaluating {} over {simulations} games...", model.name);
    let fitness = chromosome.recalculate_fitness(&aggregator, |i| {
        GameDriver::with_seed(seed.nth(i as u64))
    });
    eprintln!("  Fitness (median lines cleared): {fitness:.1}");
    eprintln!("  Fitness at training time:       {:.1}", model.final_fitness);

    let evaluation = Evaluation {
        name: model.name,
        seed,
        simulations: *simulations,
        max_length: *max_length,
        fitness,
    };
    Output::save_json(&evaluation, None)
}
