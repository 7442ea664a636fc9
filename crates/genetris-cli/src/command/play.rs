use std::path::PathBuf;

use genetris_engine::{Driver as _, GameDriver, PieceSeed};
use genetris_evaluator::{
    fitness::MAX_SIMULATION_LENGTH, heuristic::HeuristicEvaluator,
    placement_search::PlacementSearch,
};
use serde::Serialize;

use crate::{
    model::{AiModel, DEFAULT_WEIGHTS},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format); built-in weights if omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Maximum number of moves
    #[arg(long, default_value_t = MAX_SIMULATION_LENGTH)]
    max_length: usize,
    /// Print the field to stderr after every move
    #[arg(long)]
    show: bool,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    seed: PieceSeed,
    pieces_placed: usize,
    lines_cleared: usize,
    /// Number of moves that cleared 0, 1, 2, 3 and 4 lines.
    line_cleared_counter: [usize; 5],
    game_over: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        model,
        seed,
        max_length,
        show,
    } = arg;

    let weights = match model {
        Some(path) => AiModel::open(path)?.to_weights()?,
        None => DEFAULT_WEIGHTS,
    };
    let search = PlacementSearch::new(HeuristicEvaluator::new(weights));
    eprintln!("Weights: {:.3?}", search.evaluator().weights().as_array());
    let seed = util::seed_or_random(*seed);

    let mut game = GameDriver::with_seed(seed);
    for _ in 0..*max_length {
        if !game.play(&search) {
            break;
        }
        if *show {
            eprintln!(
                "Move #{} (lines: {})",
                game.pieces_placed(),
                game.lines_cleared()
            );
            eprintln!("{}", game.field());
        }
    }

    if game.is_game_over() {
        eprintln!("Game over after {} pieces", game.pieces_placed());
    } else {
        eprintln!("Stopped after {} pieces", game.pieces_placed());
    }

    let summary = GameSummary {
        seed,
        pieces_placed: game.pieces_placed(),
        lines_cleared: game.lines_cleared(),
        line_cleared_counter: *game.stats().line_cleared_counter(),
        game_over: game.is_game_over(),
    };
    Output::save_json(&summary, None)
}
