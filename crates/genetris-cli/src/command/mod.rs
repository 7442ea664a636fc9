use clap::{Parser, Subcommand};

use self::{evaluate::EvaluateArg, play::PlayArg, train::TrainArg};

mod evaluate;
mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve feature weights with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Auto-play one game with a model
    Play(#[clap(flatten)] PlayArg),
    /// Measure the fitness of a saved model
    Evaluate(#[clap(flatten)] EvaluateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}
