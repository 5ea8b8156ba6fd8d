use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use turnsweep_core::Coord2;

mod options;
mod play;
mod scores;
mod solve;

use options::GameArgs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game on the terminal
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Where best times are kept
        #[arg(long, default_value = scores::DEFAULT_SCORES_FILE)]
        scores_file: PathBuf,
    },

    /// Let the auto-solver clear a fresh board
    Solve {
        #[command(flatten)]
        game: GameArgs,

        /// Opening move as ROW,COL, the center by default
        #[arg(long, value_parser = options::parse_coords)]
        first_click: Option<Coord2>,
    },

    /// Show the best times
    Scores {
        /// Where best times are kept
        #[arg(long, default_value = scores::DEFAULT_SCORES_FILE)]
        scores_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Command::Play { game, scores_file } => play::run(game.resolve()?, game.rng(), &scores_file),
        Command::Solve { game, first_click } => solve::run(game.resolve()?, game.rng(), first_click),
        Command::Scores { scores_file } => {
            let best = scores::BestTimes::load(&scores_file)?;
            if best.is_empty() {
                println!("No best times yet.");
            }
            for line in best.lines() {
                println!("{line}");
            }
            Ok(())
        }
    }
}
