use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use rand::prelude::*;
use turnsweep_core::*;

use crate::options::parse_coords;
use crate::scores::{BestTimes, format_secs};

const HELP: &str = "commands: r ROW COL (reveal), f ROW COL (flag), c ROW COL (chord), h (hint), q (quit)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    Hint,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let coords = || parse_coords(rest.trim()).map_err(|err| anyhow!(err));

        Ok(match verb {
            "r" | "reveal" => Self::Reveal(coords()?),
            "f" | "flag" => Self::Flag(coords()?),
            "c" | "chord" => Self::Chord(coords()?),
            "h" | "hint" => Self::Hint,
            "q" | "quit" => Self::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command {other:?}"),
        })
    }
}

/// Interactive game on stdin/stdout until the game ends or the player quits.
pub(crate) fn run(options: GameOptions, mut rng: SmallRng, scores_file: &Path) -> Result<()> {
    let mut session = GameSession::new(options);
    let mut started: Option<Instant> = None;
    let (rows, cols) = options.config.size;

    println!(
        "{}x{} board, {} mines, AI: {}",
        rows,
        cols,
        options.config.mines,
        options.ai_difficulty.label()
    );
    println!("{HELP}");
    prompt()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}\n{HELP}");
                prompt()?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(err) = apply(command, &mut session, &mut rng, &mut started) {
            println!("{err}");
        }

        if let Some(game) = session.game_mut() {
            play_ai_turns(game, &mut rng);
            println!("{}", game.render(!game.is_playing()));

            if !game.is_playing() {
                let elapsed = started.map(|at| at.elapsed()).unwrap_or_default();
                if human_won(game) {
                    record_win(scores_file, elapsed)?;
                } else {
                    println!("Game over after {}.", format_secs(elapsed.as_secs()));
                }
                return Ok(());
            }

            println!(
                "flags left: {}, hints left: {}",
                game.flags_remaining(),
                game.hints_remaining()
            );
        }
        prompt()?;
    }

    Ok(())
}

fn apply(
    command: Command,
    session: &mut GameSession,
    rng: &mut SmallRng,
    started: &mut Option<Instant>,
) -> Result<()> {
    if let Command::Reveal(coords) = command {
        let outcome = session.reveal(coords, rng)?;
        started.get_or_insert_with(Instant::now);
        println!("{outcome}");
        return Ok(());
    }

    let Some(game) = session.game_mut() else {
        bail!("Reveal a cell first.");
    };

    match command {
        Command::Flag(coords) => println!("{}", game.toggle_flag(coords)?),
        Command::Chord(coords) => println!("{}", game.chord(coords)?),
        Command::Hint => match game.request_hint(rng) {
            Some((row, col)) => println!("Hint revealed ({row}, {col})."),
            None => println!("No hints available."),
        },
        Command::Reveal(_) | Command::Quit => {}
    }
    Ok(())
}

/// Lets the AI move for as long as it holds the turn.
fn play_ai_turns(game: &mut GameState, rng: &mut SmallRng) {
    while game.is_playing() && game.awaits_ai() {
        let turn = game.ai_move(rng);
        println!("{turn}");
        if !matches!(turn.status, AiStatus::Moved(_)) {
            break;
        }
    }
}

/// Only a board the human cleared counts for the best times.
fn human_won(game: &GameState) -> bool {
    game.status() == GameStatus::Won(Actor::Human)
}

fn record_win(scores_file: &Path, elapsed: std::time::Duration) -> Result<()> {
    println!("Cleared in {}.", format_secs(elapsed.as_secs()));

    let mut best = BestTimes::load(scores_file)?;
    match best.insert(elapsed) {
        Some(rank) => {
            best.save(scores_file)?;
            println!("New best time, rank {rank}!");
        }
        None => log::debug!("{:?} did not make the best times", elapsed),
    }
    Ok(())
}

fn prompt() -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
