use anyhow::{Result, bail};
use rand::prelude::*;
use turnsweep_core::*;

/// Opens the board at `first_click` (the center by default) and lets the auto-solver finish it.
pub(crate) fn run(options: GameOptions, mut rng: SmallRng, first_click: Option<Coord2>) -> Result<()> {
    let (rows, cols) = options.config.size;
    let first_click = first_click.unwrap_or((rows / 2, cols / 2));

    let mut session = GameSession::new(options);
    let outcome = session.reveal(first_click, &mut rng)?;
    if let Some(Placement::Partial { requested, placed }) = session.placement() {
        println!("Only {placed} of {requested} mines fit with {:?} density.", options.density);
    }
    println!("first click ({}, {}): {outcome}", first_click.0, first_click.1);

    let Some(game) = session.game_mut() else {
        bail!("no game was started");
    };

    for (step, turn) in game.autosolve(&mut rng).enumerate() {
        println!("{:>4}. {turn}", step + 1);
    }

    println!("{}", game.render(true));
    match game.status() {
        GameStatus::Won(_) => println!("Solved."),
        status => println!("Stopped: {status:?}"),
    }
    Ok(())
}
