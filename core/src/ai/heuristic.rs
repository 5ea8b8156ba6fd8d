use super::*;

/// Flags placed by one heuristic turn at most.
pub const MAX_FLAGS_PER_TURN: usize = 3;

/// Medium opponent: only sees what a player sees and plays the two basic Minesweeper deductions.
///
/// 1. A clue whose unrevealed neighbors are exactly as many as its number has a mine under each of them, so one is
///    flagged. This repeats up to [`MAX_FLAGS_PER_TURN`] times.
/// 2. A clue whose flagged neighbors already match its number has only safe hidden neighbors, so one is revealed.
///
/// When no safe reveal is found the turn falls back to a random hidden cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeuristicPolicy;

impl MovePolicy for HeuristicPolicy {
    fn make_move<R: Rng + ?Sized>(&self, game: &mut GameState, rng: &mut R) -> AiTurn {
        let mut turn = AiTurn::new(Policy::Heuristic);

        for _ in 0..MAX_FLAGS_PER_TURN {
            let Some(coords) = find_forced_mine(&Observation::from_game(game)) else {
                break;
            };
            if !turn.flag(game, coords) {
                break;
            }
        }

        if let Some(coords) = find_safe_neighbor(&Observation::from_game(game)) {
            turn.reveal(game, coords, RevealKind::Deduced);
        } else if let Some(&coords) = game.hidden_cells().choose(rng) {
            turn.reveal(game, coords, RevealKind::Random);
        }

        turn
    }
}

/// First hidden cell that must be a mine because its clue has no other unrevealed neighbors to account for.
pub fn find_forced_mine(obs: &Observation) -> Option<Coord2> {
    obs.clues()
        .filter(|&(_, count)| count > 0)
        .find_map(|(clue, count)| {
            let summary = obs.summarize_neighbors(clue);
            (summary.unrevealed() == count)
                .then_some(summary.first_hidden)
                .flatten()
        })
}

/// First hidden cell next to a clue whose mines are all flagged already.
pub fn find_safe_neighbor(obs: &Observation) -> Option<Coord2> {
    obs.clues().find_map(|(clue, count)| {
        let summary = obs.summarize_neighbors(clue);
        (summary.flagged == count)
            .then_some(summary.first_hidden)
            .flatten()
    })
}
