use super::*;

/// Hard opponent: looks at the mine layout and reveals a random safe cell.
///
/// Falls back to any hidden cell once no safe one is left unflagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OmniscientPolicy;

impl MovePolicy for OmniscientPolicy {
    fn make_move<R: Rng + ?Sized>(&self, game: &mut GameState, rng: &mut R) -> AiTurn {
        let mut turn = AiTurn::new(Policy::Omniscient);

        let target = match game.hidden_safe_cells().choose(rng) {
            Some(&coords) => Some((coords, RevealKind::KnownSafe)),
            None => game
                .hidden_cells()
                .choose(rng)
                .map(|&coords| (coords, RevealKind::Blind)),
        };

        if let Some((coords, kind)) = target {
            turn.reveal(game, coords, kind);
        }
        turn
    }
}
