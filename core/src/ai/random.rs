use super::*;

/// Easy opponent: reveals a uniformly random hidden, unflagged cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn make_move<R: Rng + ?Sized>(&self, game: &mut GameState, rng: &mut R) -> AiTurn {
        let mut turn = AiTurn::new(Policy::Random);
        if let Some(&coords) = game.hidden_cells().choose(rng) {
            turn.reveal(game, coords, RevealKind::Random);
        }
        turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn picks_only_hidden_unflagged_cells() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = Board::from_mine_coords((4, 4), &[(0, 0), (3, 3)]).unwrap();
            let mut game = GameState::new(board).with_ai(AiDifficulty::Easy);
            game.toggle_flag((0, 0)).unwrap();
            assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);

            let turn = game.ai_move(&mut rng);

            let coords = turn.revealed().unwrap();
            assert_ne!(coords, (0, 0));
            assert_ne!(coords, (1, 1));
            assert!(game.cell_at(coords).is_revealed);
            if game.is_playing() {
                assert_eq!(game.turn(), Actor::Human);
            } else {
                assert!(turn.is_terminal());
            }
        }
    }

    #[test]
    fn no_hidden_cells_means_no_move() {
        let mut rng = SmallRng::seed_from_u64(0);
        let board = Board::from_mine_coords((1, 3), &[(0, 0)]).unwrap();
        let mut game = GameState::new(board);
        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.reveal((0, 2)).unwrap(), RevealOutcome::Won(Actor::Human));
        assert!(game.hidden_cells().is_empty());

        let turn = RandomPolicy.make_move(&mut game, &mut rng);

        assert_eq!(turn.status, AiStatus::NoValidMoves);
        assert!(turn.actions.is_empty());
        assert_eq!(turn.to_string(), "AI (Easy): No valid moves for AI.");
    }
}
