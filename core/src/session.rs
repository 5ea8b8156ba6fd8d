use rand::prelude::*;

use crate::*;

/// Everything needed to start a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub config: GameConfig,
    pub density: Density,
    pub ai_difficulty: AiDifficulty,
    pub hints: u8,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            density: Density::default(),
            ai_difficulty: AiDifficulty::default(),
            hints: DEFAULT_HINTS,
        }
    }
}

/// A game whose board is only generated once the first cell is revealed, so that the first click is always safe.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    options: GameOptions,
    game: Option<GameState>,
    placement: Option<Placement>,
}

impl GameSession {
    pub fn new(options: GameOptions) -> Self {
        Self {
            options,
            game: None,
            placement: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.game.is_some()
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    /// How mine placement went, once the board exists.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Reveals a cell, generating the board around it first if this is the opening move.
    pub fn reveal<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> Result<RevealOutcome> {
        let (rows, cols) = self.options.config.size;
        if coords.0 >= rows || coords.1 >= cols {
            return Err(GameError::InvalidCoords);
        }

        let options = self.options;
        let placement = &mut self.placement;
        let game = self.game.get_or_insert_with(|| {
            let generated = generate_board(
                options.config,
                Some(coords),
                options.density.min_spacing(),
                rng,
            );
            log::debug!("Starting game after first click at {:?}", coords);
            *placement = Some(generated.placement);
            GameState::new(generated.board)
                .with_ai(options.ai_difficulty)
                .with_hints(options.hints)
        });

        game.reveal(coords)
    }

    /// Throws the current game away; the next reveal starts a fresh board.
    pub fn restart(&mut self) {
        self.game = None;
        self.placement = None;
    }
}
