use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Default number of hints granted per game.
pub const DEFAULT_HINTS: u8 = 3;

/// Who is in control of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    #[default]
    Human,
    Ai,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    /// Carries the actor who revealed the last safe cell.
    Won(Actor),
    /// Carries the actor who revealed the mine.
    Lost(Actor),
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Mutable state of one game, from the first reveal until it is discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    grid: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flags_remaining: CellCount,
    status: GameStatus,
    turn: Actor,
    ai_difficulty: AiDifficulty,
    hints_remaining: u8,
    triggered_mine: Option<Coord2>,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        let grid = Array2::from_shape_fn(board.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell {
                is_mine: board.contains_mine(coords),
                is_revealed: false,
                is_flagged: false,
                adjacent_mine_count: board.adjacent_mine_count(coords),
            }
        });
        let mine_count = board.mine_count();
        // a board without safe cells is cleared before anyone moves
        let status = if board.safe_cell_count() == 0 {
            GameStatus::Won(Actor::Human)
        } else {
            GameStatus::Playing
        };

        Self {
            grid,
            mine_count,
            revealed_count: 0,
            flags_remaining: mine_count,
            status,
            turn: Actor::Human,
            ai_difficulty: AiDifficulty::None,
            hints_remaining: DEFAULT_HINTS,
            triggered_mine: None,
        }
    }

    pub fn with_ai(mut self, ai_difficulty: AiDifficulty) -> Self {
        self.ai_difficulty = ai_difficulty;
        self
    }

    pub fn with_hints(mut self, hints: u8) -> Self {
        self.hints_remaining = hints;
        self
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        !self.status.is_finished()
    }

    pub fn has_won(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.grid.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.grid.len() as CellCount - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn flags_placed(&self) -> CellCount {
        self.mine_count - self.flags_remaining
    }

    pub fn turn(&self) -> Actor {
        self.turn
    }

    pub fn ai_difficulty(&self) -> AiDifficulty {
        self.ai_difficulty
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_difficulty.is_enabled()
    }

    /// Whether the human has to wait for [`GameState::ai_move`] before acting.
    pub fn awaits_ai(&self) -> bool {
        self.ai_enabled() && self.turn == Actor::Ai
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cell_at(coords).view()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.iter_neighbors(coords)
    }

    /// All cells that are neither revealed nor flagged, in row-major order.
    pub fn hidden_cells(&self) -> Vec<Coord2> {
        self.cells_where(|cell| cell.is_hidden())
    }

    /// Hidden cells that are known not to hold a mine, only usable by actors allowed to peek.
    pub(crate) fn hidden_safe_cells(&self) -> Vec<Coord2> {
        self.cells_where(|cell| cell.is_hidden() && !cell.is_mine)
    }

    fn cells_where(&self, predicate: impl Fn(Cell) -> bool) -> Vec<Coord2> {
        self.grid
            .indexed_iter()
            .filter(|&(_, &cell)| predicate(cell))
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    /// Toggles a flag for the human player.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.toggle_flag_as(coords, Actor::Human)
    }

    pub(crate) fn toggle_flag_as(&mut self, coords: Coord2, actor: Actor) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;
        if !self.is_playing() {
            return Ok(GameOver);
        }
        if actor == Actor::Human && self.awaits_ai() {
            return Ok(NotYourTurn);
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        Ok(if cell.is_revealed {
            CannotFlagRevealed
        } else if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_remaining += 1;
            FlagRemoved
        } else if self.flags_remaining == 0 {
            NoFlagsLeft
        } else {
            cell.is_flagged = true;
            self.flags_remaining -= 1;
            FlagPlaced
        })
    }

    /// Reveals a cell for the human player.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_as(coords, Actor::Human)
    }

    pub(crate) fn reveal_as(&mut self, coords: Coord2, actor: Actor) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if let Some(outcome) = self.check_revealable(coords, actor) {
            return Ok(outcome);
        }

        let outcome = self.open_cell(coords, actor);
        Ok(self.finish_action(outcome, actor))
    }

    /// Reveals every hidden neighbor of a revealed cell whose flagged-neighbor count matches its number.
    ///
    /// Any other cell is handled exactly like [`GameState::reveal`].
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let actor = Actor::Human;

        if !self.can_chord_at(coords) {
            return self.reveal_as(coords, actor);
        }

        let mut outcome = RevealOutcome::AlreadyRevealed;
        for neighbor in self.iter_neighbors(coords) {
            if !self.is_playing() {
                break;
            }
            if self.grid[neighbor.to_nd_index()].is_hidden() {
                outcome = outcome | self.open_cell(neighbor, actor);
            }
        }

        Ok(self.finish_action(outcome, actor))
    }

    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        if !self.is_playing() || self.awaits_ai() {
            return false;
        }

        match self.view_at(coords) {
            CellView::Revealed(count) => count == self.count_flagged_neighbors(coords),
            _ => false,
        }
    }

    /// Spends one hint to reveal a random hidden safe cell for the human player.
    pub fn request_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord2> {
        if self.hints_remaining == 0 || !self.is_playing() || self.awaits_ai() {
            return None;
        }

        let &coords = self.hidden_safe_cells().choose(rng)?;
        let outcome = self.reveal_as(coords, Actor::Human).ok()?;
        self.hints_remaining -= 1;
        log::debug!(
            "Hint revealed {:?} ({}), {} hints left",
            coords,
            outcome,
            self.hints_remaining
        );
        Some(coords)
    }

    /// Renders the board as text, one row per line.
    pub fn render(&self, reveal_mines: bool) -> String {
        let (rows, cols) = self.size();
        let mut out = String::with_capacity(usize::from(rows) * (usize::from(cols) * 2 + 1));

        for row in 0..rows {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..cols {
                if col > 0 {
                    out.push(' ');
                }
                let cell = self.cell_at((row, col));
                let view = match cell.view() {
                    CellView::Hidden if reveal_mines && cell.is_mine => CellView::Mine,
                    view => view,
                };
                out.push(view.symbol());
            }
        }

        out
    }

    pub(crate) fn end_ai_turn(&mut self) {
        if self.is_playing() && self.ai_difficulty.hands_back_turn() {
            self.turn = Actor::Human;
        }
    }

    fn check_revealable(&self, coords: Coord2, actor: Actor) -> Option<RevealOutcome> {
        let cell = self.grid[coords.to_nd_index()];
        if !self.is_playing() {
            Some(RevealOutcome::AlreadyFinished)
        } else if actor == Actor::Human && self.awaits_ai() {
            Some(RevealOutcome::NotYourTurn)
        } else if cell.is_flagged {
            Some(RevealOutcome::Flagged)
        } else if cell.is_revealed {
            Some(RevealOutcome::AlreadyRevealed)
        } else {
            None
        }
    }

    /// Reveals a hidden, unflagged cell and flood fills from it when it has no adjacent mines.
    fn open_cell(&mut self, coords: Coord2, actor: Actor) -> RevealOutcome {
        let cell = &mut self.grid[coords.to_nd_index()];
        cell.is_revealed = true;

        if cell.is_mine {
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost(actor));
            return RevealOutcome::MineHit(actor);
        }

        let adjacent_mines = cell.adjacent_mine_count;
        self.revealed_count += 1;
        log::debug!("{:?} revealed {:?}, adjacent mines: {}", actor, coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        RevealOutcome::Revealed
    }

    /// Iterative flood fill: reveals the zero-count region around `origin` plus its numbered border.
    ///
    /// Flagged cells and mines are never revealed and block propagation.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut visited = BTreeSet::from([origin]);
        let mut stack = vec![origin];

        while let Some(current) = stack.pop() {
            for neighbor in self.iter_neighbors(current) {
                let cell = &mut self.grid[neighbor.to_nd_index()];
                if cell.is_revealed || cell.is_flagged || cell.is_mine {
                    continue;
                }

                cell.is_revealed = true;
                let adjacent_mines = cell.adjacent_mine_count;
                self.revealed_count += 1;
                log::trace!("Flood revealed {:?}, adjacent mines: {}", neighbor, adjacent_mines);

                if adjacent_mines == 0 && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
    }

    /// Settles win detection and turn hand-over after a reveal action.
    fn finish_action(&mut self, outcome: RevealOutcome, actor: Actor) -> RevealOutcome {
        if !matches!(outcome, RevealOutcome::Revealed) {
            return outcome;
        }

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(GameStatus::Won(actor));
            return RevealOutcome::Won(actor);
        }

        if self.ai_enabled() && actor == Actor::Human && self.turn == Actor::Human {
            self.turn = Actor::Ai;
        }

        RevealOutcome::Revealed
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        log::debug!("Game ended: {:?}", status);
        self.status = status;
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.grid[pos.to_nd_index()].is_flagged)
            .count() as u8
    }
}
