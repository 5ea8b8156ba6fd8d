//! Turn-based Minesweeper engine.
//!
//! A [`Board`] is produced by a [`BoardGenerator`] (or built from known mine positions), wrapped into a
//! [`GameState`], and then mutated only through [`GameState::reveal`], [`GameState::toggle_flag`],
//! [`GameState::ai_move`] and their relatives. [`GameSession`] adds lazy generation around the first click.
#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use ai::*;
pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod ai;
mod analysis;
mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub fn square(size: Coord, mines: CellCount) -> Self {
        Self::new((size, size), mines)
    }

    /// Like [`GameConfig::new`] but refuses instead of clamping.
    pub fn checked(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        // at least one safe cell has to be left to reveal
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10)
    }
}

/// How far apart mines are kept during generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Clustered,
    #[default]
    Spread,
}

impl Density {
    pub const fn min_spacing(self) -> Coord {
        match self {
            Self::Clustered => 0,
            Self::Spread => 1,
        }
    }
}

/// Mine layout plus the per-cell neighbor counts derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl Board {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        check_shape(mine_mask.dim())?;
        Ok(Self::from_mine_mask_unchecked(mine_mask))
    }

    pub(crate) fn from_mine_mask_unchecked(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let adjacent = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });
        Self {
            mine_mask,
            adjacent,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        check_shape((size.0.into(), size.1.into()))?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask_unchecked(mine_mask))
    }

    /// Builds a board from the classic encoding: `-1` for a mine, otherwise the neighbor mine count.
    ///
    /// Every count is checked against the mines actually surrounding the cell.
    pub fn from_values(values: &Array2<i8>) -> Result<Self> {
        check_shape(values.dim())?;
        let board = Self::from_mine_mask_unchecked(values.mapv(|value| value == -1));

        for ((row, col), &value) in values.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            if value != -1 && i16::from(value) != i16::from(board.adjacent_mine_count(coords)) {
                return Err(GameError::InvalidCellValue(coords));
            }
        }

        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines around `coords`, meaningless for mine cells.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

fn check_shape((rows, cols): (usize, usize)) -> Result<()> {
    let max = usize::from(Coord::MAX);
    if rows == 0 || cols == 0 || rows > max || cols > max {
        Err(GameError::InvalidBoardShape)
    } else {
        Ok(())
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    GameOver,
    NotYourTurn,
    CannotFlagRevealed,
    FlagRemoved,
    NoFlagsLeft,
    FlagPlaced,
}

impl fmt::Display for FlagOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GameOver => "Game over.",
            Self::NotYourTurn => "Not your turn.",
            Self::CannotFlagRevealed => "Can't flag revealed cell.",
            Self::FlagRemoved => "Flag removed.",
            Self::NoFlagsLeft => "No flags left.",
            Self::FlagPlaced => "Flag placed.",
        })
    }
}

/// Result of a reveal, the ending variants carry who made the move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    AlreadyFinished,
    NotYourTurn,
    Flagged,
    AlreadyRevealed,
    MineHit(Actor),
    Won(Actor),
    Revealed,
}

impl RevealOutcome {
    /// Whether the game is over after this outcome.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::AlreadyFinished | Self::MineHit(_) | Self::Won(_))
    }
}

impl fmt::Display for RevealOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RevealOutcome::*;
        match self {
            AlreadyFinished => f.write_str("Game already finished."),
            NotYourTurn => f.write_str("Not your turn."),
            Flagged => f.write_str("Cell is flagged."),
            AlreadyRevealed => f.write_str("Already revealed."),
            MineHit(Actor::Human) => f.write_str("Mine hit!"),
            MineHit(Actor::Ai) => f.write_str("AI hit a mine!"),
            Won(Actor::Human) => f.write_str("You won!"),
            Won(Actor::Ai) => f.write_str("AI cleared the board!"),
            Revealed => f.write_str("Revealed."),
        }
    }
}

/// Used to merge outcomes when chording.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (MineHit(actor), _) | (_, MineHit(actor)) => MineHit(actor),
            (Won(actor), _) | (_, Won(actor)) => Won(actor),
            (Revealed, _) | (_, Revealed) => Revealed,
            (AlreadyFinished, _) | (_, AlreadyFinished) => AlreadyFinished,
            (lhs, _) => lhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_mines_to_board() {
        let config = GameConfig::square(3, 50);
        assert_eq!(config.mines, 9);
        assert_eq!(GameConfig::new((0, 4), 0), GameConfig::new_unchecked((1, 4), 1));
    }

    #[test]
    fn checked_config_rejects_overfull_board() {
        assert_eq!(GameConfig::checked((2, 2), 5), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::checked((2, 2), 4), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::checked((0, 2), 1), Err(GameError::InvalidBoardShape));
        assert!(GameConfig::checked((2, 2), 3).is_ok());
    }

    #[test]
    fn counts_match_brute_force() {
        let board = Board::from_mine_coords((4, 5), &[(0, 0), (1, 1), (3, 4)]).unwrap();

        assert_eq!(board.mine_count(), 3);
        assert_eq!(board.safe_cell_count(), 17);
        assert_eq!(board.adjacent_mine_count((0, 1)), 2);
        assert_eq!(board.adjacent_mine_count((2, 2)), 1);
        assert_eq!(board.adjacent_mine_count((2, 4)), 1);
        assert_eq!(board.adjacent_mine_count((0, 4)), 0);
    }

    #[test]
    fn from_values_checks_counts() {
        let good = Array2::from_shape_vec([2, 2], alloc::vec![-1, 1, 1, 1]).unwrap();
        let board = Board::from_values(&good).unwrap();
        assert!(board.contains_mine((0, 0)));
        assert_eq!(board.mine_count(), 1);

        let bad = Array2::from_shape_vec([2, 2], alloc::vec![-1, 2, 1, 1]).unwrap();
        assert_eq!(Board::from_values(&bad), Err(GameError::InvalidCellValue((0, 1))));
    }

    #[test]
    fn rejects_out_of_bounds_mines() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn merged_outcome_prefers_mine_hit() {
        use RevealOutcome::*;
        assert_eq!(Revealed | MineHit(Actor::Human), MineHit(Actor::Human));
        assert_eq!(Won(Actor::Ai) | Revealed, Won(Actor::Ai));
        assert_eq!(AlreadyRevealed | Revealed, Revealed);
        assert_eq!(Flagged | AlreadyRevealed, Flagged);
    }
}
