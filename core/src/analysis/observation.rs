use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of a game: revealed counts and flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub revealed: Array2<Option<u8>>,
    pub flags: Array2<bool>,
}

/// Unrevealed cells around a clue, split by whether they carry a flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborSummary {
    pub hidden: u8,
    pub flagged: u8,
    pub first_hidden: Option<Coord2>,
}

impl NeighborSummary {
    pub const fn unrevealed(self) -> u8 {
        self.hidden + self.flagged
    }
}

impl Observation {
    pub fn new(size: Coord2, revealed: Array2<Option<u8>>, flags: Array2<bool>) -> Result<Self> {
        let obs = Self {
            size,
            revealed,
            flags,
        };
        obs.validate()?;
        Ok(obs)
    }

    pub fn from_game(game: &GameState) -> Self {
        let size = game.size();
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);
        let mut flags = Array2::from_elem(size.to_nd_index(), false);

        let (row_end, col_end) = size;
        for row in 0..row_end {
            for col in 0..col_end {
                let coords = (row, col);
                match game.view_at(coords) {
                    CellView::Hidden | CellView::Mine => {}
                    CellView::Revealed(count) => revealed[coords.to_nd_index()] = Some(count),
                    CellView::Flagged => flags[coords.to_nd_index()] = true,
                }
            }
        }

        Self {
            size,
            revealed,
            flags,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.revealed.dim() != expected || self.flags.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }

    pub fn is_hidden(&self, coords: Coord2) -> bool {
        let index = coords.to_nd_index();
        self.revealed[index].is_none() && !self.flags[index]
    }

    /// Revealed cells and their numbers, in row-major order.
    pub fn clues(&self) -> impl Iterator<Item = (Coord2, u8)> + '_ {
        self.revealed
            .indexed_iter()
            .filter_map(|((row, col), &count)| Some(((row as Coord, col as Coord), count?)))
    }

    pub fn summarize_neighbors(&self, coords: Coord2) -> NeighborSummary {
        let mut summary = NeighborSummary::default();

        for neighbor in self.revealed.iter_neighbors(coords) {
            let index = neighbor.to_nd_index();
            if self.revealed[index].is_some() {
                continue;
            }
            if self.flags[index] {
                summary.flagged += 1;
            } else {
                summary.hidden += 1;
                summary.first_hidden.get_or_insert(neighbor);
            }
        }

        summary
    }
}
