use serde::{Deserialize, Serialize};

/// Full state of one grid cell, mine layout included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Only meaningful when `is_mine` is false.
    pub adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn view(self) -> CellView {
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (true, _, true) => CellView::Mine,
            (true, _, false) => CellView::Revealed(self.adjacent_mine_count),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }
}

/// Canonical player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Only visible once the mine has been triggered.
    Mine,
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Revealed(0) => ' ',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_prefers_revealed_over_flag() {
        let cell = Cell {
            is_mine: false,
            is_revealed: true,
            is_flagged: false,
            adjacent_mine_count: 3,
        };
        assert_eq!(cell.view(), CellView::Revealed(3));
        assert_eq!(cell.view().symbol(), '3');
    }

    #[test]
    fn hidden_mine_looks_hidden() {
        let cell = Cell {
            is_mine: true,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Hidden);
        assert!(cell.is_hidden());
    }
}
