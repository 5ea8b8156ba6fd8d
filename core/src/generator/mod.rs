use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Generated;
}

/// Whether the generator managed to place every requested mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Complete,
    /// Spacing or the forbidden zone left no room for the remaining mines.
    Partial {
        requested: CellCount,
        placed: CellCount,
    },
}

impl Placement {
    pub const fn is_partial(self) -> bool {
        matches!(self, Self::Partial { .. })
    }

    pub const fn shortfall(self) -> CellCount {
        match self {
            Self::Complete => 0,
            Self::Partial { requested, placed } => requested - placed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    pub board: Board,
    pub placement: Placement,
}
