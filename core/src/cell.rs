use serde::{Deserialize, Serialize};

/// Base multiplier carried by a multiplier cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Multiplier {
    Half,
    OneHalf,
    Double,
}

impl Multiplier {
    /// Class that absorbs any shortfall when a grid composition does not fill the grid.
    pub const PADDING: Self = Self::OneHalf;

    pub const fn factor(self) -> f64 {
        match self {
            Self::Half => 0.5,
            Self::OneHalf => 1.5,
            Self::Double => 2.0,
        }
    }
}

/// Multiplicative value of a global multiplier cell, assigned at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    X2,
    X4,
    X6,
    X8,
}

impl Tier {
    pub const fn factor(self) -> f64 {
        match self {
            Self::X2 => 2.0,
            Self::X4 => 4.0,
            Self::X6 => 6.0,
            Self::X8 => 8.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    Bomb,
    Multiplier(Multiplier),
    Global(Tier),
}

impl CellType {
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    pub const fn is_global(self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// What the rendering side is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    /// Reveal accepted but deferred behind a timer.
    Pending,
    Revealed(CellType),
    /// Never revealed by the player, exposed after the round ended.
    Exposed(CellType),
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A cell of the current round: its immutable type and whether the player has revealed it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub revealed: bool,
}
