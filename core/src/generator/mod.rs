use crate::*;
pub use random::*;
pub use tiers::*;

mod random;
mod tiers;

pub trait GridGenerator {
    fn generate(self, config: &GameConfig) -> GeneratedGrid;
}

/// A freshly generated grid, with the fix-up warning if the composition did not fit.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub warning: Option<CompositionWarning>,
}
