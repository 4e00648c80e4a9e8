use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that lays out the configured multiset of cells and shuffles it uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &GameConfig) -> GeneratedGrid {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let size = (config.size.0.max(1), config.size.1.max(1));
        if size != config.size {
            log::warn!(
                "Grid shape {:?} has no cells, generating {:?} instead",
                config.size,
                size
            );
        }
        let total_cells = mult(size.0, size.1);

        let bombs = config
            .bomb_choices
            .choose(&mut rng)
            .copied()
            .unwrap_or(1)
            .clamp(1, total_cells.saturating_sub(1).max(1));

        let (mut cells, warning) = compose(config, total_cells, bombs, &mut rng);
        shuffle(&mut cells, &mut rng);

        let grid = Grid::from_cells(size, cells)
            .expect("composition should be fitted to the grid size");
        GeneratedGrid { grid, warning }
    }
}

/// Concatenates bombs, every multiplier class and the globals, then fits the result to the grid.
///
/// A shortfall is padded with [`Multiplier::PADDING`] cells. An excess is trimmed from the end,
/// which never reaches the bombs at the front.
fn compose(
    config: &GameConfig,
    capacity: CellCount,
    bombs: CellCount,
    rng: &mut SmallRng,
) -> (Vec<CellType>, Option<CompositionWarning>) {
    let total_cells = usize::from(capacity);
    let composition = &config.composition;
    let assigner = TierAssigner::new(&config.tier_table);

    let mut cells = Vec::with_capacity(total_cells);
    cells.extend(core::iter::repeat_n(CellType::Bomb, bombs.into()));
    for &(multiplier, count) in &composition.multipliers {
        cells.extend(core::iter::repeat_n(
            CellType::Multiplier(multiplier),
            count.into(),
        ));
    }
    for _ in 0..composition.globals {
        cells.push(CellType::Global(assigner.assign(rng)));
    }

    let requested = composition.requested_cells(bombs);
    let warning = (cells.len() != total_cells).then(|| {
        let warning = CompositionWarning {
            requested,
            capacity,
        };
        log::warn!("{warning}, fitting composition to grid");
        warning
    });

    if cells.len() < total_cells {
        cells.resize(total_cells, CellType::Multiplier(Multiplier::PADDING));
    } else {
        cells.truncate(total_cells);
    }

    (cells, warning)
}

/// Fisher-Yates: walks from the last index down to 1, swapping each slot with a uniform pick
/// from the unshuffled prefix.
pub(crate) fn shuffle<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
