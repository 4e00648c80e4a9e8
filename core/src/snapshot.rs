use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to draw the current round, with unrevealed cells masked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round_id: RoundId,
    pub size: Coord2,
    pub balance: f64,
    pub bet: f64,
    pub total_win: f64,
    pub stack: f64,
    pub phase: RoundPhase,
    pub active_globals: Vec<GlobalInstance>,
    pub can_play: bool,
    pub can_collect: bool,
    pub cells: Array2<CellView>,
}

impl RoundSnapshot {
    pub fn from_engine(engine: &WagerEngine) -> Self {
        let round = engine.round();
        let size = round.grid().size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        for (index, _) in round.grid().iter() {
            if let (Some(coords), Some(view)) =
                (index_to_coords(index, size), round.cell_view(index))
            {
                cells[coords.to_nd_index()] = view;
            }
        }

        Self {
            round_id: engine.round_id(),
            size,
            balance: round.balance(),
            bet: round.bet(),
            total_win: round.total_win(),
            stack: round.stack(),
            phase: round.phase(),
            active_globals: round.globals().active().copied().collect(),
            can_play: engine.can_play(),
            can_collect: engine.can_collect(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: CellType = CellType::Multiplier(Multiplier::Half);

    fn engine() -> WagerEngine {
        let config = GameConfig {
            deferred: None,
            ..GameConfig::compact()
        };
        let mut engine = WagerEngine::new(config, 3).unwrap();
        let mut cells = vec![HALF; 16];
        cells[0] = CellType::Bomb;
        cells[5] = CellType::Global(Tier::X2);
        engine.begin_round_with_grid(Grid::from_cells((4, 4), cells).unwrap());
        engine
    }

    #[test]
    fn from_engine_masks_unrevealed_cells() {
        let mut engine = engine();
        engine.reveal(5).unwrap();

        let snapshot = RoundSnapshot::from_engine(&engine);

        assert_eq!(snapshot.size, (4, 4));
        assert_eq!(snapshot.cell((1, 1)), CellView::Revealed(CellType::Global(Tier::X2)));
        assert_eq!(snapshot.cell((0, 0)), CellView::Hidden);
        assert_eq!(snapshot.stack, 2.0);
        assert_eq!(snapshot.active_globals.len(), 1);
        assert!(!snapshot.can_collect);
    }

    #[test]
    fn bust_exposes_every_cell() {
        let mut engine = engine();
        engine.reveal(0).unwrap();

        let snapshot = RoundSnapshot::from_engine(&engine);

        assert_eq!(snapshot.phase, RoundPhase::Finished(RoundEnding::Bust));
        assert_eq!(snapshot.cell((0, 0)), CellView::Revealed(CellType::Bomb));
        assert_eq!(snapshot.cell((3, 3)), CellView::Exposed(HALF));
        assert!(!snapshot.can_play);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut engine = engine();
        engine.reveal(3).unwrap();

        let snapshot = RoundSnapshot::from_engine(&engine);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RoundSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
    }
}
