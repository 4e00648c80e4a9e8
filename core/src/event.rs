use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStarted {
    pub round_id: RoundId,
    pub shape: Coord2,
}

/// Notifications for whatever renders the game. Rejected commands emit nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    RoundStarted(RoundStarted),
    ConfigurationWarning(CompositionWarning),
    Revealed(RevealOutcome),
    Collected(CollectOutcome),
    BetChanged(f64),
    /// The whole grid, row-major, exposed now that the round is over
    RoundEnded {
        round_id: RoundId,
        ending: RoundEnding,
        balance: f64,
        exposed: Vec<CellType>,
    },
}
