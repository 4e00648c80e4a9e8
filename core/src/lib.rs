use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use round::*;
pub use snapshot::*;
pub use stack::*;
pub use types::*;

mod cell;
mod collect;
mod config;
mod engine;
mod error;
mod event;
mod generator;
mod grid;
mod resolve;
mod round;
mod snapshot;
mod stack;
mod types;

/// Identifies one round of an engine; bumped by every `begin_round`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

/// Ticket for a reveal that was held back behind a timer.
///
/// Hand it back to [`WagerEngine::fire_deferred`] once `delay` has passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredReveal {
    pub round_id: RoundId,
    pub index: CellIndex,
    pub delay: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gain {
    pub index: CellIndex,
    pub amount: f64,
    pub effective_multiplier: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalFound {
    pub index: CellIndex,
    pub tier: Tier,
    pub new_stack: f64,
}

/// A reveal that landed on a safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SafeReveal {
    Gain(Gain),
    GlobalFound(GlobalFound),
}

/// Outcome of a reveal command
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Rejected(RejectReason),
    Pending(DeferredReveal),
    Bust {
        index: CellIndex,
        total_win_lost: f64,
    },
    Gain(Gain),
    GlobalFound(GlobalFound),
    /// The reveal cleared the last safe cell and the win was collected automatically
    AutoCollected {
        amount: f64,
        last: SafeReveal,
    },
}

impl RevealOutcome {
    pub const fn ends_round(self) -> bool {
        matches!(self, Self::Bust { .. } | Self::AutoCollected { .. })
    }
}

impl TryFrom<RevealOutcome> for SafeReveal {
    type Error = RevealOutcome;

    fn try_from(outcome: RevealOutcome) -> core::result::Result<Self, Self::Error> {
        match outcome {
            RevealOutcome::Gain(gain) => Ok(Self::Gain(gain)),
            RevealOutcome::GlobalFound(found) => Ok(Self::GlobalFound(found)),
            other => Err(other),
        }
    }
}

/// Outcome of a collect command
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CollectOutcome {
    Collected(f64),
    NothingToCollect,
    Rejected(RejectReason),
}

impl CollectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Outcome of a bet change
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BetOutcome {
    Accepted(f64),
    Rejected(RejectReason),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetStep {
    Up,
    Down,
}
