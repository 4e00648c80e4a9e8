use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Grid shape does not match declared size")]
    InvalidGridShape,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a command was refused. Refusals never mutate state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("Cell already revealed")]
    AlreadyRevealed,
    #[error("Round is over, start a new round")]
    RoundOver,
    #[error("Insufficient balance for this bet")]
    InsufficientBalance,
    #[error("Balance does not cover clearing every safe cell at this bet")]
    BelowSafetyThreshold,
    #[error("Another reveal is still in flight")]
    RevealInFlight,
    #[error("Bet is locked until the next round")]
    BetLocked,
    #[error("Bet is below the minimum")]
    BelowMinimumBet,
}

/// Grid composition did not add up to the grid size; the generator fixed it up.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Grid composition has {requested} cells but the grid holds {capacity}")]
pub struct CompositionWarning {
    pub requested: CellCount,
    pub capacity: CellCount,
}
