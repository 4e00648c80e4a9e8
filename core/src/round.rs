use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnding {
    Bust,
    Collected,
    NothingToCollect,
    AutoCollected,
}

/// Valid transitions:
/// - Ready -> InProgress
/// - Ready -> Finished (bust on the first reveal, or collecting nothing)
/// - InProgress -> Finished
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No reveal accepted yet, bet can still change
    Ready,
    InProgress,
    Finished(RoundEnding),
}

impl RoundPhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// Authoritative state of a single round. A new one is built for every round; only the balance
/// and bet carry over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) balance: f64,
    pub(crate) bet: f64,
    pub(crate) total_win: f64,
    pub(crate) grid: Grid,
    pub(crate) revealed: BTreeSet<CellIndex>,
    pub(crate) pending: Option<CellIndex>,
    pub(crate) phase: RoundPhase,
    pub(crate) globals: GlobalStack,
}

impl RoundState {
    pub fn new(grid: Grid, balance: f64, bet: f64, stack_ceiling: Option<f64>) -> Self {
        Self {
            balance: round_cents(balance),
            bet: round_cents(bet),
            total_win: 0.0,
            grid,
            revealed: BTreeSet::new(),
            pending: None,
            phase: Default::default(),
            globals: GlobalStack::new(stack_ceiling),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn total_win(&self) -> f64 {
        self.total_win
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn globals(&self) -> &GlobalStack {
        &self.globals
    }

    /// Current global multiplier stack.
    pub fn stack(&self) -> f64 {
        self.globals.current()
    }

    pub fn pending(&self) -> Option<CellIndex> {
        self.pending
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed.len().try_into().unwrap()
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.revealed.contains(&index)
    }

    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        Some(Cell {
            cell_type: self.grid.cell_type(index)?,
            revealed: self.is_revealed(index),
        })
    }

    /// Cell as the player gets to see it; every cell is exposed once the round is over.
    pub fn cell_view(&self, index: CellIndex) -> Option<CellView> {
        let cell_type = self.grid.cell_type(index)?;
        Some(if self.is_revealed(index) {
            CellView::Revealed(cell_type)
        } else if self.pending == Some(index) {
            CellView::Pending
        } else if self.is_over() {
            CellView::Exposed(cell_type)
        } else {
            CellView::Hidden
        })
    }

    /// The bet only moves before the first reveal of the round.
    pub fn is_bet_locked(&self) -> bool {
        !self.revealed.is_empty() || self.pending.is_some()
    }

    /// Balance needed before the first reveal: the cost of clearing every safe cell.
    pub fn safety_threshold(&self) -> f64 {
        round_cents(self.bet * f64::from(self.grid.safe_cell_count()))
    }

    pub fn can_play(&self, min_bet: f64) -> bool {
        !self.is_over() && self.balance >= min_bet
    }

    pub fn can_collect(&self) -> bool {
        !self.is_over() && self.total_win > 0.0
    }

    pub(crate) fn set_bet(&mut self, amount: f64, min_bet: f64) -> BetOutcome {
        if self.is_over() {
            return BetOutcome::Rejected(RejectReason::RoundOver);
        }
        if self.is_bet_locked() {
            return BetOutcome::Rejected(RejectReason::BetLocked);
        }
        let amount = round_cents(amount);
        if !amount.is_finite() || amount < min_bet {
            return BetOutcome::Rejected(RejectReason::BelowMinimumBet);
        }
        self.bet = amount;
        BetOutcome::Accepted(amount)
    }

    /// Checks every gate a reveal at `index` has to pass. Never mutates.
    pub(crate) fn check_reveal(&self, index: CellIndex) -> core::result::Result<(), RejectReason> {
        if self.is_over() {
            return Err(RejectReason::RoundOver);
        }
        if self.is_revealed(index) || self.pending == Some(index) {
            return Err(RejectReason::AlreadyRevealed);
        }
        if self.pending.is_some() {
            return Err(RejectReason::RevealInFlight);
        }
        if self.revealed.is_empty() && self.balance < self.safety_threshold() {
            return Err(RejectReason::BelowSafetyThreshold);
        }
        if self.balance < self.bet {
            return Err(RejectReason::InsufficientBalance);
        }
        Ok(())
    }

    pub(crate) fn mark_started(&mut self) {
        if self.phase.is_ready() {
            self.phase = RoundPhase::InProgress;
        }
    }
}
