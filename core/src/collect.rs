use crate::*;

impl RoundState {
    /// Player-initiated collect. Only valid while the round is running.
    pub(crate) fn collect_manual(&mut self) -> CollectOutcome {
        if self.is_over() {
            return CollectOutcome::Rejected(RejectReason::RoundOver);
        }
        if self.total_win > 0.0 {
            let amount = self.transfer_win();
            self.finish(RoundEnding::Collected);
            CollectOutcome::Collected(amount)
        } else {
            self.finish(RoundEnding::NothingToCollect);
            CollectOutcome::NothingToCollect
        }
    }

    /// Every safe cell has been revealed.
    pub(crate) fn should_auto_collect(&self) -> bool {
        !self.is_over() && self.revealed_count() == self.grid.safe_cell_count()
    }

    pub(crate) fn collect_auto(&mut self) -> f64 {
        let amount = self.transfer_win();
        self.finish(RoundEnding::AutoCollected);
        amount
    }

    fn transfer_win(&mut self) -> f64 {
        let amount = self.total_win;
        self.balance = round_cents(self.balance + amount);
        self.total_win = 0.0;
        amount
    }

    /// Round-end side effects shared by every way a round can end.
    pub(crate) fn finish(&mut self, ending: RoundEnding) {
        if self.is_over() {
            return;
        }
        self.phase = RoundPhase::Finished(ending);
        self.pending = None;
        self.globals.clear();
        log::debug!("Round ended: {ending:?}, balance {}", self.balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: CellType = CellType::Multiplier(Multiplier::Half);

    fn round() -> RoundState {
        let grid = Grid::from_cells((1, 3), vec![HALF, HALF, CellType::Bomb]).unwrap();
        RoundState::new(grid, 100.0, 10.0, None)
    }

    #[test]
    fn manual_collect_moves_win_into_balance() {
        let mut state = round();
        state.resolve_reveal(0, 4);
        state.globals.push(Tier::X2, 4);

        assert_eq!(state.collect_manual(), CollectOutcome::Collected(5.0));
        assert_eq!(state.balance(), 95.0);
        assert_eq!(state.total_win(), 0.0);
        assert_eq!(state.phase(), RoundPhase::Finished(RoundEnding::Collected));
        assert_eq!(state.stack(), 1.0);
    }

    #[test]
    fn collecting_nothing_still_ends_round() {
        let mut state = round();

        assert_eq!(state.collect_manual(), CollectOutcome::NothingToCollect);
        assert_eq!(state.balance(), 100.0);
        assert_eq!(
            state.phase(),
            RoundPhase::Finished(RoundEnding::NothingToCollect)
        );
        assert_eq!(
            state.collect_manual(),
            CollectOutcome::Rejected(RejectReason::RoundOver)
        );
    }

    #[test]
    fn auto_collect_triggers_once_safe_cells_are_cleared() {
        let mut state = round();
        state.resolve_reveal(0, 4);
        assert!(!state.should_auto_collect());

        state.resolve_reveal(1, 4);
        assert!(state.should_auto_collect());
        assert_eq!(state.collect_auto(), 10.0);
        assert_eq!(state.balance(), 90.0);
        assert!(!state.should_auto_collect());
    }
}
