use crate::*;

impl RoundState {
    /// Applies one validated reveal. The order of the steps matters:
    /// the stack is read before anything changes, and revealing a global never decays the others.
    pub(crate) fn resolve_reveal(&mut self, index: CellIndex, global_lifetime: u8) -> RevealOutcome {
        let pre_click_stack = self.globals.current();
        let cell_type = self.grid.cell_type(index).expect("index validated before resolving");

        self.balance = round_cents(self.balance - self.bet);
        self.revealed.insert(index);
        self.mark_started();

        let outcome = match cell_type {
            CellType::Bomb => {
                let total_win_lost = self.total_win;
                self.total_win = 0.0;
                self.finish(RoundEnding::Bust);
                log::debug!("Bomb at {index}, lost {total_win_lost}");
                return RevealOutcome::Bust {
                    index,
                    total_win_lost,
                };
            }
            CellType::Multiplier(base) => {
                let effective_multiplier = base.factor() * pre_click_stack;
                let amount = round_cents(self.bet * effective_multiplier);
                self.total_win = round_cents(self.total_win + amount);
                log::debug!("Gain at {index}: {amount} ({effective_multiplier}x)");
                RevealOutcome::Gain(Gain {
                    index,
                    amount,
                    effective_multiplier,
                })
            }
            CellType::Global(tier) => {
                self.globals.push(tier, global_lifetime);
                let new_stack = self.globals.current();
                log::debug!("Global {tier:?} at {index}, stack now {new_stack}");
                RevealOutcome::GlobalFound(GlobalFound {
                    index,
                    tier,
                    new_stack,
                })
            }
        };

        if !cell_type.is_global() {
            if let Some(expired) = self.globals.decay() {
                log::debug!("Global {:?} expired", expired.tier);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: CellType = CellType::Multiplier(Multiplier::Half);
    const ONE_HALF: CellType = CellType::Multiplier(Multiplier::OneHalf);

    fn round(cells: Vec<CellType>) -> RoundState {
        let grid = Grid::from_cells((1, cells.len() as Coord), cells).unwrap();
        RoundState::new(grid, 1000.0, 10.0, None)
    }

    #[test]
    fn half_cell_without_globals_pays_half_the_bet() {
        let mut state = round(vec![HALF, CellType::Bomb]);

        let outcome = state.resolve_reveal(0, 4);

        assert_eq!(
            outcome,
            RevealOutcome::Gain(Gain {
                index: 0,
                amount: 5.0,
                effective_multiplier: 0.5,
            })
        );
        assert_eq!(state.total_win(), 5.0);
        assert_eq!(state.balance(), 990.0);
        assert_eq!(state.phase(), RoundPhase::InProgress);
    }

    #[test]
    fn gain_uses_stack_from_before_the_reveal() {
        let mut state = round(vec![ONE_HALF, ONE_HALF, CellType::Bomb]);
        state.globals.push(Tier::X2, 1);

        let outcome = state.resolve_reveal(0, 4);

        // the global expires on this very reveal but still pays out
        assert_eq!(
            outcome,
            RevealOutcome::Gain(Gain {
                index: 0,
                amount: 30.0,
                effective_multiplier: 3.0,
            })
        );
        assert_eq!(state.stack(), 1.0);
    }

    #[test]
    fn bomb_wipes_total_win_and_still_costs_the_bet() {
        let mut state = round(vec![HALF, CellType::Bomb]);
        state.resolve_reveal(0, 4);

        let outcome = state.resolve_reveal(1, 4);

        assert_eq!(
            outcome,
            RevealOutcome::Bust {
                index: 1,
                total_win_lost: 5.0
            }
        );
        assert_eq!(state.total_win(), 0.0);
        assert_eq!(state.balance(), 980.0);
        assert_eq!(state.phase(), RoundPhase::Finished(RoundEnding::Bust));
        assert!(state.globals().is_empty());
    }

    #[test]
    fn consecutive_globals_do_not_decay_each_other() {
        let mut state = round(vec![
            CellType::Global(Tier::X2),
            CellType::Global(Tier::X4),
            HALF,
            CellType::Bomb,
        ]);

        state.resolve_reveal(0, 4);
        let outcome = state.resolve_reveal(1, 4);

        assert_eq!(
            outcome,
            RevealOutcome::GlobalFound(GlobalFound {
                index: 1,
                tier: Tier::X4,
                new_stack: 8.0,
            })
        );
        let clicks: Vec<_> = state.globals().active().map(|g| g.remaining_clicks).collect();
        assert_eq!(clicks, vec![4, 4]);

        state.resolve_reveal(2, 4);
        let clicks: Vec<_> = state.globals().active().map(|g| g.remaining_clicks).collect();
        assert_eq!(clicks, vec![3, 4]);
        assert_eq!(state.total_win(), 40.0);
    }
}
