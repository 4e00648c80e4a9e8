use std::fmt::Write;

use stackmine_core::*;

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn cell_label(cell_type: CellType) -> String {
    match cell_type {
        CellType::Bomb => "BOMB".to_string(),
        CellType::Multiplier(m) => format!("{}x", m.factor()),
        CellType::Global(tier) => format!("*{}", tier.factor()),
    }
}

fn view_label(index: CellIndex, view: CellView) -> String {
    match view {
        CellView::Hidden => format!("[{index:>2}]"),
        CellView::Pending => "...".to_string(),
        CellView::Revealed(cell_type) => cell_label(cell_type),
        CellView::Exposed(cell_type) => format!("({})", cell_label(cell_type)),
    }
}

pub(crate) fn board(snapshot: &RoundSnapshot) -> String {
    let mut out = String::new();
    let (rows, cols) = snapshot.size;
    for row in 0..rows {
        for col in 0..cols {
            let index = coords_to_index((row, col), snapshot.size);
            let _ = write!(out, "{:>7}", view_label(index, snapshot.cell((row, col))));
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "balance {}  bet {}  total win {}  stack x{}",
        money(snapshot.balance),
        money(snapshot.bet),
        money(snapshot.total_win),
        snapshot.stack
    );
    if !snapshot.active_globals.is_empty() {
        let timers: Vec<_> = snapshot
            .active_globals
            .iter()
            .map(|g| format!("x{}:{}", g.tier.factor(), g.remaining_clicks))
            .collect();
        let _ = write!(out, "  [{}]", timers.join(" "));
    }
    out
}

pub(crate) fn event(event: &EngineEvent) -> Option<String> {
    Some(match event {
        EngineEvent::RoundStarted(started) => {
            format!("Round {} started. Good luck!", started.round_id.0)
        }
        // already logged by the generator; only visible with -v
        EngineEvent::ConfigurationWarning(_) => return None,
        EngineEvent::Revealed(outcome) => reveal(outcome)?,
        EngineEvent::Collected(CollectOutcome::Collected(amount)) => {
            format!("Collected {}.", money(*amount))
        }
        EngineEvent::Collected(CollectOutcome::NothingToCollect) => {
            "Nothing to collect.".to_string()
        }
        EngineEvent::Collected(CollectOutcome::Rejected(reason)) => reason.to_string(),
        EngineEvent::BetChanged(bet) => format!("Bet set to {}.", money(*bet)),
        EngineEvent::RoundEnded { balance, .. } => {
            format!("Round over, balance {}. Type `n` for a new round.", money(*balance))
        }
    })
}

fn safe_reveal(reveal: &SafeReveal) -> String {
    match reveal {
        SafeReveal::Gain(gain) => format!(
            "+{} ({}x of bet) added to total win.",
            money(gain.amount),
            gain.effective_multiplier
        ),
        SafeReveal::GlobalFound(found) => format!(
            "Global multiplier x{} found, stack is now x{}.",
            found.tier.factor(),
            found.new_stack
        ),
    }
}

pub(crate) fn reveal(outcome: &RevealOutcome) -> Option<String> {
    Some(match outcome {
        RevealOutcome::Rejected(reason) => format!("{reason}."),
        RevealOutcome::Pending(_) => return None,
        RevealOutcome::Bust { total_win_lost, .. } => format!(
            "Boom! You hit a bomb and lost your total win of {}.",
            money(*total_win_lost)
        ),
        RevealOutcome::Gain(gain) => safe_reveal(&SafeReveal::Gain(*gain)),
        RevealOutcome::GlobalFound(found) => safe_reveal(&SafeReveal::GlobalFound(*found)),
        RevealOutcome::AutoCollected { amount, last } => format!(
            "{} All safe cells revealed. Collected {}!",
            safe_reveal(last),
            money(*amount)
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cells() {
        assert_eq!(cell_label(CellType::Bomb), "BOMB");
        assert_eq!(cell_label(CellType::Multiplier(Multiplier::OneHalf)), "1.5x");
        assert_eq!(cell_label(CellType::Global(Tier::X4)), "*4");
        assert_eq!(view_label(3, CellView::Hidden), "[ 3]");
        assert_eq!(
            view_label(3, CellView::Exposed(CellType::Multiplier(Multiplier::Double))),
            "(2x)"
        );
    }

    #[test]
    fn describes_gain() {
        let outcome = RevealOutcome::Gain(Gain {
            index: 1,
            amount: 5.0,
            effective_multiplier: 0.5,
        });
        assert_eq!(
            reveal(&outcome).as_deref(),
            Some("+$5.00 (0.5x of bet) added to total win.")
        );
    }

    #[test]
    fn configuration_warning_is_left_to_the_log() {
        let warning = EngineEvent::ConfigurationWarning(CompositionWarning {
            requested: 24,
            capacity: 25,
        });
        assert_eq!(event(&warning), None);
    }

    #[test]
    fn rejected_deferred_reveal_is_described() {
        let outcome = RevealOutcome::Rejected(RejectReason::InsufficientBalance);
        assert_eq!(
            reveal(&outcome),
            Some(format!("{}.", RejectReason::InsufficientBalance))
        );
    }

    #[test]
    fn board_lists_every_row() {
        let config = GameConfig {
            deferred: None,
            ..GameConfig::compact()
        };
        let engine = WagerEngine::new(config, 1).unwrap();
        let text = board(&RoundSnapshot::from_engine(&engine));

        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("balance $1000.00  bet $10.00"));
    }
}
