use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Owns the configuration, the random source and the state of the current round.
///
/// Every command goes through `&mut self`, so reveals and collects are applied one at a time.
#[derive(Clone, Debug)]
pub struct WagerEngine {
    config: GameConfig,
    rng: SmallRng,
    round_id: RoundId,
    round: RoundState,
    events: Vec<EngineEvent>,
}

impl WagerEngine {
    /// Validates `config` and starts the first round.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let generated = RandomGridGenerator::new(rng.random()).generate(&config);
        let round = RoundState::new(
            generated.grid,
            config.starting_balance,
            config.starting_bet,
            config.stack_ceiling,
        );
        let mut engine = Self {
            config,
            rng,
            round_id: RoundId(1),
            round,
            events: Vec::new(),
        };
        engine.announce_round(generated.warning);
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn balance(&self) -> f64 {
        self.round.balance()
    }

    pub fn bet(&self) -> f64 {
        self.round.bet()
    }

    pub fn total_win(&self) -> f64 {
        self.round.total_win()
    }

    pub fn stack(&self) -> f64 {
        self.round.stack()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn is_round_over(&self) -> bool {
        self.round.is_over()
    }

    pub fn min_bet(&self) -> f64 {
        self.config.min_bet()
    }

    pub fn can_play(&self) -> bool {
        self.round.can_play(self.min_bet())
    }

    pub fn can_collect(&self) -> bool {
        self.round.can_collect()
    }

    pub fn cell_view(&self, index: CellIndex) -> Result<CellView> {
        self.round.cell_view(index).ok_or(GameError::InvalidIndex)
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        core::mem::take(&mut self.events)
    }

    /// Discards the current round and deals a fresh grid. Balance and bet carry over.
    pub fn begin_round(&mut self) -> RoundStarted {
        let generated = RandomGridGenerator::new(self.rng.random()).generate(&self.config);
        self.replace_round(generated.grid, generated.warning)
    }

    /// Like [`Self::begin_round`] but plays a grid laid out by the caller.
    pub fn begin_round_with_grid(&mut self, grid: Grid) -> RoundStarted {
        self.replace_round(grid, None)
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        self.round.grid().validate_index(index)?;

        if let Err(reason) = self.round.check_reveal(index) {
            log::debug!("Reveal at {index} rejected: {reason}");
            return Ok(RevealOutcome::Rejected(reason));
        }

        if let Some(ticket) = self.roll_deferral(index) {
            self.round.pending = Some(index);
            log::debug!("Reveal at {index} deferred by {:?}", ticket.delay);
            let outcome = RevealOutcome::Pending(ticket);
            self.events.push(EngineEvent::Revealed(outcome));
            return Ok(outcome);
        }

        Ok(self.apply_reveal(index))
    }

    /// Resolves a deferred reveal once its timer fired.
    ///
    /// Returns `None`, touching nothing, if the round it belongs to is gone or over, or the cell
    /// is no longer waiting on this ticket.
    pub fn fire_deferred(&mut self, ticket: DeferredReveal) -> Option<RevealOutcome> {
        if ticket.round_id != self.round_id
            || self.round.is_over()
            || self.round.is_revealed(ticket.index)
            || self.round.pending() != Some(ticket.index)
        {
            log::debug!("Discarding stale deferred reveal {ticket:?}");
            return None;
        }

        self.round.pending = None;
        if let Err(reason) = self.round.check_reveal(ticket.index) {
            log::debug!("Deferred reveal at {} rejected: {reason}", ticket.index);
            return Some(RevealOutcome::Rejected(reason));
        }
        Some(self.apply_reveal(ticket.index))
    }

    pub fn collect(&mut self) -> CollectOutcome {
        let outcome = self.round.collect_manual();
        if outcome.has_update() {
            self.events.push(EngineEvent::Collected(outcome));
            self.announce_round_end();
        }
        outcome
    }

    pub fn set_bet(&mut self, amount: f64) -> BetOutcome {
        let min_bet = self.min_bet();
        let outcome = self.round.set_bet(amount, min_bet);
        if let BetOutcome::Accepted(bet) = outcome {
            self.events.push(EngineEvent::BetChanged(bet));
        }
        outcome
    }

    /// Nudges the bet by one configured step, clamped to the allowed range.
    pub fn step_bet(&mut self, step: BetStep) -> BetOutcome {
        let current = self.round.bet();
        let target = match step {
            BetStep::Up => round_cents(current + self.config.bet_step).min(self.config.max_bet),
            BetStep::Down => round_cents(current - self.config.bet_step).max(self.min_bet()),
        };
        self.set_bet(target)
    }

    fn replace_round(&mut self, grid: Grid, warning: Option<CompositionWarning>) -> RoundStarted {
        self.round = RoundState::new(
            grid,
            self.round.balance(),
            self.round.bet(),
            self.config.stack_ceiling,
        );
        self.round_id = RoundId(self.round_id.0 + 1);
        self.announce_round(warning)
    }

    fn announce_round(&mut self, warning: Option<CompositionWarning>) -> RoundStarted {
        let started = RoundStarted {
            round_id: self.round_id,
            shape: self.round.grid().size(),
        };
        log::debug!(
            "Round {} started with {} bombs",
            self.round_id.0,
            self.round.grid().bomb_count()
        );
        if let Some(warning) = warning {
            self.events.push(EngineEvent::ConfigurationWarning(warning));
        }
        self.events.push(EngineEvent::RoundStarted(started));
        started
    }

    fn announce_round_end(&mut self) {
        let RoundPhase::Finished(ending) = self.round.phase() else {
            return;
        };
        self.events.push(EngineEvent::RoundEnded {
            round_id: self.round_id,
            ending,
            balance: self.round.balance(),
            exposed: self.round.grid().iter().map(|(_, cell)| cell).collect(),
        });
    }

    fn roll_deferral(&mut self, index: CellIndex) -> Option<DeferredReveal> {
        let policy = self.config.deferred?;
        if self.round.revealed_count() < policy.grace_reveals {
            return None;
        }
        self.rng
            .random_bool(policy.probability)
            .then_some(DeferredReveal {
                round_id: self.round_id,
                index,
                delay: policy.delay,
            })
    }

    fn apply_reveal(&mut self, index: CellIndex) -> RevealOutcome {
        let mut outcome = self
            .round
            .resolve_reveal(index, self.config.global_lifetime);

        if self.round.should_auto_collect()
            && let Ok(last) = SafeReveal::try_from(outcome)
        {
            let amount = self.round.collect_auto();
            log::debug!("All safe cells revealed, collected {amount}");
            outcome = RevealOutcome::AutoCollected { amount, last };
        }

        self.events.push(EngineEvent::Revealed(outcome));
        self.announce_round_end();
        outcome
    }
}
