use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Smallest bet the engine ever accepts, regardless of configuration.
pub const MIN_BET_FLOOR: f64 = 0.1;

/// Weighted distribution used to assign a tier to every global multiplier cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    entries: SmallVec<[(Tier, f64); 4]>,
}

impl TierTable {
    pub fn new(entries: impl IntoIterator<Item = (Tier, f64)>) -> Result<Self> {
        let entries: SmallVec<[(Tier, f64); 4]> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(GameError::InvalidConfig("tier table is empty"));
        }
        if entries.iter().any(|&(_, w)| !w.is_finite() || w < 0.0) {
            return Err(GameError::InvalidConfig("tier weights must be finite and non-negative"));
        }
        let table = Self { entries };
        if table.total_weight() <= 0.0 {
            return Err(GameError::InvalidConfig("tier weights sum to zero"));
        }
        Ok(table)
    }

    pub fn entries(&self) -> &[(Tier, f64)] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// Maps a draw in `[0, total_weight)` onto the tier whose cumulative range contains it.
    pub fn tier_for(&self, roll: f64) -> Tier {
        let mut cumulative = 0.0;
        for &(tier, weight) in &self.entries {
            cumulative += weight;
            if roll < cumulative {
                return tier;
            }
        }
        // float accumulation can leave the very top of the range uncovered
        self.entries
            .iter()
            .rev()
            .find(|&&(_, w)| w > 0.0)
            .or_else(|| self.entries.first())
            .map(|&(tier, _)| tier)
            .unwrap_or(Tier::X2)
    }

    /// Whether draws from this table are meaningful; deserialized tables skip [`Self::new`].
    pub fn is_usable(&self) -> bool {
        let total = self.total_weight();
        total.is_finite() && total > 0.0
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            entries: smallvec![
                (Tier::X2, 88.0),
                (Tier::X4, 10.0),
                (Tier::X6, 1.5),
                (Tier::X8, 0.5),
            ],
        }
    }
}

/// Cosmetic reveal delay: some reveals are held back behind a timer before resolving.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeferredRevealPolicy {
    pub probability: f64,
    pub delay: Duration,
    /// Reveals accepted in a round before deferral can kick in.
    pub grace_reveals: CellCount,
}

impl Default for DeferredRevealPolicy {
    fn default() -> Self {
        Self {
            probability: 0.3,
            delay: Duration::from_millis(400),
            grace_reveals: 2,
        }
    }
}

/// Fixed-size composition of one grid, apart from the bomb count which is drawn per round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub multipliers: SmallVec<[(Multiplier, CellCount); 3]>,
    pub globals: CellCount,
}

impl Composition {
    pub fn count_of(&self, multiplier: Multiplier) -> CellCount {
        self.multipliers
            .iter()
            .filter(|&&(m, _)| m == multiplier)
            .fold(0, |acc: CellCount, &(_, n)| acc.saturating_add(n))
    }

    /// Cells requested by this composition for a round with `bombs` bombs, before padding.
    pub fn requested_cells(&self, bombs: CellCount) -> CellCount {
        self.multipliers
            .iter()
            .fold(bombs.saturating_add(self.globals), |acc, &(_, n)| {
                acc.saturating_add(n)
            })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid shape as `(rows, cols)`.
    pub size: Coord2,
    /// Bomb count is drawn uniformly from these once per round.
    pub bomb_choices: SmallVec<[CellCount; 4]>,
    pub composition: Composition,
    pub tier_table: TierTable,
    /// Non-global reveals a global multiplier survives.
    pub global_lifetime: u8,
    pub stack_ceiling: Option<f64>,
    pub min_bet: f64,
    pub max_bet: f64,
    pub bet_step: f64,
    pub starting_balance: f64,
    pub starting_bet: f64,
    pub deferred: Option<DeferredRevealPolicy>,
}

impl GameConfig {
    pub const DEFAULT_GLOBAL_LIFETIME: u8 = 4;
    pub const DEFAULT_MAX_BET: f64 = 999_999.0;
    pub const DEFAULT_BET_STEP: f64 = 0.1;
    pub const DEFAULT_STARTING_BALANCE: f64 = 1000.0;
    pub const DEFAULT_STARTING_BET: f64 = 10.0;

    /// 5x5 grid with four or five bombs and an uncapped global stack.
    pub fn standard() -> Self {
        Self {
            size: (5, 5),
            bomb_choices: smallvec![4, 5],
            composition: Composition {
                multipliers: smallvec![
                    (Multiplier::Half, 6),
                    (Multiplier::OneHalf, 7),
                    (Multiplier::Double, 4),
                ],
                globals: 3,
            },
            tier_table: TierTable::default(),
            global_lifetime: Self::DEFAULT_GLOBAL_LIFETIME,
            stack_ceiling: None,
            min_bet: MIN_BET_FLOOR,
            max_bet: Self::DEFAULT_MAX_BET,
            bet_step: Self::DEFAULT_BET_STEP,
            starting_balance: Self::DEFAULT_STARTING_BALANCE,
            starting_bet: Self::DEFAULT_STARTING_BET,
            deferred: Some(DeferredRevealPolicy::default()),
        }
    }

    /// 4x4 grid with three bombs and the global stack capped at 8x.
    pub fn compact() -> Self {
        Self {
            size: (4, 4),
            bomb_choices: smallvec![3],
            composition: Composition {
                multipliers: smallvec![
                    (Multiplier::Half, 4),
                    (Multiplier::OneHalf, 4),
                    (Multiplier::Double, 3),
                ],
                globals: 2,
            },
            stack_ceiling: Some(8.0),
            ..Self::standard()
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Effective minimum bet, never below [`MIN_BET_FLOOR`].
    pub fn min_bet(&self) -> f64 {
        self.min_bet.max(MIN_BET_FLOOR)
    }

    pub fn validate(&self) -> Result<()> {
        let total = self.total_cells();
        if total == 0 {
            return Err(GameError::InvalidConfig("grid has no cells"));
        }
        if self.bomb_choices.is_empty() {
            return Err(GameError::InvalidConfig("no bomb count to choose from"));
        }
        if self.bomb_choices.iter().any(|&b| b == 0 || b >= total) {
            return Err(GameError::InvalidConfig(
                "bomb count must leave at least one safe cell",
            ));
        }
        if self.global_lifetime == 0 {
            return Err(GameError::InvalidConfig("global lifetime must be positive"));
        }
        if let Some(ceiling) = self.stack_ceiling {
            if !ceiling.is_finite() || ceiling < 1.0 {
                return Err(GameError::InvalidConfig("stack ceiling must be at least 1"));
            }
        }
        if !self.max_bet.is_finite() || self.max_bet < self.min_bet() {
            return Err(GameError::InvalidConfig("max bet is below the minimum bet"));
        }
        if !self.bet_step.is_finite() || self.bet_step <= 0.0 {
            return Err(GameError::InvalidConfig("bet step must be positive"));
        }
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(GameError::InvalidConfig("starting balance must be non-negative"));
        }
        if !self.starting_bet.is_finite() || self.starting_bet < self.min_bet() {
            return Err(GameError::InvalidConfig("starting bet is below the minimum bet"));
        }
        if let Some(policy) = self.deferred {
            if !(0.0..=1.0).contains(&policy.probability) {
                return Err(GameError::InvalidConfig(
                    "deferred reveal probability must be within [0, 1]",
                ));
            }
        }
        // Re-validates the weights of a table that may have been deserialized.
        TierTable::new(self.tier_table.entries().iter().copied())?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_table_matches_cumulative_ranges() {
        let table = TierTable::default();
        assert_eq!(table.total_weight(), 100.0);
        assert_eq!(table.tier_for(0.0), Tier::X2);
        assert_eq!(table.tier_for(87.99), Tier::X2);
        assert_eq!(table.tier_for(88.0), Tier::X4);
        assert_eq!(table.tier_for(97.99), Tier::X4);
        assert_eq!(table.tier_for(98.0), Tier::X6);
        assert_eq!(table.tier_for(99.49), Tier::X6);
        assert_eq!(table.tier_for(99.5), Tier::X8);
        assert_eq!(table.tier_for(100.0), Tier::X8);
    }

    #[test]
    fn tier_table_rejects_empty_and_zero_weights() {
        assert!(TierTable::new([]).is_err());
        assert!(TierTable::new([(Tier::X2, 0.0)]).is_err());
        assert!(TierTable::new([(Tier::X2, f64::NAN)]).is_err());
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(GameConfig::standard().validate(), Ok(()));
        assert_eq!(GameConfig::compact().validate(), Ok(()));
        assert_eq!(GameConfig::compact().total_cells(), 16);
    }

    #[test]
    fn min_bet_never_drops_below_floor() {
        let config = GameConfig {
            min_bet: 0.01,
            ..GameConfig::standard()
        };
        assert_eq!(config.min_bet(), MIN_BET_FLOOR);
    }

    #[test]
    fn validate_rejects_bomb_only_grid() {
        let config = GameConfig {
            size: (2, 2),
            bomb_choices: smallvec![4],
            ..GameConfig::standard()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::compact();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
