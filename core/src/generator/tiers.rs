use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Draws the tier of each global multiplier cell from a weighted table.
#[derive(Copy, Clone, Debug)]
pub struct TierAssigner<'a> {
    table: &'a TierTable,
}

impl<'a> TierAssigner<'a> {
    pub fn new(table: &'a TierTable) -> Self {
        Self { table }
    }

    pub fn assign(&self, rng: &mut SmallRng) -> Tier {
        if !self.table.is_usable() {
            log::warn!("Tier table has no usable weights, falling back to {:?}", Tier::X2);
            return Tier::X2;
        }
        let roll = rng.random_range(0.0..self.table.total_weight());
        self.table.tier_for(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_table_always_assigns_that_tier() {
        let table = TierTable::new([(Tier::X6, 1.0)]).unwrap();
        let assigner = TierAssigner::new(&table);
        let mut rng = SmallRng::seed_from_u64(7);

        assert!((0..100).all(|_| assigner.assign(&mut rng) == Tier::X6));
    }

    #[test]
    fn unusable_table_falls_back_to_lowest_tier() {
        let table: TierTable = serde_json::from_str(r#"{"entries":[]}"#).unwrap();
        let assigner = TierAssigner::new(&table);
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(!table.is_usable());
        assert_eq!(assigner.assign(&mut rng), Tier::X2);
        assert_eq!(table.tier_for(0.0), Tier::X2);
    }

    #[test]
    fn default_table_is_dominated_by_lowest_tier() {
        let table = TierTable::default();
        let assigner = TierAssigner::new(&table);
        let mut rng = SmallRng::seed_from_u64(42);

        let draws = 10_000;
        let x2 = (0..draws)
            .filter(|_| assigner.assign(&mut rng) == Tier::X2)
            .count();

        // 88% expected
        assert!((8_500..9_100).contains(&x2), "x2 drawn {x2} times");
    }
}
