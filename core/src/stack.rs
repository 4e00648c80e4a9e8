use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// An active global multiplier and the non-global reveals it has left.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalInstance {
    pub tier: Tier,
    pub remaining_clicks: u8,
}

/// FIFO of active global multipliers. The oldest entry is the one that decays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStack {
    active: VecDeque<GlobalInstance>,
    ceiling: Option<f64>,
}

impl GlobalStack {
    pub fn new(ceiling: Option<f64>) -> Self {
        Self {
            active: VecDeque::new(),
            ceiling,
        }
    }

    /// Product of all active tiers, capped at the ceiling if one is configured.
    pub fn current(&self) -> f64 {
        let product: f64 = self.active.iter().map(|g| g.tier.factor()).product();
        match self.ceiling {
            Some(ceiling) => product.min(ceiling),
            None => product,
        }
    }

    pub fn push(&mut self, tier: Tier, lifetime: u8) {
        self.active.push_back(GlobalInstance {
            tier,
            remaining_clicks: lifetime,
        });
    }

    /// Consumes one click from the oldest active global, dropping it once it runs out.
    ///
    /// Returns the expired entry, if any.
    pub fn decay(&mut self) -> Option<GlobalInstance> {
        let oldest = self.active.front_mut()?;
        oldest.remaining_clicks = oldest.remaining_clicks.saturating_sub(1);
        log::trace!(
            "Global {:?} decayed, {} clicks left",
            oldest.tier,
            oldest.remaining_clicks
        );
        if oldest.remaining_clicks == 0 {
            self.active.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> impl ExactSizeIterator<Item = &GlobalInstance> {
        self.active.iter()
    }
}
