//! Behavior planning over a day of prices.
//!
//! Negative-price slots are charged on. Before every such charge block, up to
//! [`HOURS_FOR_DISCHARGE`] slots are proactively discharged so that the battery has room to
//! absorb the cheap energy. A backward scan never crosses an earlier charge slot.

use itertools::Itertools;

use crate::{
    core::{
        behavior::Behavior,
        plan::{BehaviorPlan, PlannedSlot},
        slot::PriceSlot,
    },
    prelude::*,
};

/// Default pre-conditioning window length.
pub const HOURS_FOR_DISCHARGE: usize = 3;

#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Planner {
    #[builder(default = HOURS_FOR_DISCHARGE)]
    hours_for_discharge: usize,
}

impl Default for Planner {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Planner {
    /// Assign a behavior to every slot. Pure: the output has the same length and order.
    #[instrument(skip_all, fields(n_slots = slots.len()))]
    pub fn plan(&self, slots: Vec<PriceSlot>) -> BehaviorPlan {
        let mut behaviors = slots.iter().map(PriceSlot::initial_behavior).collect_vec();

        for index in 0..behaviors.len() {
            let (preceding, rest) = behaviors.split_at_mut(index);
            if rest[0] == Behavior::Charge {
                // Marked slots all lie before `index`, so the scan simply moves on to `index + 1`:
                let n_marked = self.precondition(preceding);
                trace!(index, n_marked, "pre-conditioned the charge slot");
            }
        }

        let planned = slots.into_iter().zip(behaviors).map(|(slot, behavior)| {
            PlannedSlot::new(slot, behavior)
        });
        BehaviorPlan::new(planned.collect())
    }

    /// Mark the tail of `preceding` as discharging.
    ///
    /// Stops at an existing charge slot or once the window is full, whichever comes first.
    ///
    /// # Returns
    ///
    /// Number of marked slots.
    fn precondition(&self, preceding: &mut [Behavior]) -> usize {
        let mut n_marked = 0;
        for behavior in preceding.iter_mut().rev().take(self.hours_for_discharge) {
            if *behavior == Behavior::Charge {
                break;
            }
            *behavior = Behavior::Discharge;
            n_marked += 1;
        }
        n_marked
    }
}
