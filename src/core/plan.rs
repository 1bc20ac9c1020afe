use crate::core::{behavior::Behavior, slot::PriceSlot};

#[derive(Copy, Clone, Debug, PartialEq, derive_more::Constructor)]
pub struct PlannedSlot {
    pub slot: PriceSlot,
    pub behavior: Behavior,
}

/// Day plan, index-aligned to the hour of the day.
///
/// The length follows the price source: 23 and 25 slots are legit on DST transition days.
#[must_use]
#[derive(Clone, Debug, PartialEq, derive_more::Deref, derive_more::IntoIterator)]
pub struct BehaviorPlan(#[into_iterator(owned, ref)] Vec<PlannedSlot>);

impl BehaviorPlan {
    pub(super) const fn new(slots: Vec<PlannedSlot>) -> Self {
        Self(slots)
    }

    pub fn behaviors(&self) -> impl Iterator<Item = Behavior> + '_ {
        self.0.iter().map(|planned| planned.behavior)
    }

    /// Trace the plan slot by slot.
    pub fn trace(&self) {
        for (hour, planned) in self.0.iter().enumerate() {
            tracing::debug!(
                hour,
                slot = %planned.slot,
                price = %planned.slot.price,
                behavior = %planned.behavior,
                "planned",
            );
        }
    }
}
