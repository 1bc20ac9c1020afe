use std::fmt::{Debug, Display, Formatter};

use chrono::NaiveTime;

use crate::{core::behavior::Behavior, quantity::rate::KilowattHourRate};

/// One price interval of the day.
#[derive(Copy, Clone, PartialEq, derive_more::Constructor)]
pub struct PriceSlot {
    pub price: KilowattHourRate,

    /// Local time of day, inclusive.
    pub time_start: NaiveTime,

    /// Local time of day, exclusive. Equals `00:00` for the last slot of the day.
    pub time_end: NaiveTime,
}

impl PriceSlot {
    /// Behavior before any pre-conditioning: negative prices are charged on.
    pub const fn initial_behavior(&self) -> Behavior {
        if self.price.is_negative() { Behavior::Charge } else { Behavior::Auto }
    }
}

impl Display for PriceSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.time_start.format("%H:%M"), self.time_end.format("%H:%M"))
    }
}

impl Debug for PriceSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}@{:?}", self.price)
    }
}
