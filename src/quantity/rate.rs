use std::fmt::{Debug, Display, Formatter};

/// Energy price per kilowatt-hour, in whichever currency the price source was asked for.
///
/// May be negative.
#[derive(Copy, Clone, PartialEq, PartialOrd, serde::Deserialize)]
pub struct KilowattHourRate(pub f64);

impl KilowattHourRate {
    pub const ZERO: Self = Self(0.0);

    pub const fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}/kWh", self.0)
    }
}
