use bon::Builder;

use crate::quantity::{percent::Percent, power::Watts};

/// SOC thresholds that zero the power reference of an already chosen command.
///
/// Each direction is checked independently of the planned behavior.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Guardrails {
    /// Charging is suppressed at or above this level.
    pub suppress_charge_at: Percent,

    /// Discharging is suppressed at or below this level.
    pub suppress_discharge_at: Percent,
}

impl Default for Guardrails {
    fn default() -> Self {
        Self {
            suppress_charge_at: Percent::saturating(98.0),
            suppress_discharge_at: Percent::saturating(16.0),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PowerReferences {
    pub charge: Watts,
    pub discharge: Watts,
}

impl Guardrails {
    pub fn apply(self, state_of_charge: Percent, nominal: Watts) -> PowerReferences {
        let charge = if state_of_charge >= self.suppress_charge_at { Watts::ZERO } else { nominal };
        let discharge =
            if state_of_charge <= self.suppress_discharge_at { Watts::ZERO } else { nominal };
        PowerReferences { charge, discharge }
    }
}
