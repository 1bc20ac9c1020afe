use clap::Parser;

use crate::{
    core::{
        guardrails::Guardrails,
        planner::{HOURS_FOR_DISCHARGE, Planner},
    },
    quantity::{percent::Percent, power::Watts},
};

#[derive(Copy, Clone, Parser)]
pub struct SteeringArgs {
    /// Nominal charging and discharging power reference in watts.
    #[clap(long = "power-reference-watts", env = "POWER_REFERENCE_WATTS", default_value = "3000")]
    pub power_reference: Watts,

    /// Maximum number of hours to discharge right before a charging block.
    #[clap(long, env = "HOURS_FOR_DISCHARGE", default_value_t = HOURS_FOR_DISCHARGE)]
    pub hours_for_discharge: usize,

    /// Zero the charging power at or above this state of charge.
    #[clap(long, env = "SUPPRESS_CHARGE_AT", default_value = "98")]
    pub suppress_charge_at: Percent,

    /// Zero the discharging power at or below this state of charge.
    #[clap(long, env = "SUPPRESS_DISCHARGE_AT", default_value = "16")]
    pub suppress_discharge_at: Percent,
}

impl SteeringArgs {
    pub fn planner(self) -> Planner {
        Planner::builder().hours_for_discharge(self.hours_for_discharge).build()
    }

    pub fn guardrails(self) -> Guardrails {
        Guardrails::builder()
            .suppress_charge_at(self.suppress_charge_at)
            .suppress_discharge_at(self.suppress_discharge_at)
            .build()
    }
}
