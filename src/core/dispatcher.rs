use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use bon::Builder;

use crate::{
    core::{
        behavior::Behavior,
        command::{Command, Instruction, TransactionId},
        guardrails::Guardrails,
        plan::BehaviorPlan,
        soc::SocCell,
    },
    prelude::*,
    quantity::power::Watts,
};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("hour #{hour} is outside of the plan of {len} slots")]
    IndexOutOfRange { hour: usize, len: usize },
}

/// Turns the planned behavior of the current hour and the latest SOC into a command.
#[must_use]
#[derive(Builder)]
pub struct Dispatcher {
    state_of_charge: SocCell,

    #[builder(default)]
    guardrails: Guardrails,

    /// Nominal power reference for both directions.
    power_reference: Watts,

    #[builder(skip)]
    last_transaction_id: AtomicU64,

    /// Last dispatched behavior. Write-only as far as the decisions are concerned.
    #[builder(skip)]
    current_status: Mutex<Option<Behavior>>,
}

impl Dispatcher {
    #[instrument(skip_all, fields(hour = hour))]
    pub fn dispatch(&self, plan: &BehaviorPlan, hour: usize) -> Result<Command, DispatchError> {
        let planned =
            plan.get(hour).ok_or(DispatchError::IndexOutOfRange { hour, len: plan.len() })?;

        let state_of_charge = self.state_of_charge.get();
        let references = self.guardrails.apply(state_of_charge, self.power_reference);
        let instruction = match planned.behavior {
            Behavior::Charge => Instruction::Charge(references.charge),
            Behavior::Discharge => Instruction::Discharge(references.discharge),
            Behavior::Auto => Instruction::Auto,
        };

        let transaction_id =
            TransactionId(self.last_transaction_id.fetch_add(1, Ordering::Relaxed) + 1);
        if let Ok(mut current_status) = self.current_status.lock() {
            *current_status = Some(planned.behavior);
        }
        info!(
            %transaction_id,
            slot = %planned.slot,
            behavior = %planned.behavior,
            ?state_of_charge,
            name = instruction.name(),
            arg = ?instruction.arg(),
            "dispatched",
        );
        Ok(Command { transaction_id, instruction })
    }

    /// Behavior of the last dispatched command, if any.
    pub fn current_status(&self) -> Option<Behavior> {
        self.current_status.lock().ok().and_then(|current_status| *current_status)
    }
}
