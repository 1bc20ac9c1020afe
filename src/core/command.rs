use crate::quantity::power::Watts;

/// Monotonically increasing per-process command identifier, starting at 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, derive_more::Display)]
pub struct TransactionId(pub u64);

/// Single outbound battery command.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub transaction_id: TransactionId,
    pub instruction: Instruction,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    /// Charge with the power reference, which may be zeroed by the guardrails.
    Charge(Watts),

    /// Discharge with the power reference, which may be zeroed by the guardrails.
    Discharge(Watts),

    /// Hand the control back to the inverter.
    Auto,
}

impl Instruction {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Charge(_) => "charge",
            Self::Discharge(_) => "discharge",
            Self::Auto => "auto",
        }
    }

    pub const fn arg(self) -> Option<Watts> {
        match self {
            Self::Charge(power) | Self::Discharge(power) => Some(power),
            Self::Auto => None,
        }
    }
}
