use std::fmt::{Display, Formatter};

use comfy_table::Color;

/// What the battery is supposed to do during a slot.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Behavior {
    /// Let the inverter decide.
    #[default]
    Auto,

    /// Forced charging from the grid.
    Charge,

    /// Forced discharging, no matter the actual consumption.
    Discharge,
}

impl Display for Behavior {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}

impl Behavior {
    pub const fn color(self) -> Color {
        match self {
            Self::Charge => Color::Green,
            Self::Discharge => Color::Blue,
            Self::Auto => Color::Reset,
        }
    }
}
