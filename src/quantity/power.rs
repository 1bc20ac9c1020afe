use std::fmt::{Debug, Display, Formatter};

/// Power reference as the battery controller understands it.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    derive_more::FromStr,
)]
pub struct Watts(pub u32);

impl Watts {
    pub const ZERO: Self = Self(0);

    /// Bare numeric value as sent over the wire.
    #[must_use]
    pub fn to_wire(self) -> String {
        self.0.to_string()
    }
}

impl Display for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} W", self.0)
    }
}

impl Debug for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}W", self.0)
    }
}
