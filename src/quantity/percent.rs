use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use crate::prelude::*;

/// Percentage in `[0, 100]`.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    pub const HUNDRED: Self = Self(100.0);
    pub const ZERO: Self = Self(0.0);

    /// Returns [`None`] for anything outside `[0, 100]`, including `NaN`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=100.0).contains(&value).then_some(Self(value))
    }

    /// Clamp into `[0, 100]`.
    pub const fn saturating(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl FromStr for Percent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().trim_end_matches('%').parse::<f64>()?;
        Self::new(value).with_context(|| format!("{value} is outside of [0, 100]"))
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
