use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::quantity::percent::Percent;

/// Latest known battery state of charge, shared between the telemetry listener and the dispatcher.
///
/// Stored as the bit pattern of an `f64`, so that a reader always sees a complete value and
/// neither side ever waits for the other.
#[must_use]
#[derive(Clone)]
pub struct SocCell(Arc<AtomicU64>);

impl SocCell {
    pub fn new(initial: Percent) -> Self {
        Self(Arc::new(AtomicU64::new(initial.get().to_bits())))
    }

    pub fn get(&self) -> Percent {
        Percent::saturating(f64::from_bits(self.0.load(Ordering::Relaxed)))
    }

    pub fn set(&self, state_of_charge: Percent) {
        self.0.store(state_of_charge.get().to_bits(), Ordering::Relaxed);
    }
}
