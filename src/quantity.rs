pub mod percent;
pub mod power;
pub mod rate;
