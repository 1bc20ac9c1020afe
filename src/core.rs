pub mod behavior;
pub mod command;
pub mod dispatcher;
pub mod guardrails;
pub mod plan;
pub mod planner;
pub mod slot;
pub mod soc;
pub mod telemetry;
