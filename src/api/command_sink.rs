use async_trait::async_trait;

use crate::{core::command::Command, prelude::*};

#[async_trait]
pub trait CommandSink: Sync {
    /// Fire-and-forget the command.
    async fn publish(&self, command: &Command) -> Result;
}

/// Sink that only logs the commands.
pub struct DryRun;

#[async_trait]
impl CommandSink for DryRun {
    async fn publish(&self, command: &Command) -> Result {
        warn!(
            transaction_id = %command.transaction_id,
            name = command.instruction.name(),
            arg = ?command.instruction.arg(),
            "scouting, not publishing",
        );
        Ok(())
    }
}
