mod mqtt;
mod plan;
mod prices;
mod run;
mod steering;

use clap::{Parser, Subcommand};

pub use self::{plan::PlanArgs, run::RunArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: plan the day and steer the battery every hour.
    #[clap(name = "run")]
    Run(Box<RunArgs>),

    /// Fetch the prices and show the plan without touching the battery.
    #[clap(name = "plan")]
    Plan(PlanArgs),
}
