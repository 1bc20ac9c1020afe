use clap::Parser;
use tokio::signal;

use crate::{
    api::{CommandSink, DryRun, PriceSource},
    cli::{mqtt::MqttArgs, prices::PriceArgs, steering::SteeringArgs},
    core::{dispatcher::Dispatcher, soc::SocCell},
    prelude::*,
    quantity::percent::Percent,
    steering::Steering,
};

#[derive(Parser)]
pub struct RunArgs {
    /// Do not publish the commands, only log them (dry run).
    #[clap(long)]
    scout: bool,

    /// State of charge assumed until the first telemetry message arrives.
    #[clap(long, env = "INITIAL_STATE_OF_CHARGE", default_value = "50")]
    initial_state_of_charge: Percent,

    /// Minute of every hour when the cycle runs.
    #[clap(
        long,
        env = "TICK_MINUTE",
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..60),
    )]
    tick_minute: u32,

    #[clap(flatten)]
    prices: PriceArgs,

    #[clap(flatten)]
    steering: SteeringArgs,

    #[clap(flatten)]
    mqtt: MqttArgs,
}

impl RunArgs {
    pub async fn run(self) -> Result {
        let state_of_charge = SocCell::new(self.initial_state_of_charge);
        let (publisher, listener) = self.mqtt.connect(state_of_charge.clone());
        let listener = tokio::spawn(listener.run());

        let price_source = self.prices.new_client()?;
        let dispatcher = Dispatcher::builder()
            .state_of_charge(state_of_charge)
            .guardrails(self.steering.guardrails())
            .power_reference(self.steering.power_reference)
            .build();
        let planner = self.steering.planner();

        let result = if self.scout {
            steer(
                Steering::builder()
                    .price_source(price_source)
                    .sink(DryRun)
                    .planner(planner)
                    .dispatcher(dispatcher)
                    .tick_minute(self.tick_minute)
                    .build(),
            )
            .await
        } else {
            steer(
                Steering::builder()
                    .price_source(price_source)
                    .sink(publisher)
                    .planner(planner)
                    .dispatcher(dispatcher)
                    .tick_minute(self.tick_minute)
                    .build(),
            )
            .await
        };

        listener.abort();
        result
    }
}

/// Steer until interrupted.
async fn steer<P: PriceSource, S: CommandSink>(steering: Steering<P, S>) -> Result {
    tokio::select! {
        () = steering.run() => Ok(()),
        result = signal::ctrl_c() => {
            result.context("failed to listen for the interrupt signal")?;
            info!("interrupted");
            Ok(())
        }
    }
}
