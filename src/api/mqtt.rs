//! MQTT transport: publishing the commands and listening to the battery telemetry.

use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde::Serialize;
use tokio::time::sleep;

use crate::{
    api::CommandSink,
    core::{command::Command, soc::SocCell, telemetry::parse_state_of_charge},
    prelude::*,
};

const REQUEST_CHANNEL_CAPACITY: usize = 16;
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Create the client halves. Nothing is sent until the [`Listener`] starts polling.
pub fn connect(
    options: MqttOptions,
    command_topic: String,
    telemetry_topic: String,
    state_of_charge: SocCell,
) -> (Publisher, Listener) {
    let (client, event_loop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);
    let publisher = Publisher { client: client.clone(), topic: command_topic };
    let listener = Listener { client, event_loop, topic: telemetry_topic, state_of_charge };
    (publisher, listener)
}

pub struct Publisher {
    client: AsyncClient,
    topic: String,
}

#[async_trait]
impl CommandSink for Publisher {
    #[instrument(skip_all, fields(topic = %self.topic, transaction_id = %command.transaction_id))]
    async fn publish(&self, command: &Command) -> Result {
        let payload = serde_json::to_vec(&Payload::from(command))?;
        self.client
            .publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload)
            .await
            .context("failed to enqueue the command")?;
        info!("published");
        Ok(())
    }
}

/// Drives the MQTT event loop and feeds the state of charge into the shared cell.
pub struct Listener {
    client: AsyncClient,
    event_loop: EventLoop,
    topic: String,
    state_of_charge: SocCell,
}

impl Listener {
    /// Poll forever, reconnecting on errors.
    #[instrument(skip_all, fields(topic = %self.topic))]
    pub async fn run(mut self) {
        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    // The session is not persistent, so subscribe on every connection:
                    info!("connected, subscribing…");
                    if let Err(error) =
                        self.client.try_subscribe(self.topic.as_str(), QoS::AtMostOnce)
                    {
                        warn!("failed to subscribe: {error:#}");
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    self.ingest(&publish.payload);
                }
                Ok(_) => {}
                Err(error) => {
                    warn!("connection error, reconnecting in {RECONNECT_DELAY:?}: {error:#}");
                    sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }

    fn ingest(&self, payload: &[u8]) {
        if let Some(state_of_charge) = parse_state_of_charge(payload) {
            self.state_of_charge.set(state_of_charge);
            info!(?state_of_charge, "updated");
        }
    }
}

#[derive(Serialize)]
struct Payload {
    #[serde(rename = "transId")]
    transaction_id: String,

    #[serde(rename = "cmd")]
    instruction: InstructionPayload,
}

#[derive(Serialize)]
struct InstructionPayload {
    name: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
}

impl From<&Command> for Payload {
    fn from(command: &Command) -> Self {
        Self {
            transaction_id: command.transaction_id.to_string(),
            instruction: InstructionPayload {
                name: command.instruction.name(),
                arg: command.instruction.arg().map(|power| power.to_wire()),
            },
        }
    }
}
