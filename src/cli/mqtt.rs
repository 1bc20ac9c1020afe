use std::time::Duration;

use clap::Parser;
use rumqttc::MqttOptions;

use crate::{api::mqtt, core::soc::SocCell};

#[derive(Parser)]
pub struct MqttArgs {
    /// MQTT broker host name or IP address.
    #[clap(long = "mqtt-host", env = "MQTT_IP")]
    host: String,

    #[clap(long = "mqtt-port", env = "MQTT_PORT", default_value = "1883")]
    port: u16,

    #[clap(long = "mqtt-username", env = "MQTT_USERNAME")]
    username: Option<String>,

    #[clap(long = "mqtt-password", env = "MQTT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[clap(long = "mqtt-client-id", env = "MQTT_CLIENT_ID", default_value = "elstyr")]
    client_id: String,

    /// Topic to publish the commands to.
    #[clap(long, env = "COMMAND_TOPIC", default_value = "battery/command")]
    command_topic: String,

    /// Topic (or filter) to receive the battery telemetry from.
    #[clap(long, env = "TELEMETRY_TOPIC", default_value = "battery/telemetry")]
    telemetry_topic: String,
}

impl MqttArgs {
    pub fn connect(self, state_of_charge: SocCell) -> (mqtt::Publisher, mqtt::Listener) {
        let mut options = MqttOptions::new(self.client_id, self.host, self.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let Some(username) = self.username {
            options.set_credentials(username, self.password.unwrap_or_default());
        }
        mqtt::connect(options, self.command_topic, self.telemetry_topic, state_of_charge)
    }
}
