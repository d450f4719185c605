use std::env;

use once_cell::sync::Lazy;
use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};

use crate::constants::{defaults, envvars, topics};
use crate::data_mgmt::models::{AttributeMap, TelemetryRecord};
use crate::helpers::rand_hex;

use super::gateway::{AckStatus, GatewayError, PublishGateway};

static GATEWAY_HOST: Lazy<String> = Lazy::new(|| {
    env::var(envvars::GATEWAY_HOST).unwrap_or_else(|_| defaults::GATEWAY_HOST.to_string())
});

static GATEWAY_PORT: Lazy<u16> = Lazy::new(|| {
    env::var(envvars::GATEWAY_PORT)
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(defaults::GATEWAY_PORT)
});

static GATEWAY_TOKEN: Lazy<Option<String>> =
    Lazy::new(|| env::var(envvars::GATEWAY_TOKEN).ok());

static GATEWAY_QOS: Lazy<QoS> = Lazy::new(|| {
    let level = env::var(envvars::GATEWAY_QOS)
        .ok()
        .and_then(|qos| qos.parse().ok())
        .unwrap_or(defaults::GATEWAY_QOS);
    match level {
        0 => QoS::AtMostOnce,
        2 => QoS::ExactlyOnce,
        _ => QoS::AtLeastOnce,
    }
});

const CLIENT_ID_PREFIX: &str = "xcom-feed";
const RAND_ID_BYTES: usize = 3;

/// ThingsBoard gateway-MQTT implementation of [`PublishGateway`].
///
/// Each publish blocks on the connection event loop until the broker
/// acknowledges the message (except at QoS 0, which has no ack).
pub struct MqttGateway {
    client: Client,
    connection: Connection,
    qos: QoS,
}

impl MqttGateway {
    /// Opens a gateway connection configured from the `GATEWAY_*` env vars.
    /// The access token, if set, is passed as the MQTT username.
    pub fn from_env() -> Self {
        let host = GATEWAY_HOST.clone();
        let port = *GATEWAY_PORT;
        let client_id = format!("{CLIENT_ID_PREFIX}-{}", rand_hex(RAND_ID_BYTES));
        log::info!("Establishing MQTT connection to {host}:{port} as {client_id}");

        let mut mqttoptions = MqttOptions::new(client_id, host, port);
        mqttoptions.set_clean_session(true);
        if let Some(token) = GATEWAY_TOKEN.as_ref() {
            mqttoptions.set_credentials(token, "");
        }

        let (client, connection) = Client::new(mqttoptions, 10);
        MqttGateway {
            client,
            connection,
            qos: *GATEWAY_QOS,
        }
    }

    fn publish_and_wait_ack(
        &mut self,
        topic: &str,
        payload: String,
    ) -> Result<AckStatus, GatewayError> {
        log::debug!("Publishing to {}: {}", topic, payload);
        self.client
            .publish(topic, self.qos, false, payload.into_bytes())?;

        if self.qos == QoS::AtMostOnce {
            // No ack at QoS 0; report optimistically.
            return Ok(AckStatus::Success);
        }

        for notification in self.connection.iter() {
            log::trace!("Notification = {:?}", notification);
            match notification {
                Ok(Event::Incoming(Packet::PubAck(_) | Packet::PubComp(_))) => {
                    return Ok(AckStatus::Success)
                }
                Err(e) => return Err(e.into()),
                _ => (),
            }
        }
        // Event loop ended without an ack for the message.
        Ok(AckStatus::Failure)
    }
}

impl PublishGateway for MqttGateway {
    fn connect_device(&mut self, node_name: &str, profile: &str) -> Result<(), GatewayError> {
        let payload = serde_json::json!({"device": node_name, "type": profile}).to_string();
        self.publish_and_wait_ack(topics::GW_CONNECT, payload)
            .map(|_| ())
    }

    fn publish_telemetry(
        &mut self,
        node_name: &str,
        record: &TelemetryRecord,
    ) -> Result<AckStatus, GatewayError> {
        let mut payload = serde_json::Map::new();
        payload.insert(node_name.to_string(), serde_json::to_value(vec![record])?);
        self.publish_and_wait_ack(topics::GW_TELEMETRY, serde_json::to_string(&payload)?)
    }

    fn publish_attributes(
        &mut self,
        node_name: &str,
        attributes: &AttributeMap,
    ) -> Result<AckStatus, GatewayError> {
        let mut payload = serde_json::Map::new();
        payload.insert(node_name.to_string(), serde_json::to_value(attributes)?);
        self.publish_and_wait_ack(topics::GW_ATTRIBUTES, serde_json::to_string(&payload)?)
    }

    fn disconnect_device(&mut self, node_name: &str) -> Result<(), GatewayError> {
        let payload = serde_json::json!({"device": node_name}).to_string();
        self.publish_and_wait_ack(topics::GW_DISCONNECT, payload)
            .map(|_| ())
    }
}
