use thiserror::Error;

use crate::data_mgmt::models::{AttributeMap, TelemetryRecord};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    MqttClient(#[from] rumqttc::ClientError),
    #[error(transparent)]
    MqttConnection(#[from] rumqttc::ConnectionError),
    #[error(transparent)]
    Payload(#[from] serde_json::Error),
}

/// Publish acknowledgment from the gateway. A failure ack is logged by the
/// caller but is not an error; only call-level failures are `GatewayError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AckStatus {
    Success,
    Failure,
}

impl AckStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, AckStatus::Success)
    }
}

/// Device-management operations of the IoT-platform gateway.
///
/// The feed driver holds this as an injected capability, so tests can
/// substitute a recording mock for the real MQTT client.
pub trait PublishGateway {
    /// Registers a logical device under a profile name. Idempotent.
    fn connect_device(&mut self, node_name: &str, profile: &str) -> Result<(), GatewayError>;

    fn publish_telemetry(
        &mut self,
        node_name: &str,
        record: &TelemetryRecord,
    ) -> Result<AckStatus, GatewayError>;

    fn publish_attributes(
        &mut self,
        node_name: &str,
        attributes: &AttributeMap,
    ) -> Result<AckStatus, GatewayError>;

    fn disconnect_device(&mut self, node_name: &str) -> Result<(), GatewayError>;
}
