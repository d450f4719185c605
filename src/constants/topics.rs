// ThingsBoard gateway-MQTT device-management topics.

pub const GW_CONNECT: &str = "v1/gateway/connect";
pub const GW_DISCONNECT: &str = "v1/gateway/disconnect";
pub const GW_TELEMETRY: &str = "v1/gateway/telemetry";
pub const GW_ATTRIBUTES: &str = "v1/gateway/attributes";
