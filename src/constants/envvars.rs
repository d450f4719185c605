pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const GATEWAY_HOST: &str = "GATEWAY_HOST";
pub const GATEWAY_PORT: &str = "GATEWAY_PORT";
pub const GATEWAY_TOKEN: &str = "GATEWAY_TOKEN";
pub const GATEWAY_QOS: &str = "GATEWAY_QOS";
