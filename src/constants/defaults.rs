use std::time::Duration;

pub const LOG_LEVEL: &str = "info";

pub const GATEWAY_HOST: &str = "localhost";
pub const GATEWAY_PORT: u16 = 1883;
pub const GATEWAY_QOS: u8 = 1;

pub const NODE_PROFILE: &str = "Studer Xcom-LAN Node";

pub const REALTIME_FEED_PAUSE: Duration = Duration::from_secs(60);
