use anyhow::Result;

use crate::argsets::PushCsvArgs;
use crate::constants::defaults;
use crate::data_mgmt::feed::{feed_csv_file, FeedOptions};
use crate::interfaces::mqtt::MqttGateway;

pub fn push_csv(args: PushCsvArgs) -> Result<()> {
    let options = FeedOptions {
        profile: args
            .profile
            .unwrap_or_else(|| defaults::NODE_PROFILE.into()),
        realtime: args.realtime,
    };
    let mut gateway = MqttGateway::from_env();
    let summary = feed_csv_file(&mut gateway, &args.node_name, &args.csv_path, &options, None)?;
    log::info!(
        "Node {}: finished {:?}; {} telemetry rows published, {} skipped, {} attributes",
        args.node_name,
        args.csv_path,
        summary.telemetry_published,
        summary.telemetry_skipped,
        summary.attributes_published
    );
    Ok(())
}
