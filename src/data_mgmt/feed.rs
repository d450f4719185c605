use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::constants::defaults;
use crate::helpers::now_epoch_millis;
use crate::interfaces::gateway::{GatewayError, PublishGateway};
use crate::readers::xcom_csv::{self, parse, CsvFileError, RawRow};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    File(#[from] CsvFileError),
    #[error("gateway session error: {0}")]
    Session(GatewayError),
}

#[derive(Debug)]
pub struct FeedOptions {
    pub profile: String,
    /// Publish with wall-clock timestamps and pace the feed like a live
    /// device instead of replaying the file's own timestamps.
    pub realtime: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        FeedOptions {
            profile: defaults::NODE_PROFILE.into(),
            realtime: false,
        }
    }
}

/// Outcome counts for one file run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub telemetry_published: usize,
    pub telemetry_skipped: usize,
    pub attributes_published: usize,
}

/// Pushes one CSV log file to the gateway as device `node_name`.
///
/// Telemetry rows go out one by one in file order; a row-level parse or
/// publish failure is logged and skipped without aborting the run. The
/// attribute window is folded into a single mapping and published once, after
/// all telemetry. File-shape and session (connect/disconnect) failures abort
/// the whole run.
///
/// In realtime mode the run ends with a fixed pacing pause, cut short if the
/// `stop` channel fires or closes.
pub fn feed_csv_file(
    gateway: &mut impl PublishGateway,
    node_name: &str,
    path: &Path,
    options: &FeedOptions,
    stop: Option<&flume::Receiver<()>>,
) -> Result<FeedSummary, FeedError> {
    let file = xcom_csv::load_file(path)?;
    log::info!(
        "Node {}: loaded {:?} with {} telemetry and {} attribute rows",
        node_name,
        path,
        file.telemetry_rows.len(),
        file.attribute_rows.len()
    );

    gateway
        .connect_device(node_name, &options.profile)
        .map_err(FeedError::Session)?;

    let mut summary = FeedSummary::default();

    for (offset, row) in file.telemetry_rows.iter().enumerate() {
        // Physical line number in the file, counting the three header rows.
        let line_num = offset + 4;
        if publish_telemetry_row(gateway, node_name, row, &file.fieldnames, options, line_num) {
            summary.telemetry_published += 1;
        } else {
            summary.telemetry_skipped += 1;
        }
    }

    let attributes = parse::accumulate_attributes(&file.attribute_rows);
    match gateway.publish_attributes(node_name, &attributes) {
        Ok(ack) => {
            summary.attributes_published = attributes.len();
            log::info!(
                "Node {}: published {} attributes, ack success: {}",
                node_name,
                attributes.len(),
                ack.is_success()
            );
        }
        Err(e) => log::error!("Node {}: attribute publish failed: {}", node_name, e),
    }

    gateway
        .disconnect_device(node_name)
        .map_err(FeedError::Session)?;

    if options.realtime {
        pacing_pause(defaults::REALTIME_FEED_PAUSE, stop);
    }

    Ok(summary)
}

fn publish_telemetry_row(
    gateway: &mut impl PublishGateway,
    node_name: &str,
    row: &RawRow,
    fieldnames: &[String],
    options: &FeedOptions,
    line_num: usize,
) -> bool {
    let mut record = match parse::telemetry_record(row, fieldnames) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("Node {}: skipping row {}: {}", node_name, line_num, e);
            return false;
        }
    };
    if options.realtime {
        // The file timestamp only validated the row shape; feed wall clock.
        record.ts = now_epoch_millis();
    }
    match gateway.publish_telemetry(node_name, &record) {
        Ok(ack) => {
            log::info!(
                "Node {}: row {} ts {} published, ack success: {}",
                node_name,
                line_num,
                record.ts,
                ack.is_success()
            );
            true
        }
        Err(e) => {
            log::error!(
                "Node {}: telemetry publish failed for row {}: {}",
                node_name,
                line_num,
                e
            );
            false
        }
    }
}

// Abortable sleep: a fired or closed stop channel cuts the pause short.
fn pacing_pause(pause: Duration, stop: Option<&flume::Receiver<()>>) {
    let Some(rx) = stop else {
        std::thread::sleep(pause);
        return;
    };
    match rx.recv_timeout(pause) {
        Err(flume::RecvTimeoutError::Timeout) => (),
        _ => log::info!("Realtime pacing pause interrupted"),
    }
}
