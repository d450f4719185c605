use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

use xcom_feed::constants::{defaults, envvars};
use xcom_feed::{argsets, command};

const CMD_PUSH_CSV: &str = "push-csv";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(
        Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL),
    )
    .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_PUSH_CSV) => command::push_csv(argsets::PushCsvArgs {
            realtime: args.contains("--realtime"),
            profile: args.opt_value_from_str("--profile")?,
            node_name: args.free_from_str()?,
            csv_path: args.free_from_str()?,
        }),
        _ => Err(anyhow!("Subcommand must be 'push-csv'")),
    }
}
