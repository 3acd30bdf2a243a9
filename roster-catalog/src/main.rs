mod config;

use crate::config::Config;
use anyhow::{Context, Result};
use log::LevelFilter;
use roster::{Connection, catalog};
use roster_sqlite::SqliteConnection;
use std::{env, io};

fn init_logs() {
    let mut logger = env_logger::builder();
    logger.format_file(true).format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logs();
    let config = Config::from_env();
    log::debug!("{:?}", config);
    let mut connection = SqliteConnection::connect(&config.database_url)
        .await
        .with_context(|| format!("Could not open `{}`", config.database_url))?;
    let mut out = io::stdout().lock();
    catalog::run_script(&mut connection, &mut out).await
}
