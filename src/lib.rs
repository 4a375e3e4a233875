pub mod cli;
pub mod commands;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use services::config::ConfigService;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => ConfigService::default_path().map_err(anyhow::Error::msg)?,
    };
    let config = ConfigService::new(config_path);

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.get_settings().log_level
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
    log::debug!("Using settings from {}", config.path().display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(cli::dispatch::dispatch(cli.command, &config))
}
