mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use config::DashboardConfig;

fn main() -> Result<()> {
    env_logger::init();

    // Optional single argument: a JSON file overriding the built-in settings.
    let config = match std::env::args_os().nth(1) {
        Some(path) => DashboardConfig::from_json_file(&PathBuf::from(path))?,
        None => DashboardConfig::default(),
    };

    dashboard::run(&config)?;
    Ok(())
}
