mod commands;

use annotext_config::Config;
use anyhow::{Context, Result};
use std::{env, process};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match commands::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", commands::USAGE);
            process::exit(2);
        }
    };

    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_from_path(&config_path)
        .context("Failed to load config file")?
        .unwrap_or_default();

    let output = commands::run(command, &config)?;
    println!("{output}");
    Ok(())
}
