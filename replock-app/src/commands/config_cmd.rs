use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;

pub async fn show_config() -> Result<()> {
    let config = Config::load()?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;

    println!("Config file: {}", Config::config_file()?.display());
    println!();
    println!("{rendered}");

    Ok(())
}

pub async fn init_config(force: bool) -> Result<()> {
    let config_file = Config::config_file()?;

    if config_file.exists() && !force {
        println!(
            "{} config already exists at {} (use --force to overwrite)",
            "Note:".yellow().bold(),
            config_file.display()
        );
        return Ok(());
    }

    Config::default().save()?;
    println!("Wrote default config to {}", config_file.display());

    Ok(())
}
