//! Configuration management command
//!
//! Shows where the config file lives and what it resolves to.

use crate::config;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Show all configuration values
pub async fn run_show() -> Result<()> {
    let config = config::load()?;
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "trprune Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    let unset = || "(unset)".dimmed().to_string();

    println!("{}", "[cluster]".yellow());
    println!(
        "  {} = {}",
        "kubeconfig".cyan(),
        config
            .cluster
            .kubeconfig
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  {} = {}",
        "context".cyan(),
        config.cluster.context.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} = {}",
        "namespace".cyan(),
        config.cluster.namespace.clone().unwrap_or_else(unset)
    );
    println!("  {} = {}", "api_version".cyan(), config.cluster.api_version);

    println!("\n{}", "[delete]".yellow());
    println!("  {} = {}", "force".cyan(), config.delete.force);

    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        std::fs::write(&config_path, config::example_config())
            .context("Failed to write config file")?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}
