use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use entigen_config::EntigenConfig;

use crate::utils::CONFIG_FILE;

pub fn cmd_init() -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE);
    if path.exists() {
        bail!("{CONFIG_FILE} already exists");
    }

    let config = EntigenConfig::default();
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).context("write entigen.json")?;
    println!("{} {}", "Created".bright_green(), path.display());
    Ok(())
}
