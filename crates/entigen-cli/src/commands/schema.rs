use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use entigen_config::EntigenConfig;
use entigen_core::EntityDef;
use schemars::schema_for;

/// Write JSON Schemas for entity models and entigen.json into `out`.
pub fn cmd_schema(out: PathBuf) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let model_schema = schema_for!(EntityDef);
    let config_schema = schema_for!(EntigenConfig);

    let model_path = out.join("model.schema.json");
    let config_path = out.join("config.schema.json");

    fs::write(
        &model_path,
        serde_json::to_string_pretty(&model_schema).context("serialize model schema")?,
    )
    .with_context(|| format!("write {}", model_path.display()))?;

    fs::write(
        &config_path,
        serde_json::to_string_pretty(&config_schema).context("serialize config schema")?,
    )
    .with_context(|| format!("write {}", config_path.display()))?;

    println!("{}", "Wrote schemas:".bright_green());
    println!("  {}", model_path.display());
    println!("  {}", config_path.display());
    Ok(())
}
