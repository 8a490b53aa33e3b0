use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use entigen_exporter::{OrmExporter, TypeOrmExporterWithConfig};

use crate::utils::{load_config_or_default, read_model};

/// Render one model file; outside a project the default config applies.
pub fn cmd_render(file: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let config = load_config_or_default()?;
    let entity = read_model(&file)?;
    let code = TypeOrmExporterWithConfig::new(&config).render_entity(&entity);

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create parent dir {}", parent.display()))?;
            }
            fs::write(&path, &code).with_context(|| format!("write {}", path.display()))?;
            println!(
                "{} {} -> {}",
                "Rendered".bright_green(),
                entity.name,
                path.display()
            );
        }
        None => print!("{code}"),
    }
    Ok(())
}
