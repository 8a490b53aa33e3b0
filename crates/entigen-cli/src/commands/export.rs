use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use entigen_config::EntigenConfig;
use entigen_core::EntityDef;
use entigen_exporter::{OrmExporter, TypeOrmExporterWithConfig};
use futures::future::try_join_all;
use tokio::fs;
use tracing::{debug, info};

use crate::utils::{load_config, model_format, parse_model};

pub async fn cmd_export(export_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let models = load_models_recursive(config.models_dir())
        .await
        .context("load models recursively")?;

    let target_root = resolve_export_dir(export_dir, &config);
    let exporter = TypeOrmExporterWithConfig::new(&config);

    // Render and check output paths before touching the export directory
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut entities: Vec<(String, PathBuf, String)> = Vec::with_capacity(models.len());
    for (entity, rel_path) in &models {
        let out_path = build_output_path(&target_root, rel_path, &config, entity);
        if let Some(previous) = seen.insert(out_path.clone(), rel_path) {
            bail!(
                "models {} and {} both export to {}",
                previous.display(),
                rel_path.display(),
                out_path.display()
            );
        }
        entities.push((
            entity.name.clone(),
            out_path,
            exporter.render_entity(entity),
        ));
    }

    clean_export_dir(&target_root, config.file_suffix()).await?;

    if !target_root.exists() {
        fs::create_dir_all(&target_root)
            .await
            .with_context(|| format!("create export dir {}", target_root.display()))?;
    }

    let write_futures: Vec<_> = entities
        .iter()
        .map(|(name, out_path, code)| async move {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("create parent dir {}", parent.display()))?;
            }
            fs::write(out_path, code)
                .await
                .with_context(|| format!("write {}", out_path.display()))?;
            println!(
                "{} {} -> {}",
                "Exported".bright_green(),
                name,
                out_path.display()
            );
            Ok::<(), anyhow::Error>(())
        })
        .collect();

    try_join_all(write_futures).await?;
    info!(count = entities.len(), dir = %target_root.display(), "export finished");

    Ok(())
}

fn resolve_export_dir(export_dir: Option<PathBuf>, config: &EntigenConfig) -> PathBuf {
    export_dir.unwrap_or_else(|| config.export_dir().to_path_buf())
}

/// Remove previously generated entity files so renamed or deleted models
/// leave nothing behind.
async fn clean_export_dir(root: &Path, suffix: &str) -> Result<()> {
    if !root.exists() || suffix.is_empty() {
        return Ok(());
    }
    clean_dir_recursive(root, suffix).await
}

/// Recursively remove files ending in `suffix` and the directories left empty.
#[async_recursion::async_recursion]
async fn clean_dir_recursive(dir: &Path, suffix: &str) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("read dir {}", dir.display()))?;

    let mut subdirs = Vec::new();
    let mut files_to_remove = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            files_to_remove.push(path);
        }
    }

    let remove_futures: Vec<_> = files_to_remove
        .into_iter()
        .map(|path| async move {
            debug!(file = %path.display(), "removing stale export");
            fs::remove_file(&path)
                .await
                .with_context(|| format!("remove file {}", path.display()))
        })
        .collect();

    try_join_all(remove_futures).await?;

    let subdir_futures: Vec<_> = subdirs
        .iter()
        .map(|subdir| clean_dir_recursive(subdir, suffix))
        .collect();

    try_join_all(subdir_futures).await?;

    for subdir in subdirs {
        let mut entries = fs::read_dir(&subdir).await?;
        if entries.next_entry().await?.is_none() {
            fs::remove_dir(&subdir)
                .await
                .with_context(|| format!("remove empty dir {}", subdir.display()))?;
        }
    }

    Ok(())
}

/// `<root>/<model subdirectory>/<entity file name>`.
fn build_output_path(
    root: &Path,
    rel_path: &Path,
    config: &EntigenConfig,
    entity: &EntityDef,
) -> PathBuf {
    let mut out = root.to_path_buf();
    if let Some(parent) = rel_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        out.push(parent);
    }
    out.push(config.entity_file_name(&entity.name));
    out
}

async fn load_models_recursive(base: &Path) -> Result<Vec<(EntityDef, PathBuf)>> {
    let mut out = Vec::new();
    if !base.exists() {
        return Ok(out);
    }
    walk_models(base, base, &mut out).await?;
    // read_dir order is platform dependent
    out.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(out)
}

#[async_recursion::async_recursion]
async fn walk_models(
    root: &Path,
    current: &Path,
    acc: &mut Vec<(EntityDef, PathBuf)>,
) -> Result<()> {
    let mut entries = fs::read_dir(current)
        .await
        .with_context(|| format!("read {}", current.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            walk_models(root, &path, acc).await?;
            continue;
        }
        let Some(format) = model_format(&path) else {
            continue;
        };
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("read model file: {}", path.display()))?;
        let entity = parse_model(&path, format, &content)?;
        debug!(entity = %entity.name, file = %path.display(), "loaded model");
        let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        acc.push((entity, rel));
    }
    Ok(())
}
