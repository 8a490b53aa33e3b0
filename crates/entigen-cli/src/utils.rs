use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use entigen_config::{EntigenConfig, FileFormat};
use entigen_core::EntityDef;
use serde_json::Value;
use tracing::debug;

pub const CONFIG_FILE: &str = "entigen.json";

/// Load entigen.json config from current directory.
pub fn load_config() -> Result<EntigenConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.exists() {
        bail!("{CONFIG_FILE} not found. Run 'entigen init' first.");
    }

    let content = fs::read_to_string(&path).context("read entigen.json")?;
    let config: EntigenConfig = serde_json::from_str(&content).context("parse entigen.json")?;
    debug!(models_dir = %config.models_dir().display(), "loaded config");
    Ok(config)
}

/// Like [`load_config`], but falls back to defaults outside an entigen project.
pub fn load_config_or_default() -> Result<EntigenConfig> {
    if Path::new(CONFIG_FILE).exists() {
        load_config()
    } else {
        Ok(EntigenConfig::default())
    }
}

/// Format of a model file, from its extension.
pub fn model_format(path: &Path) -> Option<FileFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileFormat::from_extension)
}

/// Locate a model by file path or by name inside the models directory.
pub fn find_model(config: &EntigenConfig, key: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(key);
    if direct.is_file() && model_format(&direct).is_some() {
        return Ok(direct);
    }

    let dir = config.models_dir();
    for format in [FileFormat::Json, FileFormat::Yaml, FileFormat::Yml] {
        let candidate = dir.join(format!("{key}.{}", format.extension()));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    bail!("model '{}' not found in {}", key, dir.display());
}

/// Parse and validate one model file.
pub fn read_model(path: &Path) -> Result<EntityDef> {
    let format = model_format(path)
        .with_context(|| format!("unsupported model file: {}", path.display()))?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("read model file: {}", path.display()))?;
    parse_model(path, format, &content)
}

pub fn parse_model(path: &Path, format: FileFormat, content: &str) -> Result<EntityDef> {
    let entity: EntityDef = match format {
        FileFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("parse JSON model: {}", path.display()))?,
        FileFormat::Yaml | FileFormat::Yml => serde_yaml::from_str(content)
            .with_context(|| format!("parse YAML model: {}", path.display()))?,
    };
    entity
        .validate()
        .with_context(|| format!("invalid model: {}", path.display()))?;
    Ok(entity)
}

/// Serialize a model in the format implied by its extension.
pub fn write_model(path: &Path, entity: &EntityDef) -> Result<()> {
    let format = model_format(path)
        .with_context(|| format!("unsupported model file: {}", path.display()))?;
    let schema_url = schema_url();

    let text = match format {
        FileFormat::Json => {
            let mut value = serde_json::to_value(entity).context("serialize entity to json")?;
            if let (Some(url), Value::Object(map)) = (&schema_url, &mut value) {
                map.insert("$schema".to_string(), Value::String(url.clone()));
            }
            serde_json::to_string_pretty(&value).context("stringify json model")?
        }
        FileFormat::Yaml | FileFormat::Yml => {
            let mut value = serde_yaml::to_value(entity).context("serialize entity to yaml")?;
            if let (Some(url), serde_yaml::Value::Mapping(map)) = (&schema_url, &mut value) {
                map.insert(
                    serde_yaml::Value::String("$schema".to_string()),
                    serde_yaml::Value::String(url.clone()),
                );
            }
            serde_yaml::to_string(&value).context("stringify yaml model")?
        }
    };
    fs::write(path, text).with_context(|| format!("write file: {}", path.display()))?;
    Ok(())
}

/// `$schema` reference for written models, set through `ENTIGEN_SCHEMA_BASE_URL`.
fn schema_url() -> Option<String> {
    let base = std::env::var("ENTIGEN_SCHEMA_BASE_URL").ok()?;
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    Some(format!("{base}/model.schema.json"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::env;
    use std::path::{Path, PathBuf};

    use entigen_config::EntigenConfig;

    pub struct CwdGuard {
        original: PathBuf,
    }

    impl CwdGuard {
        pub fn new(dir: &Path) -> Self {
            let original = env::current_dir().unwrap();
            env::set_current_dir(dir).unwrap();
            Self { original }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.original);
        }
    }

    pub fn write_config(config: &EntigenConfig) {
        let text = serde_json::to_string_pretty(config).unwrap();
        std::fs::write(super::CONFIG_FILE, text).unwrap();
    }
}
