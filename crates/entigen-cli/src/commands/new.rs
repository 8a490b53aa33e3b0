use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use entigen_config::FileFormat;
use entigen_core::EntityDef;

use crate::utils::{load_config, write_model};

pub fn cmd_new(
    name: String,
    table: Option<String>,
    include_timestamps: bool,
    format: Option<FileFormat>,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("entity name must not be empty");
    }

    let stem = model_file_stem(&name)?;

    let config = load_config()?;
    let dir = config.models_dir();
    if !dir.exists() {
        fs::create_dir_all(dir).context("create models directory")?;
    }

    let format = format.unwrap_or(config.model_format());
    let path = dir.join(format!("{stem}.{}", format.extension()));
    if path.exists() {
        bail!("model file already exists: {}", path.display());
    }

    let entity = EntityDef::new(name)
        .with_table_name(table.unwrap_or_default())
        .with_timestamps(include_timestamps);
    write_model(&path, &entity)?;

    println!(
        "{} {}",
        "Created model template:".bright_green(),
        path.display()
    );
    Ok(())
}

/// The entity name doubles as the model file stem, so it must be a single
/// plain path component.
fn model_file_stem(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(stem)), None)
            if stem.to_str() == Some(name) && !name.contains('\\') =>
        {
            Ok(name)
        }
        _ => bail!("entity name '{name}' cannot be used as a model file name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{
        read_model,
        test_support::{CwdGuard, write_config},
    };
    use entigen_config::EntigenConfig;
    use rstest::rstest;
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[rstest]
    #[case(None, "models/User.json")]
    #[case(Some(FileFormat::Yaml), "models/User.yaml")]
    #[case(Some(FileFormat::Yml), "models/User.yml")]
    #[serial]
    fn cmd_new_creates_model(#[case] format: Option<FileFormat>, #[case] expected: &str) {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&EntigenConfig::default());

        cmd_new("User".into(), Some("users".into()), true, format).unwrap();

        let entity = read_model(&PathBuf::from(expected)).unwrap();
        assert_eq!(entity.name, "User");
        assert_eq!(entity.table_name, "users");
        assert!(entity.include_timestamps);
        assert!(entity.properties.is_empty());
    }

    #[test]
    #[serial]
    fn cmd_new_uses_config_format_and_defaults() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&EntigenConfig {
            models_dir: PathBuf::from("defs"),
            model_format: FileFormat::Yaml,
            ..Default::default()
        });

        cmd_new("Post".into(), None, false, None).unwrap();

        let entity = read_model(&PathBuf::from("defs/Post.yaml")).unwrap();
        assert_eq!(entity.table_name, "");
        assert!(!entity.include_timestamps);
    }

    #[test]
    #[serial]
    fn cmd_new_fails_when_exists() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&EntigenConfig::default());

        cmd_new("User".into(), None, true, None).unwrap();
        let err = cmd_new("User".into(), None, true, None).unwrap_err();
        assert!(err.to_string().contains("model file already exists"));
    }

    #[test]
    #[serial]
    fn cmd_new_requires_config_and_name() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        let err = cmd_new("User".into(), None, true, None).unwrap_err();
        assert!(err.to_string().contains("not found"));

        write_config(&EntigenConfig::default());
        let err = cmd_new("  ".into(), None, true, None).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[rstest]
    #[case("../Escaped")]
    #[case("order/item")]
    #[case("order\\item")]
    #[case("..")]
    #[case(".")]
    #[case("/abs")]
    #[serial]
    fn cmd_new_rejects_path_like_names(#[case] name: &str) {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&EntigenConfig::default());

        let err = cmd_new(name.into(), None, true, None).unwrap_err();
        assert!(
            err.to_string().contains("cannot be used as a model file name"),
            "{err:#}"
        );
        assert!(!PathBuf::from("Escaped.json").exists());
        assert!(!PathBuf::from("models").exists());
    }

    #[rstest]
    #[case("Order Item")]
    #[case("order.item")]
    #[case("..hidden")]
    fn model_file_stem_accepts_plain_names(#[case] name: &str) {
        assert_eq!(model_file_stem(name).unwrap(), name);
    }
}
