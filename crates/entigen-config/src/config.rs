use std::path::{Path, PathBuf};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::file_format::FileFormat;
use crate::name_case::NameCase;

/// Suffix appended to generated entity file names.
pub fn default_file_suffix() -> String {
    ".entity.ts".to_string()
}

/// How an empty `tableName` is resolved before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum TableNameFallback {
    /// Keep the empty table name (renders `@Entity('')`).
    #[default]
    Verbatim,
    /// Use the entity name as written.
    EntityName,
    /// Use the snake_cased entity name.
    SnakeCase,
}

impl TableNameFallback {
    /// Resolve the table name of an entity. A non-empty `table_name` always wins.
    pub fn resolve(self, entity_name: &str, table_name: &str) -> String {
        if !table_name.is_empty() {
            return table_name.to_string();
        }
        match self {
            TableNameFallback::Verbatim => String::new(),
            TableNameFallback::EntityName => entity_name.to_string(),
            TableNameFallback::SnakeCase => entigen_naming::to_snake_case(entity_name),
        }
    }
}

/// Top-level entigen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct EntigenConfig {
    pub models_dir: PathBuf,
    /// Output directory for generated entity classes.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    #[serde(default)]
    pub model_format: FileFormat,
    #[serde(default = "default_file_naming_case")]
    pub file_naming_case: NameCase,
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
    #[serde(default)]
    pub table_name_fallback: TableNameFallback,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("src/entities")
}

fn default_file_naming_case() -> NameCase {
    NameCase::Kebab
}

impl Default for EntigenConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            export_dir: default_export_dir(),
            model_format: FileFormat::Json,
            file_naming_case: default_file_naming_case(),
            file_suffix: default_file_suffix(),
            table_name_fallback: TableNameFallback::Verbatim,
        }
    }
}

impl EntigenConfig {
    /// Path where entity model files are stored.
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Output directory for generated entity classes.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Preferred file format for new models.
    pub fn model_format(&self) -> FileFormat {
        self.model_format
    }

    pub fn file_case(&self) -> NameCase {
        self.file_naming_case
    }

    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    pub fn table_name_fallback(&self) -> TableNameFallback {
        self.table_name_fallback
    }

    /// File name of the generated class for an entity, e.g. `blog-post.entity.ts`.
    pub fn entity_file_name(&self, entity_name: &str) -> String {
        let stem = self.file_naming_case.apply(entity_name);
        let stem = if stem.is_empty() { "entity" } else { &stem };
        format!("{}{}", stem, self.file_suffix)
    }
}
