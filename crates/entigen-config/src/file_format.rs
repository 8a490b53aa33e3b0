#[cfg(feature = "cli")]
use clap::ValueEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported file formats for entity model files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Yaml,
    Yml,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Yml => "yml",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(FileFormat::Json),
            "yaml" => Some(FileFormat::Yaml),
            "yml" => Some(FileFormat::Yml),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileFormat;

    #[test]
    fn default_is_json() {
        assert_eq!(FileFormat::default(), FileFormat::Json);
    }

    #[test]
    fn extension_round_trips() {
        for format in [FileFormat::Json, FileFormat::Yaml, FileFormat::Yml] {
            assert_eq!(FileFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(FileFormat::from_extension("ts"), None);
    }
}
