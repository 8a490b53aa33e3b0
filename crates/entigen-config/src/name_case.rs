#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported naming cases for generated file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum NameCase {
    Snake,
    Kebab,
    Camel,
    Pascal,
}

impl NameCase {
    /// Returns true when snake case.
    pub fn is_snake(self) -> bool {
        matches!(self, NameCase::Snake)
    }

    /// Returns true when kebab case.
    pub fn is_kebab(self) -> bool {
        matches!(self, NameCase::Kebab)
    }

    /// Returns true when camel case.
    pub fn is_camel(self) -> bool {
        matches!(self, NameCase::Camel)
    }

    /// Returns true when pascal case.
    pub fn is_pascal(self) -> bool {
        matches!(self, NameCase::Pascal)
    }

    /// Convert `name` into this case.
    pub fn apply(self, name: &str) -> String {
        match self {
            NameCase::Snake => entigen_naming::to_snake_case(name),
            NameCase::Kebab => entigen_naming::to_kebab_case(name),
            NameCase::Camel => entigen_naming::to_camel_case(name),
            NameCase::Pascal => entigen_naming::to_pascal_case(name),
        }
    }
}
