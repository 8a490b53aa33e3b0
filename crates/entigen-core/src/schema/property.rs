use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::data_type::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPropertyError {
    #[error("property name must not be empty")]
    EmptyName,
    #[error("property data type must not be empty")]
    EmptyDataType,
    #[error("unknown data type '{0}'")]
    UnknownDataType(String),
}

/// Opaque identity of a property inside an entity's property list.
///
/// Only used to address a property when editing the list; it never affects
/// rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PropertyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One field definition within an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    #[serde(default = "PropertyId::generate")]
    pub id: PropertyId,
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub allow_null: bool,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl PropertyDef {
    /// Create a property with a fresh id and every flag unset.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Result<Self, InvalidPropertyError> {
        let property = Self {
            id: PropertyId::generate(),
            name: name.into(),
            data_type,
            default_value: None,
            length: None,
            is_optional: false,
            is_unique: false,
            allow_null: false,
            is_primary_key: false,
        };
        property.validate()?;
        Ok(property)
    }

    /// Like [`PropertyDef::new`], taking the data type as its raw token.
    pub fn parse(name: impl Into<String>, data_type: &str) -> Result<Self, InvalidPropertyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidPropertyError::EmptyName);
        }
        Self::new(name, data_type.parse()?)
    }

    pub fn with_id(mut self, id: impl Into<PropertyId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Acceptance rule for the property list.
    pub fn validate(&self) -> Result<(), InvalidPropertyError> {
        if self.name.is_empty() {
            return Err(InvalidPropertyError::EmptyName);
        }
        Ok(())
    }

    /// Whether the field type gets the `?` marker.
    pub fn is_nullable(&self) -> bool {
        self.is_optional || self.allow_null
    }

    /// Default value, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }

    /// Column length, treating an empty string as absent.
    pub fn length(&self) -> Option<&str> {
        self.length.as_deref().filter(|v| !v.is_empty())
    }
}

/// Partial update merged into an existing property.
///
/// `None` keeps the current value. An empty `default_value` or `length`
/// clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub data_type: Option<DataType>,
    pub default_value: Option<String>,
    pub length: Option<String>,
    pub is_optional: Option<bool>,
    pub is_unique: Option<bool>,
    pub allow_null: Option<bool>,
    pub is_primary_key: Option<bool>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `target`; the id is never changed.
    pub fn apply_to(&self, target: &mut PropertyDef) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(data_type) = self.data_type {
            target.data_type = data_type;
        }
        if let Some(value) = &self.default_value {
            target.default_value = Some(value.clone()).filter(|v| !v.is_empty());
        }
        if let Some(length) = &self.length {
            target.length = Some(length.clone()).filter(|v| !v.is_empty());
        }
        if let Some(flag) = self.is_optional {
            target.is_optional = flag;
        }
        if let Some(flag) = self.is_unique {
            target.is_unique = flag;
        }
        if let Some(flag) = self.allow_null {
            target.allow_null = flag;
        }
        if let Some(flag) = self.is_primary_key {
            target.is_primary_key = flag;
        }
    }
}
