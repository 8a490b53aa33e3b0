#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::property::{InvalidPropertyError, PropertyDef, PropertyId, PropertyPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("property '{0}' not found")]
    PropertyNotFound(String),
    #[error("duplicate property id: {0}")]
    DuplicatePropertyId(PropertyId),
    #[error("invalid property '{name}': {source}")]
    InvalidProperty {
        name: String,
        #[source]
        source: InvalidPropertyError,
    },
}

/// Top-level description of one generated entity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    pub name: String,
    /// Persisted table name. May be empty.
    #[serde(default)]
    pub table_name: String,
    #[serde(default = "default_include_timestamps")]
    pub include_timestamps: bool,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

fn default_include_timestamps() -> bool {
    true
}

impl EntityDef {
    /// New entity with an empty table name, timestamps on and no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: String::new(),
            include_timestamps: default_include_timestamps(),
            properties: Vec::new(),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Builder form of [`EntityDef::add_property`].
    pub fn with_property(mut self, property: PropertyDef) -> Result<Self, EntityError> {
        self.add_property(property)?;
        Ok(self)
    }

    pub fn property(&self, id: &PropertyId) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| &p.id == id)
    }

    /// Look a property up by id, falling back to the first one with that name.
    pub fn find_property(&self, key: &str) -> Option<&PropertyDef> {
        self.properties
            .iter()
            .find(|p| p.id.as_str() == key)
            .or_else(|| self.properties.iter().find(|p| p.name == key))
    }

    /// Append a property, keeping insertion order.
    pub fn add_property(&mut self, property: PropertyDef) -> Result<&PropertyId, EntityError> {
        property
            .validate()
            .map_err(|source| EntityError::InvalidProperty {
                name: property.name.clone(),
                source,
            })?;
        if self.property(&property.id).is_some() {
            return Err(EntityError::DuplicatePropertyId(property.id));
        }
        self.properties.push(property);
        let added = self.properties.len() - 1;
        Ok(&self.properties[added].id)
    }

    /// Merge `patch` into the property with `id`. The property is left
    /// untouched when the merged result would be rejected.
    pub fn update_property(
        &mut self,
        id: &PropertyId,
        patch: &PropertyPatch,
    ) -> Result<&PropertyDef, EntityError> {
        let idx = self
            .properties
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| EntityError::PropertyNotFound(id.to_string()))?;

        let mut updated = self.properties[idx].clone();
        patch.apply_to(&mut updated);
        updated
            .validate()
            .map_err(|source| EntityError::InvalidProperty {
                name: updated.name.clone(),
                source,
            })?;

        self.properties[idx] = updated;
        Ok(&self.properties[idx])
    }

    pub fn remove_property(&mut self, id: &PropertyId) -> Result<PropertyDef, EntityError> {
        let idx = self
            .properties
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| EntityError::PropertyNotFound(id.to_string()))?;
        Ok(self.properties.remove(idx))
    }

    /// Check every property against the acceptance rule and ids for uniqueness.
    pub fn validate(&self) -> Result<(), EntityError> {
        for (idx, property) in self.properties.iter().enumerate() {
            property
                .validate()
                .map_err(|source| EntityError::InvalidProperty {
                    name: property.name.clone(),
                    source,
                })?;
            if self.properties[..idx].iter().any(|p| p.id == property.id) {
                return Err(EntityError::DuplicatePropertyId(property.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;

    fn prop(id: &str, name: &str) -> PropertyDef {
        PropertyDef::new(name, DataType::String).unwrap().with_id(id)
    }

    #[test]
    fn new_uses_upstream_defaults() {
        let entity = EntityDef::new("User");
        assert_eq!(entity.name, "User");
        assert_eq!(entity.table_name, "");
        assert!(entity.include_timestamps);
        assert!(entity.properties.is_empty());
    }

    #[test]
    fn add_property_preserves_order() {
        let mut entity = EntityDef::new("User");
        entity.add_property(prop("1", "b")).unwrap();
        entity.add_property(prop("2", "a")).unwrap();
        entity.add_property(prop("3", "c")).unwrap();
        let names: Vec<&str> = entity.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn add_property_returns_id() {
        let mut entity = EntityDef::new("User");
        let id = entity.add_property(prop("abc", "email")).unwrap().clone();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn add_property_rejects_empty_name() {
        let mut entity = EntityDef::new("User");
        let mut bad = prop("1", "x");
        bad.name.clear();
        let err = entity.add_property(bad).unwrap_err();
        assert!(matches!(
            err,
            EntityError::InvalidProperty {
                source: InvalidPropertyError::EmptyName,
                ..
            }
        ));
        assert!(entity.properties.is_empty());
    }

    #[test]
    fn add_property_rejects_duplicate_id() {
        let mut entity = EntityDef::new("User");
        entity.add_property(prop("1", "a")).unwrap();
        let err = entity.add_property(prop("1", "b")).unwrap_err();
        assert_eq!(err, EntityError::DuplicatePropertyId("1".into()));
    }

    #[test]
    fn duplicate_names_are_accepted() {
        let entity = EntityDef::new("User")
            .with_property(prop("1", "email"))
            .unwrap()
            .with_property(prop("2", "email"))
            .unwrap();
        assert_eq!(entity.properties.len(), 2);
    }

    #[test]
    fn update_property_merges_patch() {
        let mut entity = EntityDef::new("User")
            .with_property(prop("1", "email"))
            .unwrap();
        let patch = PropertyPatch {
            is_unique: Some(true),
            length: Some("120".into()),
            ..Default::default()
        };
        let updated = entity.update_property(&"1".into(), &patch).unwrap();
        assert!(updated.is_unique);
        assert_eq!(updated.length.as_deref(), Some("120"));
        assert_eq!(updated.name, "email");
    }

    #[test]
    fn update_property_rejected_leaves_property_untouched() {
        let mut entity = EntityDef::new("User")
            .with_property(prop("1", "email"))
            .unwrap();
        let before = entity.clone();
        let patch = PropertyPatch {
            name: Some(String::new()),
            is_unique: Some(true),
            ..Default::default()
        };
        assert!(entity.update_property(&"1".into(), &patch).is_err());
        assert_eq!(entity, before);
    }

    #[test]
    fn update_missing_property() {
        let mut entity = EntityDef::new("User");
        let err = entity
            .update_property(&"nope".into(), &PropertyPatch::default())
            .unwrap_err();
        assert_eq!(err, EntityError::PropertyNotFound("nope".into()));
    }

    #[test]
    fn remove_property_by_id() {
        let mut entity = EntityDef::new("User")
            .with_property(prop("1", "a"))
            .unwrap()
            .with_property(prop("2", "b"))
            .unwrap();
        let removed = entity.remove_property(&"1".into()).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(entity.properties.len(), 1);
        assert_eq!(entity.properties[0].name, "b");
        assert!(entity.remove_property(&"1".into()).is_err());
    }

    #[test]
    fn find_property_prefers_id_over_name() {
        let entity = EntityDef::new("User")
            .with_property(prop("email", "a"))
            .unwrap()
            .with_property(prop("2", "email"))
            .unwrap();
        assert_eq!(entity.find_property("email").unwrap().name, "a");
        assert_eq!(entity.find_property("2").unwrap().name, "email");
        assert!(entity.find_property("missing").is_none());
    }

    #[test]
    fn validate_detects_bad_entries() {
        let mut entity = EntityDef::new("User");
        entity.properties.push(prop("1", "a"));
        entity.properties.push(prop("1", "b"));
        assert_eq!(
            entity.validate().unwrap_err(),
            EntityError::DuplicatePropertyId("1".into())
        );

        entity.properties[1].id = "2".into();
        entity.properties[1].name.clear();
        assert!(matches!(
            entity.validate().unwrap_err(),
            EntityError::InvalidProperty { .. }
        ));
    }

    #[test]
    fn deserialize_with_defaults() {
        let json = r#"{ "name": "Post" }"#;
        let entity: EntityDef = serde_json::from_str(json).unwrap();
        assert_eq!(entity, EntityDef::new("Post"));
    }

    #[test]
    fn deserialize_yaml_model() {
        let yaml = r#"
name: user
tableName: users
includeTimestamps: false
properties:
  - id: "1"
    name: email
    dataType: string
    isUnique: true
  - id: "2"
    name: bornOn
    dataType: Date
    isOptional: true
"#;
        let entity: EntityDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entity.table_name, "users");
        assert!(!entity.include_timestamps);
        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[1].data_type, DataType::Date);
        assert!(entity.properties[1].is_optional);
        entity.validate().unwrap();
    }
}
