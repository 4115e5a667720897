// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema catalog
//!
//! In-memory registry of entity types. This is the default
//! [`ConfigurationProvider`]; definitions come from the builtin types and
//! from JSON schema documents.

use super::builtin;
use super::error::{SchemaError, SchemaResult};
use super::provider::ConfigurationProvider;
use super::types::{split_format, EntityKind, EntityType};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid type name pattern"));

/// A JSON schema document: `{"types": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub types: Vec<EntityType>,
}

/// Registry of entity types
pub struct SchemaCatalog {
    types: RwLock<HashMap<String, Arc<EntityType>>>,
}

impl SchemaCatalog {
    /// Create an empty catalog without builtin types
    pub fn empty() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Create a catalog holding the builtin types
    pub fn new() -> Self {
        let catalog = Self::empty();
        for entity_type in builtin::builtin_types() {
            if let Err(e) = catalog.register_type(entity_type) {
                log::error!("Failed to register builtin type: {}", e);
            }
        }
        catalog
    }

    /// Load a catalog from a JSON schema file, on top of the builtin types
    pub fn from_json_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let catalog = Self::new();
        let text = std::fs::read_to_string(path.as_ref())?;
        catalog.register_json(&text)?;
        Ok(catalog)
    }

    /// Register every type of a JSON schema document
    ///
    /// Types are registered in document order, so a supertype must appear
    /// before its subtypes. Returns the number of registered types.
    pub fn register_json(&self, json: &str) -> SchemaResult<usize> {
        let definition: SchemaDefinition = serde_json::from_str(json)?;
        let count = definition.types.len();
        for entity_type in definition.types {
            self.register_type(entity_type)?;
        }
        log::info!("Registered {} schema types from JSON definition", count);
        Ok(count)
    }

    /// Register a new entity type
    pub fn register_type(&self, entity_type: EntityType) -> SchemaResult<()> {
        if self.types.read().contains_key(&entity_type.name) {
            return Err(SchemaError::TypeAlreadyExists(entity_type.name));
        }
        self.insert_validated(entity_type)
    }

    /// Register or replace an entity type
    pub fn replace_type(&self, entity_type: EntityType) -> SchemaResult<()> {
        self.insert_validated(entity_type)
    }

    /// Remove an entity type; returns whether it existed
    pub fn remove_type(&self, name: &str) -> bool {
        self.types.write().remove(name).is_some()
    }

    pub fn type_count(&self) -> usize {
        self.types.read().len()
    }

    fn insert_validated(&self, mut entity_type: EntityType) -> SchemaResult<()> {
        self.validate(&entity_type)?;

        for key in &mut entity_type.properties {
            key.declaring_type = entity_type.name.clone();
        }

        log::debug!(
            "Registered {:?} type {} with {} properties",
            entity_type.kind,
            entity_type.name,
            entity_type.properties.len()
        );

        self.types
            .write()
            .insert(entity_type.name.clone(), Arc::new(entity_type));
        Ok(())
    }

    fn validate(&self, entity_type: &EntityType) -> SchemaResult<()> {
        if !TYPE_NAME.is_match(&entity_type.name) {
            return Err(SchemaError::InvalidDefinition(format!(
                "Invalid type name '{}'",
                entity_type.name
            )));
        }

        if let Some(parent) = &entity_type.extends {
            if parent == &entity_type.name {
                return Err(SchemaError::InvalidDefinition(format!(
                    "Type {} cannot extend itself",
                    entity_type.name
                )));
            }
            if !self.types.read().contains_key(parent) {
                return Err(SchemaError::UnknownType(parent.clone()));
            }
        }

        if entity_type.kind == EntityKind::Relationship {
            for endpoint in [&entity_type.source_type, &entity_type.target_type]
                .into_iter()
                .flatten()
            {
                if !self.types.read().contains_key(endpoint) {
                    return Err(SchemaError::UnknownType(endpoint.clone()));
                }
            }
        }

        let mut seen = HashSet::new();
        for key in &entity_type.properties {
            if key.json_name.is_empty() {
                return Err(SchemaError::InvalidDefinition(format!(
                    "Empty property name on type {}",
                    entity_type.name
                )));
            }

            if !seen.insert(key.json_name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    type_name: entity_type.name.clone(),
                    property: key.json_name.clone(),
                });
            }

            if key.is_enum() {
                Self::validate_enum_format(&entity_type.name, &key.json_name, key.format.as_deref())?;
            }
        }

        for (view, names) in &entity_type.views {
            for name in names {
                let declared = entity_type.declared_property(name).is_some();
                let inherited = entity_type
                    .extends
                    .as_deref()
                    .and_then(|parent| self.property_key_for_json_name(parent, name))
                    .is_some();
                if !declared && !inherited {
                    return Err(SchemaError::InvalidDefinition(format!(
                        "View {} of type {} references unknown property {}",
                        view, entity_type.name, name
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_enum_format(
        type_name: &str,
        property: &str,
        format: Option<&str>,
    ) -> SchemaResult<()> {
        let invalid = |reason: &str| SchemaError::InvalidEnumFormat {
            type_name: type_name.to_string(),
            property: property.to_string(),
            reason: reason.to_string(),
        };

        let format = format.ok_or_else(|| invalid("missing format string"))?;
        let symbols = split_format(format);

        if symbols.iter().any(|s| s.is_empty()) {
            return Err(invalid("empty symbol"));
        }

        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(invalid(&format!("duplicate symbol {}", symbol)));
            }
        }

        Ok(())
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationProvider for SchemaCatalog {
    fn entity_type(&self, name: &str) -> Option<Arc<EntityType>> {
        self.types.read().get(name).cloned()
    }

    fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::PropertyKey;

    fn document_catalog() -> SchemaCatalog {
        let catalog = SchemaCatalog::new();
        catalog
            .register_type(
                EntityType::node("Document")
                    .extends("AbstractNode")
                    .with_property(PropertyKey::enum_with_format(
                        "documentType",
                        "Invoice, Letter,Memo",
                    ))
                    .with_property(PropertyKey::string("title")),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_builtin_types_registered() {
        let catalog = SchemaCatalog::new();
        assert!(catalog.entity_type("AbstractNode").is_some());
        assert!(catalog.entity_type("Content").is_some());
    }

    #[test]
    fn test_lookup_walks_supertypes() {
        let catalog = document_catalog();
        let key = catalog.property_key_for_json_name("Document", "name").unwrap();
        assert_eq!(key.declaring_type, "AbstractNode");

        let own = catalog
            .property_key_for_json_name("Document", "documentType")
            .unwrap();
        assert_eq!(own.declaring_type, "Document");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = document_catalog();
        assert!(catalog
            .property_key_for_json_name("Document", "DocumentType")
            .is_none());
        assert!(catalog.entity_type("document").is_none());
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let catalog = SchemaCatalog::empty();
        let result = catalog.register_type(
            EntityType::node("Broken")
                .with_property(PropertyKey::string("a"))
                .with_property(PropertyKey::integer("a")),
        );
        assert!(matches!(result, Err(SchemaError::DuplicateProperty { .. })));
    }

    #[test]
    fn test_enum_format_must_be_unique_and_non_empty() {
        let catalog = SchemaCatalog::empty();
        let dup = catalog.register_type(
            EntityType::node("A").with_property(PropertyKey::enum_with_format("e", "X, X")),
        );
        assert!(matches!(dup, Err(SchemaError::InvalidEnumFormat { .. })));

        let empty = catalog.register_type(
            EntityType::node("B").with_property(PropertyKey::enum_with_format("e", "")),
        );
        assert!(matches!(empty, Err(SchemaError::InvalidEnumFormat { .. })));

        let missing =
            catalog.register_type(EntityType::node("C").with_property(PropertyKey::new(
                "e",
                crate::schema::types::PropertyKind::Enum,
            )));
        assert!(matches!(missing, Err(SchemaError::InvalidEnumFormat { .. })));
    }

    #[test]
    fn test_unknown_supertype_rejected() {
        let catalog = SchemaCatalog::empty();
        let result = catalog.register_type(EntityType::node("Child").extends("Missing"));
        assert!(matches!(result, Err(SchemaError::UnknownType(_))));
    }

    #[test]
    fn test_register_twice_fails_but_replace_works() {
        let catalog = document_catalog();
        let again = catalog.register_type(EntityType::node("Document"));
        assert!(matches!(again, Err(SchemaError::TypeAlreadyExists(_))));

        catalog.replace_type(EntityType::node("Document")).unwrap();
        assert!(catalog
            .property_key_for_json_name("Document", "documentType")
            .is_none());
    }

    #[test]
    fn test_register_json() {
        let catalog = SchemaCatalog::new();
        let count = catalog
            .register_json(
                r#"{"types": [
                    {"name": "Project", "extends": "AbstractNode",
                     "properties": [{"name": "status", "kind": "enum", "format": "Open, Done"}]},
                    {"name": "ProjectLink", "kind": "relationship",
                     "source_type": "Project", "target_type": "Project"}
                ]}"#,
            )
            .unwrap();
        assert_eq!(count, 2);
        assert!(catalog.is_subtype_of("Project", "AbstractNode"));
        assert_eq!(
            catalog.entity_type("ProjectLink").unwrap().kind,
            EntityKind::Relationship
        );
    }

    #[test]
    fn test_content_views() {
        let catalog = SchemaCatalog::new();
        let names: Vec<String> = catalog
            .property_set("Content", "ui")
            .into_iter()
            .map(|k| k.json_name)
            .collect();
        assert_eq!(names, vec!["name", "tag", "contentType", "size"]);
        assert!(catalog.property_set("Content", "nonexistent").is_empty());
    }
}
