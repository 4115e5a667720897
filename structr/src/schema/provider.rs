// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Configuration provider trait definition
//!
//! The configuration provider is the read side of the schema: it resolves
//! entity type names to type descriptors and JSON names to property keys.
//! Scripting functions, the graph store and resources consume schema
//! information exclusively through this trait.

use super::types::{EntityType, PropertyInfo, PropertyKey};
use std::sync::Arc;

/// Upper bound on supertype chain length, guards against cyclic definitions
const MAX_INHERITANCE_DEPTH: usize = 64;

/// Resolves entity types and property keys
pub trait ConfigurationProvider: Send + Sync {
    /// Resolve a raw type name (node or relationship type)
    fn entity_type(&self, name: &str) -> Option<Arc<EntityType>>;

    /// Names of all registered entity types
    fn type_names(&self) -> Vec<String>;

    /// Resolve a property key by exact, case-sensitive JSON name
    ///
    /// The lookup walks the supertype chain of `type_name`. No generic key is
    /// created when nothing matches.
    fn property_key_for_json_name(&self, type_name: &str, json_name: &str) -> Option<PropertyKey> {
        let mut current = self.entity_type(type_name);
        let mut depth = 0;

        while let Some(entity_type) = current {
            if let Some(key) = entity_type.declared_property(json_name) {
                return Some(key.clone());
            }

            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH {
                log::warn!(
                    "Inheritance chain of {} exceeds {} levels, giving up",
                    type_name,
                    MAX_INHERITANCE_DEPTH
                );
                return None;
            }

            current = entity_type
                .extends
                .as_deref()
                .and_then(|parent| self.entity_type(parent));
        }

        None
    }

    /// Metadata for a property key
    fn property_info(&self, key: &PropertyKey) -> PropertyInfo {
        key.info()
    }

    /// Keys registered for a named view, resolved through inheritance
    ///
    /// The nearest type in the chain that declares the view wins.
    fn property_set(&self, type_name: &str, view: &str) -> Vec<PropertyKey> {
        let mut current = self.entity_type(type_name);
        let mut depth = 0;

        while let Some(entity_type) = current {
            if let Some(names) = entity_type.views.get(view) {
                return names
                    .iter()
                    .filter_map(|name| self.property_key_for_json_name(type_name, name))
                    .collect();
            }

            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH {
                return Vec::new();
            }

            current = entity_type
                .extends
                .as_deref()
                .and_then(|parent| self.entity_type(parent));
        }

        Vec::new()
    }

    /// Check whether `type_name` equals `ancestor` or inherits from it
    fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        let mut current = Some(type_name.to_string());
        let mut depth = 0;

        while let Some(name) = current {
            if name == ancestor {
                return true;
            }

            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH {
                return false;
            }

            current = self
                .entity_type(&name)
                .and_then(|entity_type| entity_type.extends.clone());
        }

        false
    }
}
