// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph store - schema-validated persistence of nodes and relationships
//!
//! Nodes and relationships live in two trees of a storage driver, encoded
//! with bincode. Every write is checked against the configuration provider:
//! the entity type must exist, the property must be declared on the type or
//! one of its supertypes, and enum properties only accept their symbols.

use crate::schema::{ConfigurationProvider, EntityKind, PropertyKey, PropertyKind};
use crate::storage::persistent::{open_driver, BoxedDriver, ObjectTree, StorageType};
use crate::storage::types::{GraphError, GraphObject, Node, Relationship, StorageError};
use crate::storage::value::Value;
use log::{debug, info};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

const NODES_TREE: &str = "nodes";
const RELATIONSHIPS_TREE: &str = "relationships";

/// Properties handed to create operations
pub type PropertyMap = Vec<(String, Value)>;

/// Objects persisted in one of the store's trees
pub trait StoredObject: Serialize + DeserializeOwned + Clone {
    fn object_id(&self) -> &str;
    fn object_type(&self) -> &str;
    fn property(&self, key: &str) -> Option<&Value>;
    fn sort_key(&self) -> (chrono::DateTime<chrono::Utc>, String);
}

impl StoredObject for Node {
    fn object_id(&self) -> &str {
        &self.id
    }

    fn object_type(&self) -> &str {
        &self.type_name
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.get_property(key)
    }

    fn sort_key(&self) -> (chrono::DateTime<chrono::Utc>, String) {
        (self.created_date, self.id.clone())
    }
}

impl StoredObject for Relationship {
    fn object_id(&self) -> &str {
        &self.id
    }

    fn object_type(&self) -> &str {
        &self.type_name
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.get_property(key)
    }

    fn sort_key(&self) -> (chrono::DateTime<chrono::Utc>, String) {
        (self.created_date, self.id.clone())
    }
}

/// Schema-aware node and relationship store
pub struct GraphStore {
    driver: BoxedDriver,
    nodes: Arc<dyn ObjectTree>,
    relationships: Arc<dyn ObjectTree>,
    configuration: Arc<dyn ConfigurationProvider>,
    /// Serializes read-modify-write sequences
    write_lock: Mutex<()>,
}

impl GraphStore {
    /// Open a store on the given backend
    pub fn open<P: AsRef<Path>>(
        storage_type: StorageType,
        path: P,
        configuration: Arc<dyn ConfigurationProvider>,
    ) -> Result<Self, StorageError> {
        info!(
            "Opening graph store with {} storage at {:?}",
            storage_type,
            path.as_ref()
        );

        let driver = open_driver(storage_type, path.as_ref())?;
        let nodes = driver.tree(NODES_TREE)?;
        let relationships = driver.tree(RELATIONSHIPS_TREE)?;

        Ok(Self {
            driver,
            nodes,
            relationships,
            configuration,
            write_lock: Mutex::new(()),
        })
    }

    /// Open a store that keeps everything in memory
    pub fn in_memory(configuration: Arc<dyn ConfigurationProvider>) -> Result<Self, StorageError> {
        Self::open(StorageType::Memory, "", configuration)
    }

    pub fn storage_type(&self) -> StorageType {
        self.driver.storage_type()
    }

    pub fn configuration(&self) -> &Arc<dyn ConfigurationProvider> {
        &self.configuration
    }

    /// Create a node of `type_name` with the given properties
    pub fn create_node(
        &self,
        type_name: &str,
        properties: PropertyMap,
    ) -> Result<Node, StorageError> {
        self.require_kind(type_name, EntityKind::Node)?;

        let mut node = Node::new(type_name);
        for (key, value) in properties {
            self.validate_property(type_name, &key, &value)?;
            node.properties.insert(key, value);
        }

        let _guard = self.write_lock.lock();
        Self::put(self.nodes.as_ref(), &node)?;
        debug!("Created node {} of type {}", node.id, type_name);
        Ok(node)
    }

    /// Create a relationship of `type_name` between two existing nodes
    pub fn create_relationship(
        &self,
        type_name: &str,
        source_id: &str,
        target_id: &str,
        properties: PropertyMap,
    ) -> Result<Relationship, StorageError> {
        let entity_type = self.require_kind(type_name, EntityKind::Relationship)?;

        let _guard = self.write_lock.lock();

        let (source, target) = match (self.get_node(source_id)?, self.get_node(target_id)?) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                return Err(GraphError::InvalidRelationship {
                    from: source_id.to_string(),
                    to: target_id.to_string(),
                }
                .into())
            }
        };

        for (endpoint, expected) in [
            (&source, entity_type.source_type.as_deref()),
            (&target, entity_type.target_type.as_deref()),
        ] {
            if let Some(expected) = expected {
                if !self
                    .configuration
                    .is_subtype_of(&endpoint.type_name, expected)
                {
                    return Err(StorageError::InvalidOperation(format!(
                        "Relationship {} expects {} endpoint, got {}",
                        type_name, expected, endpoint.type_name
                    )));
                }
            }
        }

        let mut relationship = Relationship::new(type_name, source_id, target_id);
        for (key, value) in properties {
            self.validate_property(type_name, &key, &value)?;
            relationship.properties.insert(key, value);
        }

        Self::put(self.relationships.as_ref(), &relationship)?;
        debug!(
            "Created relationship {} of type {} ({} -> {})",
            relationship.id, type_name, source_id, target_id
        );
        Ok(relationship)
    }

    pub fn get_node(&self, id: &str) -> Result<Option<Node>, StorageError> {
        Self::fetch(self.nodes.as_ref(), id)
    }

    pub fn get_relationship(&self, id: &str) -> Result<Option<Relationship>, StorageError> {
        Self::fetch(self.relationships.as_ref(), id)
    }

    /// Fetch a node or relationship by id
    pub fn get_object(&self, id: &str) -> Result<Option<GraphObject>, StorageError> {
        if let Some(node) = self.get_node(id)? {
            return Ok(Some(node.into()));
        }
        Ok(self.get_relationship(id)?.map(GraphObject::from))
    }

    /// Set one property on an existing node or relationship
    pub fn set_property(
        &self,
        id: &str,
        key: &str,
        value: Value,
    ) -> Result<GraphObject, StorageError> {
        let _guard = self.write_lock.lock();

        match self.get_object(id)? {
            Some(GraphObject::Node(mut node)) => {
                self.validate_property(&node.type_name, key, &value)?;
                node.set_property(key.to_string(), value);
                Self::put(self.nodes.as_ref(), &node)?;
                Ok(node.into())
            }
            Some(GraphObject::Relationship(mut relationship)) => {
                self.validate_property(&relationship.type_name, key, &value)?;
                relationship.set_property(key.to_string(), value);
                Self::put(self.relationships.as_ref(), &relationship)?;
                Ok(relationship.into())
            }
            None => Err(GraphError::NodeNotFound(id.to_string()).into()),
        }
    }

    /// Read one property of a node or relationship
    pub fn get_property(&self, id: &str, key: &str) -> Result<Option<Value>, StorageError> {
        match self.get_object(id)? {
            Some(object) => Ok(object.get_property(key)),
            None => Err(GraphError::NodeNotFound(id.to_string()).into()),
        }
    }

    /// Delete a node together with every relationship attached to it
    pub fn delete_node(&self, id: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();

        if !self.nodes.contains(id)? {
            return Err(GraphError::NodeNotFound(id.to_string()).into());
        }

        let attached: Vec<Relationship> = Self::scan::<Relationship>(self.relationships.as_ref())?
            .into_iter()
            .filter(|r| r.source_id == id || r.target_id == id)
            .collect();
        for relationship in &attached {
            self.relationships.delete(&relationship.id)?;
        }

        self.nodes.delete(id)?;
        debug!(
            "Deleted node {} and {} attached relationships",
            id,
            attached.len()
        );
        Ok(())
    }

    pub fn delete_relationship(&self, id: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        if !self.relationships.delete(id)? {
            return Err(GraphError::RelationshipNotFound(id.to_string()).into());
        }
        Ok(())
    }

    /// Query nodes of a type (subtypes included)
    pub fn node_query(&self, type_name: &str) -> Query<'_, Node> {
        Query::new(self, self.nodes.as_ref(), type_name)
    }

    /// Query relationships of a type (subtypes included)
    pub fn relationship_query(&self, type_name: &str) -> Query<'_, Relationship> {
        Query::new(self, self.relationships.as_ref(), type_name)
    }

    /// All nodes and relationships of a type, in creation order
    pub fn all_of_type(&self, type_name: &str) -> Result<Vec<GraphObject>, StorageError> {
        let entity_type = self
            .configuration
            .entity_type(type_name)
            .ok_or_else(|| StorageError::UnknownType(type_name.to_string()))?;

        let objects = match entity_type.kind {
            EntityKind::Node => self
                .node_query(type_name)
                .get_result()?
                .into_iter()
                .map(GraphObject::from)
                .collect(),
            EntityKind::Relationship => self
                .relationship_query(type_name)
                .get_result()?
                .into_iter()
                .map(GraphObject::from)
                .collect(),
        };
        Ok(objects)
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.driver.flush()?;
        Ok(())
    }

    fn require_kind(
        &self,
        type_name: &str,
        kind: EntityKind,
    ) -> Result<Arc<crate::schema::EntityType>, StorageError> {
        let entity_type = self
            .configuration
            .entity_type(type_name)
            .ok_or_else(|| StorageError::UnknownType(type_name.to_string()))?;

        if entity_type.kind != kind {
            return Err(StorageError::InvalidOperation(format!(
                "{} is a {:?} type, expected {:?}",
                type_name, entity_type.kind, kind
            )));
        }
        Ok(entity_type)
    }

    fn validate_property(
        &self,
        type_name: &str,
        key: &str,
        value: &Value,
    ) -> Result<(), StorageError> {
        let property_key = self
            .configuration
            .property_key_for_json_name(type_name, key)
            .ok_or_else(|| {
                GraphError::PropertyError(format!("Unknown property {}.{}", type_name, key))
            })?;

        if property_key.system && property_key.read_only {
            return Err(GraphError::PropertyError(format!(
                "Property {}.{} is read-only",
                type_name, key
            ))
            .into());
        }

        if value.is_null() {
            return Ok(());
        }

        if let Some(enum_property) = property_key.as_enum() {
            let symbol = value.as_string().unwrap_or_default();
            if !enum_property.contains(symbol) {
                return Err(GraphError::PropertyError(format!(
                    "Invalid value {} for enum property {}.{}, expected one of {}",
                    value,
                    type_name,
                    key,
                    enum_property.symbols().join(", ")
                ))
                .into());
            }
            return Ok(());
        }

        if !Self::value_matches(&property_key, value) {
            return Err(GraphError::PropertyError(format!(
                "Property {}.{} expects {}, got {}",
                type_name,
                key,
                property_key.kind.type_name(),
                value.type_name()
            ))
            .into());
        }

        Ok(())
    }

    fn value_matches(key: &PropertyKey, value: &Value) -> bool {
        match key.kind {
            PropertyKind::String | PropertyKind::Reference | PropertyKind::Enum => {
                matches!(value, Value::String(_))
            }
            PropertyKind::Integer | PropertyKind::Long => {
                value.as_number().map(|n| n.fract() == 0.0).unwrap_or(false)
            }
            PropertyKind::Double => matches!(value, Value::Number(_)),
            PropertyKind::Boolean => matches!(value, Value::Boolean(_)),
            PropertyKind::Date => matches!(value, Value::DateTime(_)),
            PropertyKind::Collection => matches!(value, Value::List(_)),
        }
    }

    fn put<T: StoredObject>(tree: &dyn ObjectTree, object: &T) -> Result<(), StorageError> {
        let bytes = bincode::serialize(object)
            .map_err(|e| StorageError::PersistenceError(format!("Failed to encode: {}", e)))?;
        tree.put(object.object_id(), &bytes)?;
        Ok(())
    }

    fn fetch<T: StoredObject>(tree: &dyn ObjectTree, id: &str) -> Result<Option<T>, StorageError> {
        match tree.fetch(id)? {
            Some(bytes) => bincode::deserialize(&bytes).map(Some).map_err(|e| {
                StorageError::PersistenceError(format!("Failed to decode {}: {}", id, e))
            }),
            None => Ok(None),
        }
    }

    fn scan<T: StoredObject>(tree: &dyn ObjectTree) -> Result<Vec<T>, StorageError> {
        tree.values()?
            .iter()
            .map(|bytes| {
                bincode::deserialize(bytes).map_err(|e| {
                    StorageError::PersistenceError(format!("Failed to decode: {}", e))
                })
            })
            .collect()
    }
}

/// Type query with equality filters on properties
pub struct Query<'a, T: StoredObject> {
    store: &'a GraphStore,
    tree: &'a dyn ObjectTree,
    type_name: String,
    filters: Vec<(String, Value)>,
    _marker: PhantomData<T>,
}

impl<'a, T: StoredObject> Query<'a, T> {
    fn new(store: &'a GraphStore, tree: &'a dyn ObjectTree, type_name: &str) -> Self {
        Self {
            store,
            tree,
            type_name: type_name.to_string(),
            filters: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Require `key` to equal `value`
    pub fn and(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Matching objects in creation order
    pub fn get_result(&self) -> Result<Vec<T>, StorageError> {
        let configuration = &self.store.configuration;
        let mut matches: Vec<T> = GraphStore::scan::<T>(self.tree)?
            .into_iter()
            .filter(|object| configuration.is_subtype_of(object.object_type(), &self.type_name))
            .filter(|object| {
                self.filters
                    .iter()
                    .all(|(key, value)| object.property(key) == Some(value))
            })
            .collect();

        matches.sort_by_key(|object| object.sort_key());
        Ok(matches)
    }

    pub fn get_first(&self) -> Result<Option<T>, StorageError> {
        Ok(self.get_result()?.into_iter().next())
    }
}
