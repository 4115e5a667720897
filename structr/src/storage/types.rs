// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph object structures and error types
//!
//! Defines Node and Relationship structures stored by the graph store,
//! along with error types for graph operations.

use crate::storage::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Error types for graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    #[error("Invalid relationship: from node {from} to node {to} - one or both nodes don't exist")]
    InvalidRelationship { from: String, to: String },

    #[error("Property error: {0}")]
    PropertyError(String),
}

/// Error types for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),
}

impl From<super::persistent::StorageDriverError> for StorageError {
    fn from(err: super::persistent::StorageDriverError) -> Self {
        StorageError::PersistenceError(err.to_string())
    }
}

/// Graph node with id, entity type and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub type_name: String,
    pub properties: HashMap<String, Value>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl Node {
    /// Create a new node of the given type with a fresh id
    pub fn new(type_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            type_name: type_name.into(),
            properties: HashMap::new(),
            created_date: now,
            last_modified_date: now,
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: String, value: Value) {
        self.properties.insert(key, value);
        self.last_modified_date = Utc::now();
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Graph relationship with id, endpoints, entity type and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub type_name: String,
    pub source_id: String,
    pub target_id: String,
    pub properties: HashMap<String, Value>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl Relationship {
    /// Create a new relationship
    pub fn new(
        type_name: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            type_name: type_name.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            properties: HashMap::new(),
            created_date: now,
            last_modified_date: now,
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: String, value: Value) {
        self.properties.insert(key, value);
        self.last_modified_date = Utc::now();
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Check if this relationship goes from source to target
    pub fn goes_from_to(&self, source: &str, target: &str) -> bool {
        self.source_id == source && self.target_id == target
    }
}

/// Any object a resource can return: a node or a relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphObject {
    Node(Node),
    Relationship(Relationship),
}

impl GraphObject {
    pub fn id(&self) -> &str {
        match self {
            GraphObject::Node(n) => &n.id,
            GraphObject::Relationship(r) => &r.id,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            GraphObject::Node(n) => &n.type_name,
            GraphObject::Relationship(r) => &r.type_name,
        }
    }

    /// Get a property value. `id` and `type` resolve to the object's
    /// identity so they can be used as sort keys.
    pub fn get_property(&self, key: &str) -> Option<Value> {
        match key {
            "id" => return Some(Value::String(self.id().to_string())),
            "type" => return Some(Value::String(self.type_name().to_string())),
            _ => {}
        }
        match self {
            GraphObject::Node(n) => n.get_property(key).cloned(),
            GraphObject::Relationship(r) => r.get_property(key).cloned(),
        }
    }

    pub fn set_property(&mut self, key: String, value: Value) {
        match self {
            GraphObject::Node(n) => n.set_property(key, value),
            GraphObject::Relationship(r) => r.set_property(key, value),
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            GraphObject::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            GraphObject::Relationship(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Node> for GraphObject {
    fn from(node: Node) -> Self {
        GraphObject::Node(node)
    }
}

impl From<Relationship> for GraphObject {
    fn from(rel: Relationship) -> Self {
        GraphObject::Relationship(rel)
    }
}
