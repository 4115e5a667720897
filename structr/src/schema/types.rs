// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Core schema type definitions: entity types and property keys

use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use std::collections::BTreeMap;

/// Whether an entity type describes nodes or relationships
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Node,
    Relationship,
}

/// Declared kind of a property key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Date,
    Enum,
    Reference,
    Collection,
}

impl PropertyKind {
    /// Type name as reported in property info
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::String => "String",
            PropertyKind::Integer => "Integer",
            PropertyKind::Long => "Long",
            PropertyKind::Double => "Double",
            PropertyKind::Boolean => "Boolean",
            PropertyKind::Date => "Date",
            PropertyKind::Enum => "Enum",
            PropertyKind::Reference => "Reference",
            PropertyKind::Collection => "Collection",
        }
    }
}

/// A named, typed attribute descriptor on an entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyKey {
    /// JSON-facing name, unique within the declaring type
    #[serde(rename = "name")]
    pub json_name: String,
    #[serde(default)]
    pub kind: PropertyKind,
    /// Filled in on registration
    #[serde(default)]
    pub declaring_type: String,
    #[serde(default)]
    pub db_name: Option<String>,
    /// Enum symbols as a comma separated list; only meaningful for enum keys
    #[serde(default)]
    pub format: Option<String>,
    /// Target entity type for reference and collection keys
    #[serde(default)]
    pub related_type: Option<String>,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub not_null: bool,
}

impl PropertyKey {
    pub fn new(json_name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            json_name: json_name.into(),
            kind,
            declaring_type: String::new(),
            db_name: None,
            format: None,
            related_type: None,
            default_value: None,
            read_only: false,
            system: false,
            indexed: false,
            unique: false,
            not_null: false,
        }
    }

    pub fn string(json_name: impl Into<String>) -> Self {
        Self::new(json_name, PropertyKind::String)
    }

    pub fn integer(json_name: impl Into<String>) -> Self {
        Self::new(json_name, PropertyKind::Integer)
    }

    pub fn long(json_name: impl Into<String>) -> Self {
        Self::new(json_name, PropertyKind::Long)
    }

    pub fn date(json_name: impl Into<String>) -> Self {
        Self::new(json_name, PropertyKind::Date)
    }

    pub fn boolean(json_name: impl Into<String>) -> Self {
        Self::new(json_name, PropertyKind::Boolean)
    }

    /// Enum key whose format string lists the given symbols in order
    pub fn enumeration<I, S>(json_name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let format = symbols
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::enum_with_format(json_name, format)
    }

    /// Enum key with a literal format string, e.g. `"A, B,C"`
    pub fn enum_with_format(json_name: impl Into<String>, format: impl Into<String>) -> Self {
        let mut key = Self::new(json_name, PropertyKind::Enum);
        key.format = Some(format.into());
        key
    }

    pub fn reference(json_name: impl Into<String>, related_type: impl Into<String>) -> Self {
        let mut key = Self::new(json_name, PropertyKind::Reference);
        key.related_type = Some(related_type.into());
        key
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn is_enum(&self) -> bool {
        self.kind == PropertyKind::Enum
    }

    /// View this key as an enum property, if it is one
    pub fn as_enum(&self) -> Option<EnumProperty<'_>> {
        if self.is_enum() {
            Some(EnumProperty { key: self })
        } else {
            None
        }
    }

    /// Name used in storage; defaults to the JSON name
    pub fn db_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(&self.json_name)
    }

    /// Metadata describing this key, as exposed to scripting and REST callers
    pub fn info(&self) -> PropertyInfo {
        let mut map = Map::new();
        map.insert("jsonName".to_string(), json!(self.json_name));
        map.insert("dbName".to_string(), json!(self.db_name()));
        map.insert("type".to_string(), json!(self.kind.type_name()));
        map.insert("declaringClass".to_string(), json!(self.declaring_type));
        map.insert(
            "defaultValue".to_string(),
            self.default_value.clone().unwrap_or(serde_json::Value::Null),
        );
        map.insert("readOnly".to_string(), json!(self.read_only));
        map.insert("system".to_string(), json!(self.system));
        map.insert("indexed".to_string(), json!(self.indexed));
        map.insert("unique".to_string(), json!(self.unique));
        map.insert("notNull".to_string(), json!(self.not_null));
        map.insert(
            "relatedType".to_string(),
            self.related_type
                .as_ref()
                .map(|t| json!(t))
                .unwrap_or(serde_json::Value::Null),
        );
        map.insert(
            "format".to_string(),
            self.format
                .as_ref()
                .map(|f| json!(f))
                .unwrap_or(serde_json::Value::Null),
        );
        PropertyInfo(map)
    }
}

/// Property metadata map (`jsonName`, `type`, `format`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo(pub Map<String, serde_json::Value>);

impl PropertyInfo {
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// The `format` entry as a string, if present and non-null
    pub fn format(&self) -> Option<&str> {
        self.0.get("format").and_then(|v| v.as_str())
    }
}

/// Enum specialization of a property key
#[derive(Debug, Clone, Copy)]
pub struct EnumProperty<'a> {
    key: &'a PropertyKey,
}

impl<'a> EnumProperty<'a> {
    pub fn key(&self) -> &'a PropertyKey {
        self.key
    }

    pub fn format(&self) -> &'a str {
        self.key.format.as_deref().unwrap_or("")
    }

    /// Symbols in format order, spaces removed, nothing filtered
    pub fn symbols(&self) -> Vec<String> {
        split_format(self.format())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }
}

/// Remove every space from an enum format string and split it on commas
pub fn split_format(format: &str) -> Vec<String> {
    format
        .replace(' ', "")
        .split(',')
        .map(str::to_string)
        .collect()
}

/// A named schema type with its declared property keys and views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityType {
    pub name: String,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub extends: Option<String>,
    /// Source node type, relationship types only
    #[serde(default)]
    pub source_type: Option<String>,
    /// Target node type, relationship types only
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyKey>,
    /// View name to ordered property names
    #[serde(default)]
    pub views: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EntityType {
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Node,
            extends: None,
            source_type: None,
            target_type: None,
            properties: Vec::new(),
            views: BTreeMap::new(),
            description: None,
        }
    }

    pub fn relationship(
        name: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntityKind::Relationship,
            source_type: Some(source_type.into()),
            target_type: Some(target_type.into()),
            ..Self::node(name)
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn with_property(mut self, key: PropertyKey) -> Self {
        self.properties.push(key);
        self
    }

    pub fn with_view<I, S>(mut self, view: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.views
            .insert(view.into(), names.into_iter().map(Into::into).collect());
        self
    }

    /// Key declared directly on this type (no inheritance)
    pub fn declared_property(&self, json_name: &str) -> Option<&PropertyKey> {
        self.properties.iter().find(|p| p.json_name == json_name)
    }
}
