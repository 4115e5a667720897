// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Builtin entity types registered in every catalog

use super::types::{EntityType, PropertyKey};

pub const ABSTRACT_NODE: &str = "AbstractNode";
pub const ABSTRACT_RELATIONSHIP: &str = "AbstractRelationship";
pub const CONTENT: &str = "Content";

pub const VIEW_ALL: &str = "all";
pub const VIEW_PUBLIC: &str = "public";
pub const VIEW_UI: &str = "ui";

/// Builtin types in registration order (supertypes first)
pub fn builtin_types() -> Vec<EntityType> {
    vec![abstract_node(), abstract_relationship(), content()]
}

fn base_keys() -> Vec<PropertyKey> {
    vec![
        PropertyKey::string("id").read_only().system().indexed(),
        PropertyKey::string("type").read_only().system().indexed(),
        PropertyKey::date("createdDate").read_only().system(),
        PropertyKey::date("lastModifiedDate").read_only().system(),
    ]
}

fn abstract_node() -> EntityType {
    let mut node = EntityType::node(ABSTRACT_NODE);
    node.properties = base_keys();
    node.properties.push(PropertyKey::string("name").indexed());
    node.with_view(VIEW_PUBLIC, ["id", "type", "name"])
}

fn abstract_relationship() -> EntityType {
    let mut rel = EntityType::node(ABSTRACT_RELATIONSHIP);
    rel.kind = super::types::EntityKind::Relationship;
    rel.properties = base_keys();
    rel.with_view(VIEW_PUBLIC, ["id", "type"])
}

/// Legacy content node: a named text fragment with a tag and content type
fn content() -> EntityType {
    const KEYS: [&str; 4] = ["name", "tag", "contentType", "size"];

    EntityType::node(CONTENT)
        .extends(ABSTRACT_NODE)
        .with_property(PropertyKey::string("name").indexed())
        .with_property(PropertyKey::string("tag"))
        .with_property(PropertyKey::string("contentType"))
        .with_property(PropertyKey::long("size"))
        .with_view(VIEW_ALL, KEYS)
        .with_view(VIEW_PUBLIC, KEYS)
        .with_view(VIEW_UI, KEYS)
}
