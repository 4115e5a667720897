// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema module - entity types, property keys and the configuration provider
//
// Types are registered in a SchemaCatalog (builtin types plus JSON schema
// documents) and read through the ConfigurationProvider trait.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod provider;
pub mod types;

pub use catalog::{SchemaCatalog, SchemaDefinition};
pub use error::{SchemaError, SchemaResult};
pub use provider::ConfigurationProvider;
pub use types::{
    split_format, EntityKind, EntityType, EnumProperty, PropertyInfo, PropertyKey, PropertyKind,
};
