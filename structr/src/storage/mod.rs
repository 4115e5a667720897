// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage layer: property values, graph objects and the schema-validated
//! graph store on top of pluggable key-value drivers.

pub mod graph_store;
pub mod persistent;
pub mod types;
pub mod value;

pub use graph_store::{GraphStore, PropertyMap, Query};
pub use persistent::StorageType;
pub use types::{GraphError, GraphObject, Node, Relationship, StorageError};
pub use value::Value;
