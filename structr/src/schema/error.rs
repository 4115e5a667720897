// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for schema registration and lookup

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),

    #[error("Type already exists: {0}")]
    TypeAlreadyExists(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Duplicate property {property} on type {type_name}")]
    DuplicateProperty { type_name: String, property: String },

    #[error("Invalid enum format on {type_name}.{property}: {reason}")]
    InvalidEnumFormat {
        type_name: String,
        property: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
