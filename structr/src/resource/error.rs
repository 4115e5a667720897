// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resource error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised while resolving or reading a resource
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transformation failed: {0}")]
    Transformation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),
}

impl From<StorageError> for ResourceError {
    fn from(error: StorageError) -> Self {
        ResourceError::Storage(error.to_string())
    }
}

pub type ResourceResult<T> = Result<T, ResourceError>;
