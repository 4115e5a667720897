// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage backend selection and driver errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend behind the graph store, chosen by the `database.driver` setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Embedded sled database below `database.path`
    #[default]
    Sled,
    /// Process-local maps; nothing survives a restart
    Memory,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Sled => "sled",
            StorageType::Memory => "memory",
        }
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sled" => Ok(StorageType::Sled),
            "memory" => Ok(StorageType::Memory),
            other => Err(format!(
                "Unknown database driver '{}', expected sled or memory",
                other
            )),
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure inside a storage driver
#[derive(Debug, thiserror::Error)]
pub enum StorageDriverError {
    #[error("{backend} driver failed: {message}")]
    Backend {
        backend: StorageType,
        message: String,
    },

    #[error("{0} driver is not available in this build")]
    Unavailable(StorageType),
}

impl StorageDriverError {
    pub(crate) fn backend(backend: StorageType, err: impl fmt::Display) -> Self {
        StorageDriverError::Backend {
            backend,
            message: err.to_string(),
        }
    }
}

pub type DriverResult<T> = Result<T, StorageDriverError>;
