// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Driver abstractions the graph store is written against

use super::types::{DriverResult, StorageType};
use std::sync::Arc;

/// Named collection of encoded objects keyed by object id
pub trait ObjectTree: Send + Sync {
    fn put(&self, id: &str, bytes: &[u8]) -> DriverResult<()>;

    fn fetch(&self, id: &str) -> DriverResult<Option<Vec<u8>>>;

    /// Returns whether an entry was removed
    fn delete(&self, id: &str) -> DriverResult<bool>;

    fn contains(&self, id: &str) -> DriverResult<bool>;

    /// Every stored value, ordered by id
    fn values(&self) -> DriverResult<Vec<Vec<u8>>>;

    fn len(&self) -> DriverResult<usize>;

    fn is_empty(&self) -> DriverResult<bool> {
        Ok(self.len()? == 0)
    }

    fn flush(&self) -> DriverResult<()>;
}

/// A storage backend holding any number of named trees
///
/// Opening the same tree name twice yields handles onto the same data.
pub trait StorageDriver: Send + Sync {
    fn tree(&self, name: &str) -> DriverResult<Arc<dyn ObjectTree>>;

    fn tree_names(&self) -> Vec<String>;

    fn flush(&self) -> DriverResult<()>;

    fn storage_type(&self) -> StorageType;
}
