// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory driver for tests and throwaway instances

use super::traits::{ObjectTree, StorageDriver};
use super::types::{DriverResult, StorageType};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
pub struct MemoryDriver {
    trees: RwLock<HashMap<String, Arc<MemoryTree>>>,
}

/// Ordered by id, matching sled's key order
#[derive(Default)]
pub struct MemoryTree {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectTree for MemoryTree {
    fn put(&self, id: &str, bytes: &[u8]) -> DriverResult<()> {
        self.entries.write().insert(id.to_string(), bytes.to_vec());
        Ok(())
    }

    fn fetch(&self, id: &str) -> DriverResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(id).cloned())
    }

    fn delete(&self, id: &str) -> DriverResult<bool> {
        Ok(self.entries.write().remove(id).is_some())
    }

    fn contains(&self, id: &str) -> DriverResult<bool> {
        Ok(self.entries.read().contains_key(id))
    }

    fn values(&self) -> DriverResult<Vec<Vec<u8>>> {
        Ok(self.entries.read().values().cloned().collect())
    }

    fn len(&self) -> DriverResult<usize> {
        Ok(self.entries.read().len())
    }

    fn flush(&self) -> DriverResult<()> {
        Ok(())
    }
}

impl StorageDriver for MemoryDriver {
    fn tree(&self, name: &str) -> DriverResult<Arc<dyn ObjectTree>> {
        let tree = self
            .trees
            .write()
            .entry(name.to_string())
            .or_default()
            .clone();
        Ok(tree)
    }

    fn tree_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.trees.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn flush(&self) -> DriverResult<()> {
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Memory
    }
}
