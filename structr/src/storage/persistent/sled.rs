// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled-backed driver

use super::traits::{ObjectTree, StorageDriver};
use super::types::{DriverResult, StorageDriverError, StorageType};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Attempts at opening a database whose file lock is still held
const OPEN_ATTEMPTS: u32 = 8;
const OPEN_BACKOFF: Duration = Duration::from_millis(25);

fn sled_error(err: sled::Error) -> StorageDriverError {
    StorageDriverError::backend(StorageType::Sled, err)
}

/// sled releases the directory lock from a background thread after the last
/// `Db` handle drops, so an immediate reopen can briefly find it taken.
fn is_lock_contention(err: &sled::Error) -> bool {
    match err {
        sled::Error::Io(io) => {
            io.kind() == std::io::ErrorKind::WouldBlock
                || io.to_string().contains("could not acquire lock")
        }
        _ => false,
    }
}

pub struct SledDriver {
    db: sled::Db,
}

impl SledDriver {
    /// Open or create the database directory at `path`
    ///
    /// Lock contention is retried with a doubling backoff, about three seconds
    /// in total, before the error is returned.
    pub fn open(path: &Path) -> DriverResult<Self> {
        let mut delay = OPEN_BACKOFF;
        let mut attempt = 1;
        loop {
            match sled::open(path) {
                Ok(db) => return Ok(Self { db }),
                Err(e) if attempt < OPEN_ATTEMPTS && is_lock_contention(&e) => {
                    log::debug!(
                        "Database {} still locked (attempt {}), retrying in {:?}",
                        path.display(),
                        attempt,
                        delay
                    );
                    std::thread::sleep(delay);
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(sled_error(e)),
            }
        }
    }
}

struct SledTree {
    tree: sled::Tree,
}

impl ObjectTree for SledTree {
    fn put(&self, id: &str, bytes: &[u8]) -> DriverResult<()> {
        self.tree.insert(id.as_bytes(), bytes).map_err(sled_error)?;
        Ok(())
    }

    fn fetch(&self, id: &str) -> DriverResult<Option<Vec<u8>>> {
        let value = self.tree.get(id.as_bytes()).map_err(sled_error)?;
        Ok(value.map(|bytes| bytes.to_vec()))
    }

    fn delete(&self, id: &str) -> DriverResult<bool> {
        let previous = self.tree.remove(id.as_bytes()).map_err(sled_error)?;
        Ok(previous.is_some())
    }

    fn contains(&self, id: &str) -> DriverResult<bool> {
        self.tree.contains_key(id.as_bytes()).map_err(sled_error)
    }

    fn values(&self) -> DriverResult<Vec<Vec<u8>>> {
        self.tree
            .iter()
            .values()
            .map(|value| value.map(|bytes| bytes.to_vec()).map_err(sled_error))
            .collect()
    }

    fn len(&self) -> DriverResult<usize> {
        Ok(self.tree.len())
    }

    fn flush(&self) -> DriverResult<()> {
        self.tree.flush().map_err(sled_error)?;
        Ok(())
    }
}

impl StorageDriver for SledDriver {
    fn tree(&self, name: &str) -> DriverResult<Arc<dyn ObjectTree>> {
        let tree = self.db.open_tree(name).map_err(sled_error)?;
        Ok(Arc::new(SledTree { tree }))
    }

    fn tree_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .tree_names()
            .into_iter()
            .map(|name| String::from_utf8_lossy(&name).to_string())
            // sled's default tree
            .filter(|name| name != "__sled__default")
            .collect();
        names.sort();
        names
    }

    fn flush(&self) -> DriverResult<()> {
        self.db.flush().map_err(sled_error)?;
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Sled
    }
}
