// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Driver construction from a [`StorageType`]

use super::memory::MemoryDriver;
use super::traits::StorageDriver;
use super::types::{DriverResult, StorageType};
use std::path::Path;

pub type BoxedDriver = Box<dyn StorageDriver>;

/// Open the driver for `storage_type`; the memory driver ignores `path`
pub fn open_driver(storage_type: StorageType, path: &Path) -> DriverResult<BoxedDriver> {
    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => Ok(Box::new(super::sled::SledDriver::open(path)?)),
        #[cfg(not(feature = "sled-backend"))]
        StorageType::Sled => {
            let _ = path;
            Err(super::types::StorageDriverError::Unavailable(StorageType::Sled))
        }
        StorageType::Memory => Ok(Box::new(MemoryDriver::new())),
    }
}
