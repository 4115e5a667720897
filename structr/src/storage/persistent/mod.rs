// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Key-value backends below the graph store
//!
//! ```text
//! GraphStore ── trees "nodes", "relationships"
//!     │
//! StorageDriver ── MemoryDriver | SledDriver
//! ```

pub mod factory;
pub mod memory;
#[cfg(feature = "sled-backend")]
pub mod sled;
pub mod traits;
pub mod types;

pub use factory::{open_driver, BoxedDriver};
pub use traits::{ObjectTree, StorageDriver};
pub use types::{DriverResult, StorageDriverError, StorageType};
