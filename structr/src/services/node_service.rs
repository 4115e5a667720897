// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Node service - owns the graph store of a running instance

use super::{Service, ServiceError, ServiceResult};
use crate::config::settings::{DATABASE_DRIVER, DATABASE_PATH};
use crate::config::Settings;
use crate::schema::ConfigurationProvider;
use crate::storage::{GraphStore, StorageType};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

pub const NODE_SERVICE: &str = "NodeService";

/// Opens the graph store from the `database.*` settings on start
pub struct NodeService {
    settings: Arc<Settings>,
    base_path: PathBuf,
    configuration: Arc<dyn ConfigurationProvider>,
    store: RwLock<Option<Arc<GraphStore>>>,
}

impl NodeService {
    pub fn new(
        settings: Arc<Settings>,
        base_path: impl Into<PathBuf>,
        configuration: Arc<dyn ConfigurationProvider>,
    ) -> Self {
        Self {
            settings,
            base_path: base_path.into(),
            configuration,
            store: RwLock::new(None),
        }
    }

    /// The open store, while the service runs
    pub fn graph_store(&self) -> Option<Arc<GraphStore>> {
        self.store.read().clone()
    }

    fn failed(reason: impl ToString) -> ServiceError {
        ServiceError::StartFailed {
            name: NODE_SERVICE.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Service for NodeService {
    fn name(&self) -> &str {
        NODE_SERVICE
    }

    fn start(&self) -> ServiceResult<()> {
        let mut store = self.store.write();
        if store.is_some() {
            return Ok(());
        }

        let driver = self
            .settings
            .get_string(DATABASE_DRIVER)
            .unwrap_or_else(|| StorageType::default().to_string());
        let storage_type: StorageType = driver.parse().map_err(Self::failed)?;
        let path = self
            .base_path
            .join(self.settings.get_string(DATABASE_PATH).unwrap_or_default());

        let graph_store = GraphStore::open(storage_type, &path, self.configuration.clone())
            .map_err(Self::failed)?;
        *store = Some(Arc::new(graph_store));
        Ok(())
    }

    fn shutdown(&self) {
        if let Some(store) = self.store.write().take() {
            if let Err(e) = store.flush() {
                log::error!("Failed to flush graph store on shutdown: {}", e);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.store.read().is_some()
    }
}
