// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Service registry
//!
//! Services are long-lived components that can be started and stopped from
//! the configuration console. The registry knows every service by name and
//! whether the instance has been configured (configuration file present).

mod node_service;
mod schema_service;

pub use node_service::{NodeService, NODE_SERVICE};
pub use schema_service::{SchemaService, SCHEMA_SERVICE};

use crate::config::CONFIG_FILE_NAME;
use log::{info, warn};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Service {name} failed to start: {reason}")]
    StartFailed { name: String, reason: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A startable, stoppable component
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    fn start(&self) -> ServiceResult<()>;

    fn shutdown(&self);

    fn is_running(&self) -> bool;
}

/// Registry of services, keyed by name
pub struct Services {
    services: RwLock<BTreeMap<String, Arc<dyn Service>>>,
    base_path: PathBuf,
}

impl Services {
    /// Registry for an instance rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            services: RwLock::new(BTreeMap::new()),
            base_path: base_path.into(),
        }
    }

    pub fn register(&self, service: Arc<dyn Service>) {
        let name = service.name().to_string();
        self.services.write().insert(name, service);
    }

    /// Registered service names, sorted
    pub fn get_services(&self) -> Vec<String> {
        self.services.read().keys().cloned().collect()
    }

    pub fn get_service(&self, name: &str) -> Option<Arc<dyn Service>> {
        self.services.read().get(name).cloned()
    }

    /// Start a service by name; unknown names are logged and ignored
    pub fn start_service(&self, name: &str) -> ServiceResult<()> {
        let Some(service) = self.get_service(name) else {
            warn!("Cannot start unknown service {}", name);
            return Err(ServiceError::UnknownService(name.to_string()));
        };

        if service.is_running() {
            return Ok(());
        }

        service.start()?;
        info!("Service {} started", name);
        Ok(())
    }

    /// Stop a service by name; unknown names are logged and ignored
    pub fn shutdown_service(&self, name: &str) -> ServiceResult<()> {
        let Some(service) = self.get_service(name) else {
            warn!("Cannot stop unknown service {}", name);
            return Err(ServiceError::UnknownService(name.to_string()));
        };

        if service.is_running() {
            service.shutdown();
            info!("Service {} stopped", name);
        }
        Ok(())
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.get_service(name)
            .map(|service| service.is_running())
            .unwrap_or(false)
    }

    /// Whether a configuration file exists, i.e. this is not a first run
    pub fn is_configured(&self) -> bool {
        self.config_file_path().exists()
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_FILE_NAME)
    }

    /// Stop every running service
    pub fn shutdown_all(&self) {
        for service in self.services.read().values() {
            if service.is_running() {
                service.shutdown();
            }
        }
    }
}
