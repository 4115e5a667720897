// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Structr instance - wires schema, settings, services and console together
//!
//! This is the main entry point for embedding Structr. An instance is rooted
//! at a base directory holding `structr.conf` and the database directory.

use crate::config::{Settings, SettingsError};
use crate::console::{ConfigConsole, InMemorySessionStore};
use crate::functions::{ActionContext, EnumInfo, EnumInfoFunction};
use crate::schema::{ConfigurationProvider, SchemaCatalog};
use crate::scripting::{Evaluator, ScriptError};
use crate::security::SecurityContext;
use crate::services::{NodeService, SchemaService, Service, ServiceError, Services};
use crate::storage::{GraphStore, Value};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("Cannot prepare base directory {path}: {source}")]
    BaseDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// A configured Structr instance
pub struct StructrInstance {
    base_path: PathBuf,
    catalog: Arc<SchemaCatalog>,
    settings: Arc<Settings>,
    services: Arc<Services>,
    node_service: Arc<NodeService>,
    console: ConfigConsole,
    evaluator: Evaluator,
}

impl StructrInstance {
    /// Open an instance rooted at `base_path`
    ///
    /// Loads `structr.conf` when present and registers the types of
    /// `schema_path`, if given. The node service is not started.
    pub fn open(
        base_path: impl AsRef<Path>,
        schema_path: Option<PathBuf>,
    ) -> Result<Self, InstanceError> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path).map_err(|source| InstanceError::BaseDirectory {
            path: base_path.clone(),
            source,
        })?;

        let services = Arc::new(Services::new(&base_path));

        let settings = Arc::new(Settings::new());
        if services.is_configured() {
            settings.load_configuration(services.config_file_path())?;
        } else {
            info!(
                "No configuration found in {}, console runs in first-run mode",
                base_path.display()
            );
        }

        let catalog = Arc::new(SchemaCatalog::new());
        let provider: Arc<dyn ConfigurationProvider> = catalog.clone();

        let schema_service = Arc::new(SchemaService::new(catalog.clone(), schema_path));
        let node_service = Arc::new(NodeService::new(
            settings.clone(),
            &base_path,
            provider,
        ));
        services.register(schema_service.clone());
        services.register(node_service.clone());

        schema_service.start()?;

        let console = ConfigConsole::new(
            settings.clone(),
            services.clone(),
            Arc::new(InMemorySessionStore::new()),
        );

        Ok(Self {
            base_path,
            catalog,
            settings,
            services,
            node_service,
            console,
            evaluator: Evaluator::new(),
        })
    }

    /// Start every registered service; failures are logged
    pub fn start_services(&self) {
        for name in self.services.get_services() {
            if let Err(e) = self.services.start_service(&name) {
                warn!("Service {} did not start: {}", name, e);
            }
        }
    }

    pub fn shutdown(&self) {
        self.services.shutdown_all();
    }

    /// Action context for the given caller
    pub fn action_context(&self, security_context: SecurityContext) -> ActionContext {
        ActionContext::new(security_context, self.catalog.clone())
    }

    /// Evaluate a `${...}` expression
    pub fn evaluate(
        &self,
        security_context: SecurityContext,
        expression: &str,
    ) -> Result<Value, ScriptError> {
        let ctx = self.action_context(security_context);
        self.evaluator.evaluate(&ctx, expression)
    }

    /// Enum symbols of `type_name`.`property`
    pub fn enum_info(&self, type_name: &str, property: &str) -> EnumInfo {
        let ctx = self.action_context(SecurityContext::super_user());
        EnumInfoFunction::new().resolve(&ctx, &[Value::from(type_name), Value::from(property)])
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn catalog(&self) -> &Arc<SchemaCatalog> {
        &self.catalog
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn console(&self) -> &ConfigConsole {
        &self.console
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The graph store, while the node service runs
    pub fn graph_store(&self) -> Option<Arc<GraphStore>> {
        self.node_service.graph_store()
    }
}

impl Drop for StructrInstance {
    fn drop(&mut self) {
        self.shutdown();
    }
}
