// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema service - loads a JSON schema document into the catalog

use super::{Service, ServiceError, ServiceResult};
use crate::schema::{SchemaCatalog, SchemaDefinition};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

pub const SCHEMA_SERVICE: &str = "SchemaService";

/// Registers the types of a schema file on start and removes them on shutdown
pub struct SchemaService {
    catalog: Arc<SchemaCatalog>,
    schema_path: Option<PathBuf>,
    /// Names of the types this service registered, `None` while stopped
    loaded: RwLock<Option<Vec<String>>>,
}

impl SchemaService {
    pub fn new(catalog: Arc<SchemaCatalog>, schema_path: Option<PathBuf>) -> Self {
        Self {
            catalog,
            schema_path,
            loaded: RwLock::new(None),
        }
    }

    pub fn catalog(&self) -> &Arc<SchemaCatalog> {
        &self.catalog
    }

    fn failed(reason: impl ToString) -> ServiceError {
        ServiceError::StartFailed {
            name: SCHEMA_SERVICE.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Service for SchemaService {
    fn name(&self) -> &str {
        SCHEMA_SERVICE
    }

    fn start(&self) -> ServiceResult<()> {
        let mut loaded = self.loaded.write();
        if loaded.is_some() {
            return Ok(());
        }

        let mut names: Vec<String> = Vec::new();
        if let Some(path) = &self.schema_path {
            let text = std::fs::read_to_string(path).map_err(Self::failed)?;
            let definition: SchemaDefinition =
                serde_json::from_str(&text).map_err(Self::failed)?;

            for entity_type in definition.types {
                let name = entity_type.name.clone();
                if let Err(e) = self.catalog.register_type(entity_type) {
                    for registered in &names {
                        self.catalog.remove_type(registered);
                    }
                    return Err(Self::failed(e));
                }
                names.push(name);
            }
            log::info!(
                "Loaded {} schema types from {}",
                names.len(),
                path.display()
            );
        }

        *loaded = Some(names);
        Ok(())
    }

    fn shutdown(&self) {
        if let Some(names) = self.loaded.write().take() {
            for name in names.iter().rev() {
                self.catalog.remove_type(name);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.loaded.read().is_some()
    }
}
