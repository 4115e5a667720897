// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Structr - schema-driven graph application framework core
//!
//! # Features
//!
//! - **Schema**: entity types with typed property keys, inheritance and views
//! - **Enum introspection**: `${enum_info(type, property)}` lists the symbols
//!   of an enum property
//! - **Graph store**: schema-validated nodes and relationships on sled or in
//!   memory
//! - **Resources**: paged REST resources, including view transformations
//!   over wrapped resources
//! - **Configuration console**: settings editing and service control behind
//!   a superuser login
//!
//! # Usage
//!
//! ```bash
//! # Serve the configuration console
//! structr serve --base-path ./instance --port 8082
//!
//! # Evaluate an expression
//! structr eval "\${enum_info('Document', 'documentType')}" --schema schema.json
//! ```

pub mod config;
pub mod console;
pub mod functions;
pub mod instance;
pub mod resource;
pub mod schema;
pub mod scripting;
pub mod security;
pub mod services;
pub mod storage;

pub use instance::{InstanceError, StructrInstance};
pub use security::SecurityContext;
pub use storage::Value;

/// Structr version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Structr crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
