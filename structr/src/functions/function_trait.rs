// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Generic function trait for scripting expressions
//!
//! This module defines the core Function trait that all scripting functions
//! implement, plus the context they execute in.

use crate::schema::ConfigurationProvider;
use crate::security::SecurityContext;
use crate::storage::Value;
use std::sync::Arc;

/// Error type for function execution
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("Invalid argument type: {message}")]
    InvalidArgumentType { message: String },

    #[error("Function execution failed: {message}")]
    ExecutionError { message: String },
}

/// Result type for function execution
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function execution context
#[derive(Clone)]
pub struct ActionContext {
    /// Caller identity
    pub security_context: SecurityContext,
    /// Schema access
    pub configuration: Arc<dyn ConfigurationProvider>,
    /// Whether the call came through the `Structr.` calling convention
    pub javascript_context: bool,
}

impl ActionContext {
    pub fn new(
        security_context: SecurityContext,
        configuration: Arc<dyn ConfigurationProvider>,
    ) -> Self {
        Self {
            security_context,
            configuration,
            javascript_context: false,
        }
    }

    pub fn in_javascript_context(mut self, javascript_context: bool) -> Self {
        self.javascript_context = javascript_context;
        self
    }
}

/// Check that exactly `count` arguments are present and none of them is null
pub fn has_length_and_all_elements_not_null(arguments: &[Value], count: usize) -> bool {
    arguments.len() == count && arguments.iter().all(|value| !value.is_null())
}

/// Core trait for all scripting functions
pub trait Function: Send + Sync + std::fmt::Debug {
    /// Name as shown in documentation, e.g. `enum_info()`
    fn name(&self) -> &str;

    /// One-line description of what the function returns
    fn short_description(&self) -> &str;

    /// Usage text for the template or the `Structr.` calling convention
    fn usage(&self, in_javascript_context: bool) -> &str;

    /// Expected number of arguments
    fn argument_count(&self) -> usize;

    /// Execute the function
    ///
    /// Misuse (wrong argument count, null arguments) yields `Ok(Value::Null)`
    /// rather than an error.
    fn apply(&self, ctx: &ActionContext, arguments: &[Value]) -> FunctionResult<Value>;
}
