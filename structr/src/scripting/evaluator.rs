// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Expression evaluator
//!
//! Evaluates parsed template calls against the function registry. Nested
//! calls are evaluated innermost first; the `Structr.` prefix switches the
//! calling convention reported to the function.

use super::parser::{parse_template, Call, Expr};
use super::ScriptError;
use crate::functions::{ActionContext, FunctionRegistry};
use crate::storage::Value;
use log::debug;

/// Evaluates `${...}` expressions
#[derive(Debug, Default)]
pub struct Evaluator {
    registry: FunctionRegistry,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
        }
    }

    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Parse and evaluate a template expression
    pub fn evaluate(&self, ctx: &ActionContext, source: &str) -> Result<Value, ScriptError> {
        let call = parse_template(source).map_err(ScriptError::Parse)?;
        self.evaluate_call(ctx, &call)
    }

    /// Usage text of a registered function for the given calling convention
    pub fn usage(&self, name: &str, in_javascript_context: bool) -> Option<&str> {
        self.registry
            .get(name)
            .map(|function| function.usage(in_javascript_context))
    }

    fn evaluate_call(&self, ctx: &ActionContext, call: &Call) -> Result<Value, ScriptError> {
        let function = self
            .registry
            .get(&call.name)
            .ok_or_else(|| ScriptError::UnknownFunction(call.name.clone()))?;

        let arguments = call
            .arguments
            .iter()
            .map(|argument| match argument {
                Expr::Literal(value) => Ok(value.clone()),
                Expr::Call(inner) => self.evaluate_call(ctx, inner),
            })
            .collect::<Result<Vec<Value>, ScriptError>>()?;

        let call_ctx = ctx.clone().in_javascript_context(call.javascript);
        let result = function.apply(&call_ctx, &arguments)?;

        if result.is_null() {
            debug!(
                "{} returned null for {} argument(s). {}",
                function.name(),
                arguments.len(),
                function.usage(call.javascript)
            );
        }

        Ok(result)
    }
}
