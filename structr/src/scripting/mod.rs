// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scripting surface: `${...}` template expressions calling registered
//! functions, in template form or with the `Structr.` prefix.

pub mod evaluator;
pub mod parser;

pub use evaluator::Evaluator;
pub use parser::{parse_template, Call, Expr};

use crate::functions::FunctionError;

/// Errors raised while evaluating an expression
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Function(#[from] FunctionError),
}
