// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scripting function system
//!
//! Functions implement the Function trait and are registered by name in the
//! FunctionRegistry. Names are matched case-insensitively.

mod enum_info;
mod function_trait;

pub use enum_info::{EnumInfo, EnumInfoFunction, NotFoundKind};
pub use function_trait::{
    has_length_and_all_elements_not_null, ActionContext, Function, FunctionError, FunctionResult,
};

use std::collections::HashMap;

/// Registry of all available functions
#[derive(Debug)]
pub struct FunctionRegistry {
    functions: HashMap<String, Box<dyn Function + 'static>>,
}

impl FunctionRegistry {
    /// Create a registry with the builtin functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register("enum_info", Box::new(EnumInfoFunction::new()));

        registry
    }

    /// Register a function under a name
    pub fn register(&mut self, name: &str, function: Box<dyn Function + 'static>) {
        self.functions.insert(name.to_lowercase(), function);
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<&dyn Function> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Registered names, sorted
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("enum_info").is_some());
        assert!(registry.get("ENUM_INFO").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.function_names(), vec!["enum_info"]);
    }
}
