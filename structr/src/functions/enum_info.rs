// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! enum_info function - schema introspection for enum properties
//!
//! `enum_info(type, property)` resolves an entity type and one of its
//! properties and returns the enum symbols declared in the property's format
//! string, in declaration order. Lookup failures are reported as diagnostic
//! strings rather than errors so templates keep rendering.

use super::function_trait::{
    has_length_and_all_elements_not_null, ActionContext, Function, FunctionResult,
};
use crate::schema::split_format;
use crate::storage::Value;
use std::fmt;

/// Why an enum_info lookup found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    UnknownType,
    UnknownProperty,
    NotAnEnum,
}

/// Result of an enum_info lookup, before projection to a scripting value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumInfo {
    /// Symbols in format order; duplicates and empty segments are kept
    Symbols(Vec<String>),
    /// Lookup failed; `detail` is the rendered diagnostic
    NotFound { kind: NotFoundKind, detail: String },
    /// Fewer than two arguments, or a null argument
    Malformed,
}

impl EnumInfo {
    fn not_found(kind: NotFoundKind, type_name: &str, property: Option<&str>) -> Self {
        let detail = match (kind, property) {
            (NotFoundKind::UnknownType, _) | (_, None) => format!("Unknown type {}", type_name),
            (NotFoundKind::UnknownProperty, Some(p)) => {
                format!("Unknown property {}.{}", type_name, p)
            }
            (NotFoundKind::NotAnEnum, Some(p)) => {
                format!("Not an Enum property {}.{}", type_name, p)
            }
        };
        EnumInfo::NotFound { kind, detail }
    }

    pub fn is_symbols(&self) -> bool {
        matches!(self, EnumInfo::Symbols(_))
    }

    pub fn symbols(&self) -> Option<&[String]> {
        match self {
            EnumInfo::Symbols(symbols) => Some(symbols),
            _ => None,
        }
    }
}

impl fmt::Display for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnumInfo::Symbols(symbols) => write!(f, "[{}]", symbols.join(", ")),
            EnumInfo::NotFound { detail, .. } => write!(f, "{}", detail),
            EnumInfo::Malformed => write!(f, "null"),
        }
    }
}

impl From<EnumInfo> for Value {
    fn from(info: EnumInfo) -> Self {
        match info {
            EnumInfo::Symbols(symbols) => Value::string_list(symbols),
            EnumInfo::NotFound { detail, .. } => Value::String(detail),
            EnumInfo::Malformed => Value::Null,
        }
    }
}

const USAGE: &str =
    "Usage: ${enum_info(type, enumProperty)}. Example ${enum_info('Document', 'documentType')}";
const USAGE_JS: &str = "Usage: ${Structr.enum_info(type, enumProperty)}. Example ${Structr.enum_info('Document', 'documentType')}";

/// enum_info(type, enumProperty)
#[derive(Debug, Default)]
pub struct EnumInfoFunction;

impl EnumInfoFunction {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the enum symbols for `arguments[0]`.`arguments[1]`
    pub fn resolve(&self, ctx: &ActionContext, arguments: &[Value]) -> EnumInfo {
        if !has_length_and_all_elements_not_null(arguments, 2) {
            return EnumInfo::Malformed;
        }

        let (type_name, property_name) =
            match (arguments[0].to_plain_string(), arguments[1].to_plain_string()) {
                (Some(t), Some(p)) => (t, p),
                _ => return EnumInfo::Malformed,
            };

        let config = &ctx.configuration;

        if config.entity_type(&type_name).is_none() {
            log::warn!("enum_info(): Unknown type {}", type_name);
            return EnumInfo::not_found(NotFoundKind::UnknownType, &type_name, None);
        }

        let key = match config.property_key_for_json_name(&type_name, &property_name) {
            Some(key) => key,
            None => {
                log::warn!(
                    "enum_info(): Unknown property {}.{}",
                    type_name,
                    property_name
                );
                return EnumInfo::not_found(
                    NotFoundKind::UnknownProperty,
                    &type_name,
                    Some(&property_name),
                );
            }
        };

        if !key.is_enum() {
            log::warn!(
                "enum_info(): Not an Enum property {}.{}",
                type_name,
                property_name
            );
            return EnumInfo::not_found(NotFoundKind::NotAnEnum, &type_name, Some(&property_name));
        }

        let info = config.property_info(&key);
        EnumInfo::Symbols(split_format(info.format().unwrap_or_default()))
    }
}

impl Function for EnumInfoFunction {
    fn name(&self) -> &str {
        "enum_info()"
    }

    fn short_description(&self) -> &str {
        "Returns the enum values as an array"
    }

    fn usage(&self, in_javascript_context: bool) -> &str {
        if in_javascript_context {
            USAGE_JS
        } else {
            USAGE
        }
    }

    fn argument_count(&self) -> usize {
        2
    }

    fn apply(&self, ctx: &ActionContext, arguments: &[Value]) -> FunctionResult<Value> {
        Ok(self.resolve(ctx, arguments).into())
    }
}
